/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI,
/// webhook handlers) use to interact with the trust engine.
pub mod deployment_approval_port;
pub mod trust_evaluation_port;
pub mod trust_management_port;

pub use deployment_approval_port::DeploymentApprovalPort;
pub use trust_evaluation_port::TrustEvaluationPort;
pub use trust_management_port::TrustManagementPort;
