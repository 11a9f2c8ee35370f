/// Use cases module containing application business logic orchestration
mod evaluate_deployment;
mod evaluate_trust;
mod manage_trust;

pub use evaluate_deployment::EvaluateDeploymentUseCase;
pub use evaluate_trust::{EvaluateTrustUseCase, DEFAULT_CONCURRENCY};
pub use manage_trust::ManageTrustUseCase;
