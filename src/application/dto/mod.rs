/// Data Transfer Objects for application layer
///
/// DTOs carry loosely-typed input from adapters (CLI, configuration) into
/// the use cases, keeping parsing out of the domain layer.
mod deployment_settings;
mod trust_request;

pub use deployment_settings::DeploymentSettings;
pub use trust_request::TrustRequest;
