pub mod credentials;
pub mod ecosystem;
pub mod package_reference;
pub mod rule_verdict;
pub mod trust_verdict;
pub mod trusted_dependency;
pub mod trusted_identities;
pub mod webhook_event;

pub use credentials::{AuthenticationScheme, Credentials, Principal};
pub use ecosystem::DependencyEcosystem;
pub use package_reference::{PackageReference, RepositoryId};
pub use rule_verdict::RuleVerdict;
pub use trust_verdict::{TrustReason, TrustReport, TrustVerdict};
pub use trusted_dependency::TrustedDependency;
pub use trusted_identities::TrustedIdentities;
pub use webhook_event::{WebhookEvent, WebhookEventKind};
