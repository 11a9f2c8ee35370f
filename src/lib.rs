//! dependabot-trust - trust and approval decisions for dependency updates
//!
//! This library decides whether a dependency version proposed by an automated
//! update is trusted, based on who publishes it in its package registry, and
//! whether a deployment may proceed, based on an ordered chain of rules. It
//! follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`trust_evaluation`): Domain models, trust policy and deployment rules
//! - **Application Layer** (`application`): Use cases, DTOs and the registry factory
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Registries, GitHub, caching, storage and console output
//! - **Configuration** (`config`): YAML configuration file support
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dependabot_trust::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//! let cache = Arc::new(MemoryCache::new(Arc::clone(&clock)));
//! let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
//!
//! // Anonymous GitHub access
//! let options = GitHubAppOptions {
//!     api_url: DEFAULT_GITHUB_API_URL.to_string(),
//!     ..Default::default()
//! };
//! let credentials = Arc::new(GitHubAppCredentialProvider::new(
//!     options,
//!     Arc::clone(&http),
//!     Arc::clone(&cache),
//!     Arc::clone(&clock),
//! ));
//! let github = Arc::new(GitHubApi::new(
//!     Arc::clone(&http),
//!     credentials,
//!     Principal::User,
//!     DEFAULT_GITHUB_API_URL,
//!     Arc::clone(&cache),
//! ));
//! let registries =
//!     RegistryFactory::create(http, github, cache, &RegistryEndpoints::default());
//!
//! // Create use case
//! let use_case = EvaluateTrustUseCase::new(
//!     registries,
//!     Arc::new(InMemoryTrustStore::new(clock)),
//!     TrustedIdentities::new().with(DependencyEcosystem::GitHubActions, "actions"),
//!     StderrProgressReporter::new(false),
//! );
//!
//! // Execute
//! let repository: RepositoryId = "octo-org/octo-repo".parse()?;
//! let reference = PackageReference::new(
//!     DependencyEcosystem::GitHubActions,
//!     "actions/checkout",
//!     "v4",
//! );
//! let verdict = use_case.evaluate(&repository, &reference).await?;
//! println!("{}: {}", verdict.reference, verdict.reason);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod trust_evaluation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cache::{CacheEntryOptions, MemoryCache};
    pub use crate::adapters::outbound::clock::{ManualClock, SystemClock};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::network::{
        GitHubApi, GitHubAppCredentialProvider, GitHubAppOptions, ReqwestHttpClient,
        DEFAULT_GITHUB_API_URL,
    };
    pub use crate::adapters::outbound::storage::{InMemoryTrustStore, SqliteTrustStore};
    pub use crate::application::dto::{DeploymentSettings, TrustRequest};
    pub use crate::application::factories::{RegistryEndpoints, RegistryFactory, RegistrySet};
    pub use crate::application::use_cases::{
        EvaluateDeploymentUseCase, EvaluateTrustUseCase, ManageTrustUseCase,
    };
    pub use crate::ports::inbound::{
        DeploymentApprovalPort, TrustEvaluationPort, TrustManagementPort,
    };
    pub use crate::ports::outbound::{
        CalendarEvent, CalendarRepository, Clock, CredentialProvider, HolidayRepository,
        HttpClient, PackageRegistry, ProgressReporter, TrustStore,
    };
    pub use crate::shared::Result;
    pub use crate::trust_evaluation::domain::{
        Credentials, DependencyEcosystem, PackageReference, Principal, RepositoryId, RuleVerdict,
        TrustReason, TrustReport, TrustVerdict, TrustedDependency, TrustedIdentities,
        WebhookEvent, WebhookEventKind,
    };
    pub use crate::trust_evaluation::policies::DeploymentRule;
    pub use crate::trust_evaluation::services::DeploymentRuleChain;
}
