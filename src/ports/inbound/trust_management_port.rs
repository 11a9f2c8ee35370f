use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, PackageReference, TrustedDependency};
use async_trait::async_trait;

/// TrustManagementPort - Inbound port for operator trust decisions
#[async_trait]
pub trait TrustManagementPort: Send + Sync {
    /// Marks an exact dependency version as trusted
    async fn trust(&self, reference: &PackageReference) -> Result<()>;

    /// Withdraws trust from an exact dependency version
    async fn distrust(&self, reference: &PackageReference) -> Result<()>;

    async fn is_trusted(&self, reference: &PackageReference) -> Result<bool>;

    /// Lists trusted versions for an ecosystem, sorted by id then version
    async fn list(&self, ecosystem: DependencyEcosystem) -> Result<Vec<TrustedDependency>>;

    /// Evicts every cached lookup carrying `tag`
    ///
    /// # Returns
    /// The number of evicted entries
    fn clear_cache(&self, tag: &str) -> Result<usize>;
}
