use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, TrustedDependency};
use async_trait::async_trait;

/// TrustStore port for operator-approved dependency versions
///
/// Keys are unique per (ecosystem, id, version). Implementations must keep
/// each key atomic under concurrent upserts and deletes.
#[async_trait]
pub trait TrustStore: Send + Sync {
    /// Marks a dependency version as trusted, refreshing `trusted_at` if it
    /// already is
    async fn trust(&self, ecosystem: DependencyEcosystem, id: &str, version: &str) -> Result<()>;

    /// Removes a trust record; a no-op when absent
    async fn distrust(&self, ecosystem: DependencyEcosystem, id: &str, version: &str)
        -> Result<()>;

    async fn is_trusted(
        &self,
        ecosystem: DependencyEcosystem,
        id: &str,
        version: &str,
    ) -> Result<bool>;

    /// Returns every trusted dependency for one ecosystem, in no particular order
    async fn get_trust(&self, ecosystem: DependencyEcosystem) -> Result<Vec<TrustedDependency>>;
}
