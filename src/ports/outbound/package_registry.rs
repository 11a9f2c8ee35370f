use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;

/// PackageRegistry port resolving who published a dependency version
///
/// There is one implementation per [`DependencyEcosystem`]. A registry that
/// cannot establish an owner returns an empty list; it never guesses.
///
/// # Errors
/// Transient failures (timeouts, 5xx) are returned to the caller. A remote
/// "not found" is not an error.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// The ecosystem this registry handles
    fn ecosystem(&self) -> DependencyEcosystem;

    /// Returns the publishing owner(s) of `id` at `version`
    ///
    /// # Arguments
    /// * `repository` - Repository whose update referenced the dependency
    /// * `id` - Ecosystem-specific package identifier
    /// * `version` - Exact version being evaluated
    async fn get_package_owners(
        &self,
        repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>>;

    /// Returns whether provenance attestation proves the version was built
    /// from its source repository.
    ///
    /// `None` means no attestation data is available, which is distinct from
    /// `Some(false)` (attestation present but not matching).
    async fn get_package_attestation(
        &self,
        _repository: &RepositoryId,
        _id: &str,
        _version: &str,
    ) -> Result<Option<bool>> {
        Ok(None)
    }

    /// Whether a sole owner is corroborated as a verified publisher.
    ///
    /// Only GitHub-backed registries can corroborate owners.
    async fn is_verified_publisher(&self, _owner: &str) -> bool {
        false
    }
}
