use crate::shared::Result;
use crate::trust_evaluation::domain::{PackageReference, RepositoryId, TrustReport, TrustVerdict};
use async_trait::async_trait;

/// TrustEvaluationPort - Inbound port deciding whether dependencies are trusted
///
/// Callers hand over normalized package references extracted from an
/// update, together with the repository the update targets.
#[async_trait]
pub trait TrustEvaluationPort: Send + Sync {
    /// Evaluates a single dependency version
    ///
    /// # Errors
    /// Returns an error when the trust store or the registry fails. A
    /// dependency whose owner cannot be established is an untrusted verdict,
    /// not an error.
    async fn evaluate(
        &self,
        repository: &RepositoryId,
        reference: &PackageReference,
    ) -> Result<TrustVerdict>;

    /// Evaluates several dependencies concurrently
    ///
    /// # Returns
    /// One verdict per reference, in input order
    async fn evaluate_all(
        &self,
        repository: &RepositoryId,
        references: &[PackageReference],
    ) -> Result<TrustReport>;
}
