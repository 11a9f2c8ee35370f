use crate::application::factories::RegistrySet;
use crate::ports::inbound::TrustEvaluationPort;
use crate::ports::outbound::{ProgressReporter, TrustStore};
use crate::shared::Result;
use crate::trust_evaluation::domain::{
    PackageReference, RepositoryId, TrustReason, TrustReport, TrustVerdict, TrustedIdentities,
};
use crate::trust_evaluation::policies::{OwnershipAssessment, TrustPolicy};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Number of dependencies evaluated at once by `evaluate_all`
pub const DEFAULT_CONCURRENCY: usize = 4;

/// EvaluateTrustUseCase - decides whether dependency versions are trusted
///
/// Combines the operator trust store, the registry for the dependency's
/// ecosystem and the static trusted identities. Verdicts depend only on
/// registry answers, never on whether those answers were cached.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct EvaluateTrustUseCase<PR> {
    registries: RegistrySet,
    trust_store: Arc<dyn TrustStore>,
    identities: TrustedIdentities,
    progress_reporter: PR,
    concurrency: usize,
}

impl<PR: ProgressReporter> EvaluateTrustUseCase<PR> {
    /// Creates a new EvaluateTrustUseCase with injected dependencies
    pub fn new(
        registries: RegistrySet,
        trust_store: Arc<dyn TrustStore>,
        identities: TrustedIdentities,
        progress_reporter: PR,
    ) -> Self {
        Self {
            registries,
            trust_store,
            identities,
            progress_reporter,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[async_trait]
impl<PR: ProgressReporter> TrustEvaluationPort for EvaluateTrustUseCase<PR> {
    async fn evaluate(
        &self,
        repository: &RepositoryId,
        reference: &PackageReference,
    ) -> Result<TrustVerdict> {
        let ecosystem = reference.ecosystem();
        let (id, version) = (reference.id(), reference.version());

        if self.trust_store.is_trusted(ecosystem, id, version).await? {
            self.progress_reporter
                .report(&format!("✅ {} is in the trust store", reference));
            return Ok(TrustVerdict::new(
                reference.clone(),
                Vec::new(),
                TrustReason::TrustStore,
            ));
        }

        let registry = self.registries.get(ecosystem);
        self.progress_reporter
            .report(&format!("🔎 Looking up {} in the {} registry", reference, ecosystem));

        let (owners, attestation) = futures::try_join!(
            registry.get_package_owners(repository, id, version),
            registry.get_package_attestation(repository, id, version),
        )?;

        let allow_listed = self.identities.is_any_trusted(ecosystem, &owners);
        let reason = match TrustPolicy::assess(attestation, &owners, allow_listed) {
            OwnershipAssessment::Decided(reason) => reason,
            OwnershipAssessment::Corroborate(owner) => {
                if registry.is_verified_publisher(&owner).await {
                    TrustReason::VerifiedPublisher
                } else {
                    TrustReason::UntrustedOwners
                }
            }
        };

        self.progress_reporter.report(&format!(
            "   {} owner(s) [{}]: {}",
            reference,
            owners.join(", "),
            reason
        ));

        Ok(TrustVerdict::new(reference.clone(), owners, reason))
    }

    async fn evaluate_all(
        &self,
        repository: &RepositoryId,
        references: &[PackageReference],
    ) -> Result<TrustReport> {
        let total = references.len();
        let lookups: Vec<_> = references
            .iter()
            .enumerate()
            .map(|(index, reference)| async move {
                self.evaluate(repository, reference)
                    .await
                    .map(|verdict| (index, verdict))
            })
            .collect();
        let mut pending = stream::iter(lookups).buffer_unordered(self.concurrency);

        let mut completed = Vec::with_capacity(total);
        while let Some(result) = pending.next().await {
            completed.push(result?);
            self.progress_reporter.report_progress(
                completed.len(),
                total,
                Some("Evaluating dependencies"),
            );
        }

        completed.sort_by_key(|(index, _)| *index);
        let report = TrustReport::new(completed.into_iter().map(|(_, v)| v).collect());

        let untrusted = report.untrusted().count();
        if untrusted == 0 {
            self.progress_reporter
                .report_completion(&format!("✅ All {} dependencies are trusted", total));
        } else {
            self.progress_reporter.report_completion(&format!(
                "⚠️  {} of {} dependencies are not trusted",
                untrusted, total
            ));
        }

        Ok(report)
    }
}
