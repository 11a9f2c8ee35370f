use crate::adapters::outbound::cache::MemoryCache;
use crate::ports::inbound::TrustManagementPort;
use crate::ports::outbound::{ProgressReporter, TrustStore};
use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, PackageReference, TrustedDependency};
use async_trait::async_trait;
use std::sync::Arc;

/// ManageTrustUseCase - operator-facing trust store and cache administration
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct ManageTrustUseCase<PR> {
    trust_store: Arc<dyn TrustStore>,
    cache: Arc<MemoryCache>,
    progress_reporter: PR,
}

impl<PR: ProgressReporter> ManageTrustUseCase<PR> {
    pub fn new(
        trust_store: Arc<dyn TrustStore>,
        cache: Arc<MemoryCache>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            trust_store,
            cache,
            progress_reporter,
        }
    }
}

#[async_trait]
impl<PR: ProgressReporter> TrustManagementPort for ManageTrustUseCase<PR> {
    async fn trust(&self, reference: &PackageReference) -> Result<()> {
        self.trust_store
            .trust(reference.ecosystem(), reference.id(), reference.version())
            .await?;
        self.progress_reporter
            .report(&format!("🔒 Trusted {}", reference));
        Ok(())
    }

    async fn distrust(&self, reference: &PackageReference) -> Result<()> {
        self.trust_store
            .distrust(reference.ecosystem(), reference.id(), reference.version())
            .await?;
        self.progress_reporter
            .report(&format!("🔓 Distrusted {}", reference));
        Ok(())
    }

    async fn is_trusted(&self, reference: &PackageReference) -> Result<bool> {
        self.trust_store
            .is_trusted(reference.ecosystem(), reference.id(), reference.version())
            .await
    }

    async fn list(&self, ecosystem: DependencyEcosystem) -> Result<Vec<TrustedDependency>> {
        let mut trusted = self.trust_store.get_trust(ecosystem).await?;
        trusted.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.version.cmp(&b.version)));
        Ok(trusted)
    }

    fn clear_cache(&self, tag: &str) -> Result<usize> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(TrustError::Validation {
                message: "Cache tag must not be empty".to_string(),
            }
            .into());
        }

        let removed = self.cache.remove_by_tag(tag);
        self.progress_reporter.report(&format!(
            "🧹 Removed {} cached entr{} tagged '{}'",
            removed,
            if removed == 1 { "y" } else { "ies" },
            tag
        ));
        Ok(removed)
    }
}
