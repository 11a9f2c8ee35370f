use crate::shared::Result;
use crate::trust_evaluation::domain::WebhookEvent;
use async_trait::async_trait;

/// A single predicate gating a deployment or merge approval
///
/// Rules return `true` when their precondition is absent (nothing
/// configured, not applicable); only a positive reason to block returns
/// `false`. Errors are reserved for failures of the underlying source.
#[async_trait]
pub trait DeploymentRule: Send + Sync {
    /// Name reported when this rule denies an event
    fn name(&self) -> &str;

    /// Disabled rules are skipped by the chain
    fn is_enabled(&self) -> bool;

    async fn evaluate(&self, event: &WebhookEvent) -> Result<bool>;
}
