use crate::shared::Result;
use crate::trust_evaluation::domain::{RuleVerdict, WebhookEvent};
use async_trait::async_trait;

/// DeploymentApprovalPort - Inbound port gating deployments and merges
#[async_trait]
pub trait DeploymentApprovalPort: Send + Sync {
    /// Runs the deployment rule chain against `event`
    ///
    /// A denied verdict always names the rule that denied it.
    async fn evaluate_deployment(&self, event: &WebhookEvent) -> Result<RuleVerdict>;
}
