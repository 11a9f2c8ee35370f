use crate::application::dto::DeploymentSettings;
use crate::ports::inbound::DeploymentApprovalPort;
use crate::ports::outbound::{CalendarRepository, Clock, HolidayRepository, ProgressReporter};
use crate::shared::Result;
use crate::trust_evaluation::domain::{RuleVerdict, WebhookEvent};
use crate::trust_evaluation::policies::{
    CalendarRule, ConfigurationRule, DeploymentRule, PublicHolidayRule,
};
use crate::trust_evaluation::services::DeploymentRuleChain;
use async_trait::async_trait;
use std::sync::Arc;

/// EvaluateDeploymentUseCase - approves or denies a deployment event
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct EvaluateDeploymentUseCase<PR> {
    chain: DeploymentRuleChain,
    progress_reporter: PR,
}

impl<PR: ProgressReporter> EvaluateDeploymentUseCase<PR> {
    pub fn new(chain: DeploymentRuleChain, progress_reporter: PR) -> Self {
        Self {
            chain,
            progress_reporter,
        }
    }

    /// Builds the standard chain: the `deploy` switch, then the team
    /// calendar, then public holidays
    pub fn from_settings(
        settings: &DeploymentSettings,
        calendar: Arc<dyn CalendarRepository>,
        holidays: Arc<dyn HolidayRepository>,
        clock: Arc<dyn Clock>,
        progress_reporter: PR,
    ) -> Self {
        let rules: Vec<Arc<dyn DeploymentRule>> = vec![
            Arc::new(ConfigurationRule::new("deploy", settings.deploy)),
            Arc::new(CalendarRule::new(
                calendar,
                Arc::clone(&clock),
                settings.calendar_id.clone(),
                settings.calendar_enabled,
            )),
            Arc::new(PublicHolidayRule::new(
                holidays,
                clock,
                settings.holiday_region.clone(),
                settings.holidays_enabled,
            )),
        ];
        Self::new(DeploymentRuleChain::new(rules), progress_reporter)
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.chain.rule_names()
    }
}

#[async_trait]
impl<PR: ProgressReporter> DeploymentApprovalPort for EvaluateDeploymentUseCase<PR> {
    async fn evaluate_deployment(&self, event: &WebhookEvent) -> Result<RuleVerdict> {
        self.progress_reporter
            .report(&format!("🚦 Evaluating {} event", event.kind));

        let verdict = self.chain.evaluate(event).await?;

        match verdict.denied_rule_name() {
            Some(rule) => self
                .progress_reporter
                .report_completion(&format!("⛔ Deployment denied by {}", rule)),
            None => self
                .progress_reporter
                .report_completion("✅ Deployment approved"),
        }

        Ok(verdict)
    }
}
