use super::DeploymentRule;
use crate::ports::outbound::{Clock, HolidayRepository};
use crate::shared::Result;
use crate::trust_evaluation::domain::{WebhookEvent, WebhookEventKind};
use async_trait::async_trait;
use std::sync::Arc;

/// Denies on a public holiday in the configured region
///
/// Deployment protection rule requests are always approved: they are raised
/// by an explicit human deployment, not by automation.
pub struct PublicHolidayRule {
    holidays: Arc<dyn HolidayRepository>,
    clock: Arc<dyn Clock>,
    region: Option<String>,
    enabled: bool,
}

impl PublicHolidayRule {
    pub fn new(
        holidays: Arc<dyn HolidayRepository>,
        clock: Arc<dyn Clock>,
        region: Option<String>,
        enabled: bool,
    ) -> Self {
        Self {
            holidays,
            clock,
            region: region.filter(|r| !r.trim().is_empty()),
            enabled,
        }
    }
}

#[async_trait]
impl DeploymentRule for PublicHolidayRule {
    fn name(&self) -> &str {
        "PublicHolidayRule"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn evaluate(&self, event: &WebhookEvent) -> Result<bool> {
        if event.kind == WebhookEventKind::DeploymentProtectionRuleRequested {
            return Ok(true);
        }

        let Some(region) = self.region.as_deref() else {
            return Ok(true);
        };

        let today = self.clock.now().date_naive();
        Ok(!self.holidays.is_public_holiday(region, today).await?)
    }
}
