use super::DeploymentRule;
use crate::ports::outbound::{CalendarRepository, Clock};
use crate::shared::Result;
use crate::trust_evaluation::domain::WebhookEvent;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

/// Denies while the team calendar shows an all-day busy event today (UTC)
///
/// Only events with both a start and end date that are not marked
/// transparent count; timed meetings never block a deployment.
pub struct CalendarRule {
    calendar: Arc<dyn CalendarRepository>,
    clock: Arc<dyn Clock>,
    calendar_id: Option<String>,
    enabled: bool,
}

impl CalendarRule {
    pub fn new(
        calendar: Arc<dyn CalendarRepository>,
        clock: Arc<dyn Clock>,
        calendar_id: Option<String>,
        enabled: bool,
    ) -> Self {
        Self {
            calendar,
            clock,
            calendar_id: calendar_id.filter(|id| !id.trim().is_empty()),
            enabled,
        }
    }
}

#[async_trait]
impl DeploymentRule for CalendarRule {
    fn name(&self) -> &str {
        "CalendarRule"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn evaluate(&self, _event: &WebhookEvent) -> Result<bool> {
        let Some(calendar_id) = self.calendar_id.as_deref() else {
            return Ok(true);
        };

        let today = self.clock.now().date_naive();
        let time_min = Utc.from_utc_datetime(&today.and_time(chrono::NaiveTime::MIN));
        let time_max = time_min + Duration::days(1);

        let events = self
            .calendar
            .list_events(calendar_id, time_min, time_max)
            .await?;

        Ok(!events.iter().any(|event| event.is_all_day_busy()))
    }
}
