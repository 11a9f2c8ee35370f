use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// A calendar entry as returned by the calendar source
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    /// Set only for all-day events
    pub start_date: Option<NaiveDate>,
    /// Set only for all-day events
    pub end_date: Option<NaiveDate>,
    /// `"transparent"` when the event does not block time
    pub transparency: Option<String>,
}

impl CalendarEvent {
    /// An all-day event that marks the calendar owner as busy
    pub fn is_all_day_busy(&self) -> bool {
        self.start_date.is_some()
            && self.end_date.is_some()
            && self.transparency.as_deref() != Some("transparent")
    }
}

/// CalendarRepository port for listing events in a time range
#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// Lists events overlapping `[time_min, time_max)`
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>>;
}
