use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dependabot_trust::prelude::*;
use std::sync::Mutex;

/// Mock CalendarRepository returning a fixed list of events
#[derive(Default)]
pub struct MockCalendarRepository {
    events: Vec<CalendarEvent>,
    pub requested_windows: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl MockCalendarRepository {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            requested_windows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CalendarRepository for MockCalendarRepository {
    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        self.requested_windows
            .lock()
            .unwrap()
            .push((time_min, time_max));
        Ok(self.events.clone())
    }
}
