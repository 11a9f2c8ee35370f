use crate::ports::outbound::{CalendarEvent, CalendarRepository, HttpClient, HttpRequest};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_GOOGLE_CALENDAR_URL: &str = "https://www.googleapis.com";

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
struct EventItem {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: Option<EventTime>,
    #[serde(default)]
    end: Option<EventTime>,
    #[serde(default)]
    transparency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventTime {
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl From<EventItem> for CalendarEvent {
    fn from(item: EventItem) -> Self {
        CalendarEvent {
            summary: item.summary,
            start_date: item.start.and_then(|t| t.date),
            end_date: item.end.and_then(|t| t.date),
            transparency: item.transparency,
        }
    }
}

/// CalendarRepository adapter for the Google Calendar v3 events API
///
/// Recurring events are expanded into single instances. Only the first page
/// of results is read, which covers any realistic single day.
pub struct GoogleCalendarClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
}

impl GoogleCalendarClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn events_url(&self, calendar_id: &str, time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> String {
        format!(
            "{}/calendar/v3/calendars/{}/events?key={}&singleEvents=true&timeMin={}&timeMax={}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&time_min.to_rfc3339_opts(SecondsFormat::Secs, true)),
            urlencoding::encode(&time_max.to_rfc3339_opts(SecondsFormat::Secs, true)),
        )
    }
}

#[async_trait]
impl CalendarRepository for GoogleCalendarClient {
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let url = self.events_url(calendar_id, time_min, time_max);
        // The API key is a query parameter; keep it out of error messages
        let display_url = format!(
            "{}/calendar/v3/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        );

        let response = self.http.send(HttpRequest::get(url)).await?;
        let events: EventList = response.error_for_status(&display_url)?.json()?;

        Ok(events.items.into_iter().map(CalendarEvent::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::TrustError;
    use crate::shared::test_support::FixtureHttpClient;
    use chrono::TimeZone;

    const EVENTS_URL: &str = "https://www.googleapis.com/calendar/v3/calendars/team%40example.com/events?key=secret&singleEvents=true&timeMin=2024-06-03T00%3A00%3A00Z&timeMax=2024-06-04T00%3A00%3A00Z";

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 4, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_events() {
        let http = Arc::new(FixtureHttpClient::new().with_json(
            EVENTS_URL,
            r#"{
                "items": [
                    {"summary": "Freeze", "start": {"date": "2024-06-03"}, "end": {"date": "2024-06-04"}},
                    {"summary": "Standup", "start": {"dateTime": "2024-06-03T09:00:00Z"}, "end": {"dateTime": "2024-06-03T09:15:00Z"}},
                    {"summary": "Reminder", "start": {"date": "2024-06-03"}, "end": {"date": "2024-06-04"}, "transparency": "transparent"}
                ]
            }"#,
        ));
        let client = GoogleCalendarClient::new(http, DEFAULT_GOOGLE_CALENDAR_URL, "secret");
        let (min, max) = window();

        let events = client.list_events("team@example.com", min, max).await.unwrap();

        assert_eq!(events.len(), 3);
        assert!(events[0].is_all_day_busy());
        assert_eq!(events[0].start_date, NaiveDate::from_ymd_opt(2024, 6, 3));
        assert!(!events[1].is_all_day_busy());
        assert!(!events[2].is_all_day_busy());
    }

    #[tokio::test]
    async fn test_error_hides_api_key() {
        let http = Arc::new(FixtureHttpClient::new().with_status(EVENTS_URL, 403));
        let client = GoogleCalendarClient::new(http, DEFAULT_GOOGLE_CALENDAR_URL, "secret");
        let (min, max) = window();

        let err = client
            .list_events("team@example.com", min, max)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TrustError>(),
            Some(TrustError::Unauthorized { .. })
        ));
        assert!(!err.to_string().contains("secret"));
    }
}
