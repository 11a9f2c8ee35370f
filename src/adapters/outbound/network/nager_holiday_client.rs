use crate::adapters::outbound::cache::{CacheEntryOptions, MemoryCache, TAG_ALL};
use crate::ports::outbound::{HolidayRepository, HttpClient, HttpRequest};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_NAGER_DATE_URL: &str = "https://date.nager.at";

const TAG_HOLIDAYS: &str = "holidays";

#[derive(Debug, Clone, Deserialize)]
struct PublicHoliday {
    date: NaiveDate,
    #[serde(default)]
    global: bool,
    #[serde(default)]
    counties: Option<Vec<String>>,
}

impl PublicHoliday {
    fn applies_to(&self, region: &str) -> bool {
        self.global
            || self
                .counties
                .iter()
                .flatten()
                .any(|county| county.eq_ignore_ascii_case(region))
    }
}

/// HolidayRepository adapter for the Nager.Date public holiday API
///
/// A region is an ISO 3166-1 country code optionally followed by a
/// subdivision (`GB-ENG`). Nationwide holidays apply to every region of the
/// country; regional ones only to the subdivisions they list.
pub struct NagerHolidayClient {
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    base_url: String,
}

impl NagerHolidayClient {
    pub fn new(http: Arc<dyn HttpClient>, cache: Arc<MemoryCache>, base_url: &str) -> Self {
        Self {
            http,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_year(&self, year: i32, country: &str) -> Result<Vec<PublicHoliday>> {
        let url = format!(
            "{}/api/v3/PublicHolidays/{}/{}",
            self.base_url,
            year,
            urlencoding::encode(country)
        );

        let response = self.http.send(HttpRequest::get(&url)).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }
        response.error_for_status(&url)?.json()
    }
}

#[async_trait]
impl HolidayRepository for NagerHolidayClient {
    async fn is_public_holiday(&self, region: &str, date: NaiveDate) -> Result<bool> {
        let region = region.trim();
        validate_url_component(region, "Holiday region")?;
        let country = region
            .split_once('-')
            .map_or(region, |(country, _)| country)
            .to_ascii_uppercase();

        let key = format!("holidays:{}:{}", country, date.year());
        let options = CacheEntryOptions::new(Duration::hours(24)).with_tags([TAG_ALL, TAG_HOLIDAYS]);
        let holidays = self
            .cache
            .get_or_create(&key, &options, || self.fetch_year(date.year(), &country))
            .await?;

        Ok(holidays
            .iter()
            .any(|holiday| holiday.date == date && holiday.applies_to(region)))
    }
}
