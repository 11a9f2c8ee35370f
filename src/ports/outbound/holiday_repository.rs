use crate::shared::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// HolidayRepository port answering whether a date is a public holiday
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// # Arguments
    /// * `region` - ISO 3166 country code, optionally with a subdivision
    ///   (e.g. `GB` or `GB-ENG`)
    /// * `date` - The calendar date to check
    async fn is_public_holiday(&self, region: &str, date: NaiveDate) -> Result<bool>;
}
