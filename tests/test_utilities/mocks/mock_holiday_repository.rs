use async_trait::async_trait;
use chrono::NaiveDate;
use dependabot_trust::prelude::*;
use std::collections::HashSet;

/// Mock HolidayRepository backed by a set of (region, date) pairs
#[derive(Default)]
pub struct MockHolidayRepository {
    holidays: HashSet<(String, NaiveDate)>,
}

impl MockHolidayRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holiday(mut self, region: &str, date: NaiveDate) -> Self {
        self.holidays.insert((region.to_string(), date));
        self
    }
}

#[async_trait]
impl HolidayRepository for MockHolidayRepository {
    async fn is_public_holiday(&self, region: &str, date: NaiveDate) -> Result<bool> {
        Ok(self.holidays.contains(&(region.to_string(), date)))
    }
}
