use chrono::{DateTime, Utc};

/// Clock port so expiry and calendar logic can be tested deterministically
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
