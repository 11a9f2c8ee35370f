use chrono::{DateTime, Utc};
use serde::Serialize;

/// A dependency version explicitly marked as trusted by an operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustedDependency {
    pub id: String,
    pub version: String,
    pub trusted_at: Option<DateTime<Utc>>,
}

impl TrustedDependency {
    pub fn new(id: String, version: String, trusted_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            version,
            trusted_at,
        }
    }
}
