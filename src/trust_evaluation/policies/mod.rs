mod calendar_rule;
mod configuration_rule;
mod deployment_rule;
mod public_holiday_rule;
mod trust_policy;

pub use calendar_rule::CalendarRule;
pub use configuration_rule::ConfigurationRule;
pub use deployment_rule::DeploymentRule;
pub use public_holiday_rule::PublicHolidayRule;
pub use trust_policy::{OwnershipAssessment, TrustPolicy};
