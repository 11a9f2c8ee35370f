/// Mock implementations for testing
mod mock_calendar_repository;
mod mock_holiday_repository;
mod mock_package_registry;
mod mock_progress_reporter;

pub use mock_calendar_repository::MockCalendarRepository;
pub use mock_holiday_repository::MockHolidayRepository;
pub use mock_package_registry::MockPackageRegistry;
pub use mock_progress_reporter::MockProgressReporter;
