/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the trust engine uses to reach
/// registries, GitHub, storage, calendars and the console.
pub mod calendar_repository;
pub mod clock;
pub mod credential_provider;
pub mod holiday_repository;
pub mod http_client;
pub mod package_registry;
pub mod progress_reporter;
pub mod trust_store;

pub use calendar_repository::{CalendarEvent, CalendarRepository};
pub use clock::Clock;
pub use credential_provider::CredentialProvider;
pub use holiday_repository::HolidayRepository;
pub use http_client::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use package_registry::PackageRegistry;
pub use progress_reporter::ProgressReporter;
pub use trust_store::TrustStore;
