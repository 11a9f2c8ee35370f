/// Network adapters for registries, GitHub, calendars and holidays
mod docker_registry;
mod github_actions_registry;
mod github_api;
mod github_credentials;
mod github_release_registry;
mod google_calendar_client;
mod nager_holiday_client;
mod npm_registry;
mod nuget_registry;
mod pypi_registry;
mod reqwest_client;
mod rubygems_registry;
mod submodule_registry;

pub use docker_registry::{DockerPackageRegistry, DEFAULT_MAR_URL};
pub use github_actions_registry::GitHubActionsPackageRegistry;
pub use github_api::{github_path_segments, GitHubApi, DEFAULT_GITHUB_API_URL};
pub use github_credentials::{GitHubAppCredentialProvider, GitHubAppOptions};
pub use github_release_registry::GitHubReleasePackageRegistry;
pub use google_calendar_client::{GoogleCalendarClient, DEFAULT_GOOGLE_CALENDAR_URL};
pub use nager_holiday_client::{NagerHolidayClient, DEFAULT_NAGER_DATE_URL};
pub use npm_registry::{NpmPackageRegistry, DEFAULT_NPM_REGISTRY_URL};
pub use nuget_registry::{NuGetPackageRegistry, DEFAULT_NUGET_URL};
pub use pypi_registry::{PyPiPackageRegistry, DEFAULT_PYPI_URL};
pub use reqwest_client::ReqwestHttpClient;
pub use rubygems_registry::{RubyGemsPackageRegistry, DEFAULT_RUBYGEMS_URL};
pub use submodule_registry::SubmodulePackageRegistry;
