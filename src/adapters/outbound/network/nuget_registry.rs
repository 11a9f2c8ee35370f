use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::{HttpClient, HttpRequest, PackageRegistry};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_NUGET_URL: &str = "https://api.nuget.org";

const SEARCH_QUERY_SERVICE: &str = "SearchQueryService";

#[derive(Debug, Clone, Deserialize)]
struct ServiceIndex {
    #[serde(default)]
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
    #[serde(default)]
    versions: Vec<SearchVersion>,
    #[serde(default)]
    owners: Option<Owners>,
}

#[derive(Debug, Deserialize)]
struct SearchVersion {
    version: String,
}

/// The search service returns owners either as an array or a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Owners {
    Many(Vec<String>),
    One(String),
}

impl Owners {
    fn into_vec(self) -> Vec<String> {
        let owners = match self {
            Owners::Many(owners) => owners,
            Owners::One(owner) => vec![owner],
        };
        owners
            .into_iter()
            .filter(|owner| !owner.trim().is_empty())
            .collect()
    }
}

/// PackageRegistry adapter for NuGet.org
///
/// Discovers the search query service from the V3 service index, then
/// searches by exact package id and reads the owners of the hit that lists
/// the requested version.
pub struct NuGetPackageRegistry {
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    base_url: String,
}

impl NuGetPackageRegistry {
    pub fn new(http: Arc<dyn HttpClient>, cache: Arc<MemoryCache>, base_url: &str) -> Self {
        Self {
            http,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn search_base_url(&self) -> Result<Option<String>> {
        let index = self
            .cache
            .get_or_create(
                "nuget-service-index",
                &registry_entry_options(self.ecosystem()),
                || self.fetch_service_index(),
            )
            .await?;

        Ok(index
            .resources
            .into_iter()
            .find(|r| r.resource_type.starts_with(SEARCH_QUERY_SERVICE))
            .map(|r| r.id))
    }

    async fn fetch_service_index(&self) -> Result<ServiceIndex> {
        let url = format!("{}/v3/index.json", self.base_url);
        let response = self
            .http
            .send(HttpRequest::get(&url))
            .await?
            .error_for_status(&url)?;
        response.json()
    }

    async fn fetch_owners(&self, id: &str, version: &str) -> Result<Vec<String>> {
        let Some(search_url) = self.search_base_url().await? else {
            return Ok(Vec::new());
        };

        let url = format!(
            "{}?q=packageid:{}&prerelease=true&semVerLevel=2.0.0",
            search_url,
            urlencoding::encode(id)
        );

        let response = self.http.send(HttpRequest::get(&url)).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }

        let search: SearchResponse = response.error_for_status(&url)?.json()?;

        let candidates: Vec<SearchHit> = search
            .data
            .into_iter()
            .filter(|hit| hit.id.eq_ignore_ascii_case(id))
            .collect();

        Ok(Self::select_hit(candidates, version)
            .and_then(|hit| hit.owners)
            .map(Owners::into_vec)
            .unwrap_or_default())
    }

    /// Picks the hit listing `version`: an exact match first, otherwise the
    /// single hit matching once `+build` metadata is stripped. Several
    /// stripped matches are ambiguous and select nothing.
    fn select_hit(candidates: Vec<SearchHit>, version: &str) -> Option<SearchHit> {
        if let Some(index) = candidates
            .iter()
            .position(|hit| Self::count_listed(hit, |v| v == version) > 0)
        {
            return candidates.into_iter().nth(index);
        }

        let stripped = Self::strip_build_metadata(version);
        let same_release = |v: &str| Self::strip_build_metadata(v) == stripped;

        let total: usize = candidates
            .iter()
            .map(|hit| Self::count_listed(hit, same_release))
            .sum();
        if total != 1 {
            return None;
        }

        candidates
            .into_iter()
            .find(|hit| Self::count_listed(hit, same_release) == 1)
    }

    fn count_listed(hit: &SearchHit, matches: impl Fn(&str) -> bool) -> usize {
        hit.versions.iter().filter(|v| matches(&v.version)).count()
    }

    fn strip_build_metadata(version: &str) -> &str {
        version.split_once('+').map_or(version, |(release, _)| release)
    }
}

#[async_trait]
impl PackageRegistry for NuGetPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::NuGet
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        validate_url_component(id, "Package id")?;
        validate_url_component(version, "Version")?;

        let key = format!("nuget:{}@{}", id.to_ascii_lowercase(), version);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.fetch_owners(id, version)
            })
            .await
    }
}
