use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::{HttpClient, HttpRequest, PackageRegistry};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_RUBYGEMS_URL: &str = "https://rubygems.org";

#[derive(Debug, Deserialize)]
struct GemOwner {
    #[serde(default)]
    id: u64,
    #[serde(default)]
    handle: Option<String>,
}

/// PackageRegistry adapter for RubyGems.org
///
/// Owners are per gem rather than per version.
pub struct RubyGemsPackageRegistry {
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    base_url: String,
}

impl RubyGemsPackageRegistry {
    pub fn new(http: Arc<dyn HttpClient>, cache: Arc<MemoryCache>, base_url: &str) -> Self {
        Self {
            http,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_owners(&self, id: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/api/v1/gems/{}/owners.json",
            self.base_url,
            urlencoding::encode(id)
        );

        let response = self.http.send(HttpRequest::get(&url)).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }

        let owners: Vec<GemOwner> = response.error_for_status(&url)?.json()?;
        Ok(Self::normalize_owners(owners))
    }

    /// Orders owners by account id and drops blank or case-insensitively
    /// duplicated handles
    fn normalize_owners(mut owners: Vec<GemOwner>) -> Vec<String> {
        owners.sort_by_key(|owner| owner.id);

        let mut seen = HashSet::new();
        owners
            .into_iter()
            .filter_map(|owner| owner.handle)
            .map(|handle| handle.trim().to_string())
            .filter(|handle| !handle.is_empty())
            .filter(|handle| seen.insert(handle.to_lowercase()))
            .collect()
    }
}

#[async_trait]
impl PackageRegistry for RubyGemsPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::Ruby
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        _version: &str,
    ) -> Result<Vec<String>> {
        validate_url_component(id, "Gem name")?;
        let key = format!("ruby:{}", id);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.fetch_owners(id)
            })
            .await
    }
}
