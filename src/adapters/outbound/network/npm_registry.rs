use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::{HttpClient, HttpRequest, PackageRegistry};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

#[derive(Debug, Deserialize)]
struct NpmPackageVersion {
    name: String,
    version: String,
    #[serde(rename = "_npmUser")]
    npm_user: Option<NpmUser>,
}

#[derive(Debug, Deserialize)]
struct NpmUser {
    name: Option<String>,
}

/// PackageRegistry adapter for the npm registry
///
/// The owner is the user who published the version (`_npmUser`), accepted only
/// when the returned document is for exactly the requested name and version.
pub struct NpmPackageRegistry {
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    base_url: String,
}

impl NpmPackageRegistry {
    pub fn new(http: Arc<dyn HttpClient>, cache: Arc<MemoryCache>, base_url: &str) -> Self {
        Self {
            http,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encodes a possibly scoped package name (`@scope/name`) for a URL path
    fn encode_name(id: &str) -> Result<String> {
        match id.strip_prefix('@').and_then(|scoped| scoped.split_once('/')) {
            Some((scope, name)) => {
                validate_url_component(scope, "Package scope")?;
                validate_url_component(name, "Package name")?;
                Ok(format!(
                    "@{}%2F{}",
                    urlencoding::encode(scope),
                    urlencoding::encode(name)
                ))
            }
            None => {
                validate_url_component(id, "Package name")?;
                Ok(urlencoding::encode(id).into_owned())
            }
        }
    }

    async fn fetch_owners(&self, id: &str, version: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            Self::encode_name(id)?,
            urlencoding::encode(version)
        );

        let response = self.http.send(HttpRequest::get(&url)).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }

        let package: NpmPackageVersion = response.error_for_status(&url)?.json()?;

        // Guard against registry redirects and aliases.
        if package.name != id || package.version != version {
            return Ok(Vec::new());
        }

        Ok(package
            .npm_user
            .and_then(|user| user.name)
            .filter(|name| !name.trim().is_empty())
            .into_iter()
            .collect())
    }
}

#[async_trait]
impl PackageRegistry for NpmPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::Npm
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        validate_url_component(version, "Version")?;
        let key = format!("npm:{}@{}", id, version);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.fetch_owners(id, version)
            })
            .await
    }
}
