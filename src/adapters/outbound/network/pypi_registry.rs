use super::github_api::github_path_segments;
use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::{HttpClient, HttpRequest, PackageRegistry};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_PYPI_URL: &str = "https://pypi.org";

/// Project URL label naming the source repository
const GITHUB_REPOSITORY_LABEL: &str = "GitHub: repo";

/// Publisher kind of attestations produced by GitHub Actions trusted publishing
const GITHUB_PUBLISHER_KIND: &str = "GitHub";

#[derive(Debug, Clone, Deserialize)]
struct PyPiRelease {
    info: PyPiInfo,
    #[serde(default)]
    urls: Vec<PyPiFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct PyPiInfo {
    name: String,
    version: String,
    #[serde(default)]
    maintainer: Option<String>,
    #[serde(default)]
    project_urls: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct PyPiFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct Provenance {
    #[serde(default)]
    attestation_bundles: Vec<AttestationBundle>,
}

#[derive(Debug, Deserialize)]
struct AttestationBundle {
    publisher: Publisher,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    kind: String,
    #[serde(default)]
    repository: Option<String>,
}

/// PackageRegistry adapter for the Python Package Index
///
/// Ownership comes from the release JSON API (`info.maintainer`). Attestation
/// comes from the integrity API: every provenance bundle of every release file
/// must have been published by GitHub from the repository named by the
/// project's `GitHub: repo` URL.
pub struct PyPiPackageRegistry {
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    base_url: String,
}

impl PyPiPackageRegistry {
    pub fn new(http: Arc<dyn HttpClient>, cache: Arc<MemoryCache>, base_url: &str) -> Self {
        Self {
            http,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// PEP 503 name normalization
    fn normalize(name: &str) -> String {
        let mut normalized = String::with_capacity(name.len());
        let mut previous_separator = false;
        for c in name.chars() {
            if matches!(c, '-' | '_' | '.') {
                if !previous_separator {
                    normalized.push('-');
                }
                previous_separator = true;
            } else {
                normalized.push(c.to_ascii_lowercase());
                previous_separator = false;
            }
        }
        normalized
    }

    async fn release(&self, id: &str, version: &str) -> Result<Option<PyPiRelease>> {
        validate_url_component(id, "Package name")?;
        validate_url_component(version, "Version")?;

        let key = format!("pip-release:{}@{}", id, version);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.fetch_release(id, version)
            })
            .await
    }

    async fn fetch_release(&self, id: &str, version: &str) -> Result<Option<PyPiRelease>> {
        let url = format!(
            "{}/pypi/{}/{}/json",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(version)
        );

        let response = self.http.send(HttpRequest::get(&url)).await?;
        if response.is_not_found() {
            return Ok(None);
        }

        let release: PyPiRelease = response.error_for_status(&url)?.json()?;

        if Self::normalize(&release.info.name) != Self::normalize(id)
            || release.info.version != version
        {
            return Ok(None);
        }

        Ok(Some(release))
    }

    async fn fetch_bundles(
        &self,
        id: &str,
        version: &str,
        filename: &str,
    ) -> Result<Vec<AttestationBundle>> {
        let url = format!(
            "{}/integrity/{}/{}/{}/provenance",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(version),
            urlencoding::encode(filename)
        );

        let request =
            HttpRequest::get(&url).with_header("Accept", "application/vnd.pypi.integrity.v1+json");
        let response = self.http.send(request).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }

        let provenance: Provenance = response.error_for_status(&url)?.json()?;
        Ok(provenance.attestation_bundles)
    }

    async fn verify_attestation(&self, id: &str, version: &str) -> Result<Option<bool>> {
        let Some(release) = self.release(id, version).await? else {
            return Ok(None);
        };

        let lookups = release
            .urls
            .iter()
            .map(|file| self.fetch_bundles(id, version, &file.filename));
        let bundles: Vec<AttestationBundle> = futures::future::try_join_all(lookups)
            .await?
            .into_iter()
            .flatten()
            .collect();

        if bundles.is_empty() {
            return Ok(None);
        }

        let expected = release
            .info
            .project_urls
            .as_ref()
            .and_then(|urls| {
                urls.iter()
                    .find(|(label, _)| label.eq_ignore_ascii_case(GITHUB_REPOSITORY_LABEL))
                    .map(|(_, url)| url)
            })
            .and_then(|url| github_path_segments(url))
            .filter(|segments| segments.len() >= 2)
            .map(|segments| format!("{}/{}", segments[0], segments[1]));

        let Some(expected) = expected else {
            return Ok(Some(false));
        };

        Ok(Some(bundles.iter().all(|bundle| {
            bundle.publisher.kind == GITHUB_PUBLISHER_KIND
                && bundle
                    .publisher
                    .repository
                    .as_deref()
                    .is_some_and(|repository| repository.eq_ignore_ascii_case(&expected))
        })))
    }
}

#[async_trait]
impl PackageRegistry for PyPiPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::Pip
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .release(id, version)
            .await?
            .and_then(|release| release.info.maintainer)
            .map(|maintainer| maintainer.trim().to_string())
            .filter(|maintainer| !maintainer.is_empty())
            .into_iter()
            .collect())
    }

    async fn get_package_attestation(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Option<bool>> {
        let key = format!("pip-attestation:{}@{}", id, version);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.verify_attestation(id, version)
            })
            .await
    }
}
