use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::{HttpClient, HttpRequest, PackageRegistry};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Host of the Microsoft Artifact Registry
pub const MICROSOFT_ARTIFACT_REGISTRY_HOST: &str = "mcr.microsoft.com";

pub const DEFAULT_MAR_URL: &str = "https://mcr.microsoft.com";

const MICROSOFT_PUBLISHER: &str = "Microsoft";

#[derive(Debug, Deserialize)]
struct CatalogDetails {
    #[serde(default)]
    publisher: Option<String>,
}

/// PackageRegistry adapter for Docker/OCI images
///
/// Images on the Microsoft Artifact Registry are owned by `Microsoft` when
/// its catalog says so. Any other image is owned by the first namespace
/// segment of its reference (`owner/image`), without a network call.
pub struct DockerPackageRegistry {
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    mar_url: String,
}

impl DockerPackageRegistry {
    pub fn new(http: Arc<dyn HttpClient>, cache: Arc<MemoryCache>, mar_url: &str) -> Self {
        Self {
            http,
            cache,
            mar_url: mar_url.trim_end_matches('/').to_string(),
        }
    }

    /// Whether the first segment of an image reference names a registry host
    fn is_registry_host(segment: &str) -> bool {
        segment.contains('.') || segment.contains(':') || segment == "localhost"
    }

    /// Removes any `:tag` or `@digest` suffix from the final path segment
    fn strip_tag(image: &str) -> &str {
        let image = image.split_once('@').map_or(image, |(name, _)| name);
        match image.rfind(':') {
            Some(colon) if !image[colon..].contains('/') => &image[..colon],
            _ => image,
        }
    }

    fn namespace_owner(image: &str) -> Vec<String> {
        let segments: Vec<&str> = image.split('/').filter(|s| !s.is_empty()).collect();
        let path = match segments.first() {
            Some(first) if segments.len() > 1 && Self::is_registry_host(first) => &segments[1..],
            _ => &segments[..],
        };

        if path.len() >= 2 {
            vec![path[0].to_string()]
        } else {
            Vec::new()
        }
    }

    async fn fetch_microsoft_owner(&self, repository: &str) -> Result<Vec<String>> {
        let encoded: Vec<String> = repository
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        let url = format!(
            "{}/api/v1/catalog/{}/details",
            self.mar_url,
            encoded.join("/")
        );

        let response = self.http.send(HttpRequest::get(&url)).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }

        let details: CatalogDetails = response.error_for_status(&url)?.json()?;
        if details.publisher.as_deref() == Some(MICROSOFT_PUBLISHER) {
            Ok(vec![MICROSOFT_PUBLISHER.to_string()])
        } else {
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl PackageRegistry for DockerPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::Docker
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        _version: &str,
    ) -> Result<Vec<String>> {
        let image = Self::strip_tag(id.trim());

        let Some(repository) = image
            .strip_prefix(MICROSOFT_ARTIFACT_REGISTRY_HOST)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(Self::namespace_owner(image));
        };

        for segment in repository.split('/') {
            validate_url_component(segment, "Image path")?;
        }

        let key = format!("docker-mar:{}", repository);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.fetch_microsoft_owner(repository)
            })
            .await
    }
}
