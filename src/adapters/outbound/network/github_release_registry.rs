use super::github_api::GitHubApi;
use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::PackageRegistry;
use crate::shared::security::{split_slug, validate_url_component};
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use std::sync::Arc;

/// PackageRegistry adapter for dependencies pinned to GitHub releases
///
/// `id` is an `owner/name` slug; its owner is trusted only when a release
/// exists whose tag is exactly `version`.
pub struct GitHubReleasePackageRegistry {
    github: Arc<GitHubApi>,
    cache: Arc<MemoryCache>,
}

impl GitHubReleasePackageRegistry {
    pub fn new(github: Arc<GitHubApi>, cache: Arc<MemoryCache>) -> Self {
        Self { github, cache }
    }

    async fn release_exists(&self, owner: &str, name: &str, tag: &str) -> Result<bool> {
        let path = format!(
            "/repos/{}/{}/releases/tags/{}",
            urlencoding::encode(owner),
            urlencoding::encode(name),
            urlencoding::encode(tag)
        );
        self.github.exists(&path).await
    }
}

#[async_trait]
impl PackageRegistry for GitHubReleasePackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::GitHubRelease
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        let Some((owner, name)) = split_slug(id) else {
            return Ok(Vec::new());
        };
        validate_url_component(version, "Version")?;

        let key = format!("github-release:{}/{}@{}", owner, name, version);
        let exists = self
            .cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.release_exists(owner, name, version)
            })
            .await?;

        Ok(if exists {
            vec![owner.to_string()]
        } else {
            Vec::new()
        })
    }

    async fn is_verified_publisher(&self, owner: &str) -> bool {
        self.github.is_verified_publisher(owner).await
    }
}
