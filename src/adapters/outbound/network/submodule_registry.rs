use super::github_api::{github_path_segments, GitHubApi};
use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::PackageRegistry;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Directory(Vec<serde_json::Value>),
    Entry(ContentEntry),
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    submodule_git_url: Option<String>,
}

/// PackageRegistry adapter for git submodules
///
/// `id` is the submodule path inside the updated repository. The owner is
/// everything but the last path segment of the submodule's GitHub URL, so
/// `https://github.com/octo-org/tools.git` is owned by `octo-org`.
pub struct SubmodulePackageRegistry {
    github: Arc<GitHubApi>,
    cache: Arc<MemoryCache>,
}

impl SubmodulePackageRegistry {
    pub fn new(github: Arc<GitHubApi>, cache: Arc<MemoryCache>) -> Self {
        Self { github, cache }
    }

    async fn fetch_owner(&self, repository: &RepositoryId, path: &str) -> Result<Vec<String>> {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        let api_path = format!(
            "/repos/{}/{}/contents/{}",
            urlencoding::encode(repository.owner()),
            urlencoding::encode(repository.name()),
            encoded.join("/")
        );

        let response = self.github.get(&api_path).await?;
        if response.is_not_found() {
            return Ok(Vec::new());
        }

        let entry = match response.error_for_status(&api_path)?.json()? {
            ContentsResponse::Directory(items) if items.len() == 1 => {
                serde_json::from_value(items.into_iter().next().unwrap_or_default())?
            }
            ContentsResponse::Directory(_) => return Ok(Vec::new()),
            ContentsResponse::Entry(entry) => entry,
        };

        Ok(Self::owner_of(&entry).into_iter().collect())
    }

    fn owner_of(entry: &ContentEntry) -> Option<String> {
        if entry.kind != "submodule" {
            return None;
        }
        let segments = github_path_segments(entry.submodule_git_url.as_deref()?)?;
        match segments.split_last() {
            Some((_, owner)) if !owner.is_empty() => Some(owner.join("/")),
            _ => None,
        }
    }
}

#[async_trait]
impl PackageRegistry for SubmodulePackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::Submodules
    }

    async fn get_package_owners(
        &self,
        repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        let path = id.trim_matches('/');
        if path.is_empty() || path.split('/').any(|s| s.is_empty() || s == "..") {
            return Ok(Vec::new());
        }

        let key = format!("submodule:{}:{}@{}", repository, path, version);
        self.cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.fetch_owner(repository, path)
            })
            .await
    }

    async fn is_verified_publisher(&self, owner: &str) -> bool {
        self.github.is_verified_publisher(owner).await
    }
}
