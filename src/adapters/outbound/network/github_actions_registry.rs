use super::github_api::GitHubApi;
use crate::adapters::outbound::cache::{registry_entry_options, MemoryCache};
use crate::ports::outbound::PackageRegistry;
use crate::shared::security::{split_slug, validate_url_component};
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, RepositoryId};
use async_trait::async_trait;
use std::sync::Arc;

/// PackageRegistry adapter for GitHub Actions (`owner/repo[/path]`)
///
/// The action's owner is trusted when `version` resolves to a tag of the
/// action repository, trying both the `v`-prefixed and bare spelling. A
/// version that looks like a commit SHA is also checked as a commit.
pub struct GitHubActionsPackageRegistry {
    github: Arc<GitHubApi>,
    cache: Arc<MemoryCache>,
}

impl GitHubActionsPackageRegistry {
    pub fn new(github: Arc<GitHubApi>, cache: Arc<MemoryCache>) -> Self {
        Self { github, cache }
    }

    /// Tag spellings to probe for `version`, most likely first
    fn candidate_tags(version: &str) -> Vec<String> {
        match version.strip_prefix('v') {
            Some(bare) if !bare.is_empty() => vec![version.to_string(), bare.to_string()],
            _ => vec![format!("v{}", version), version.to_string()],
        }
    }

    fn looks_like_commit(version: &str) -> bool {
        (7..=40).contains(&version.len()) && version.chars().all(|c| c.is_ascii_hexdigit())
    }

    async fn version_exists(&self, owner: &str, repo: &str, version: &str) -> Result<bool> {
        let owner = urlencoding::encode(owner);
        let repo = urlencoding::encode(repo);

        for tag in Self::candidate_tags(version) {
            let path = format!(
                "/repos/{}/{}/git/ref/tags/{}",
                owner,
                repo,
                urlencoding::encode(&tag)
            );
            if self.github.exists(&path).await? {
                return Ok(true);
            }
        }

        if Self::looks_like_commit(version) {
            let path = format!("/repos/{}/{}/commits/{}", owner, repo, version);
            return self.github.exists(&path).await;
        }

        Ok(false)
    }
}

#[async_trait]
impl PackageRegistry for GitHubActionsPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        DependencyEcosystem::GitHubActions
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        let Some((owner, repo)) = split_slug(id) else {
            return Ok(Vec::new());
        };
        validate_url_component(version, "Version")?;

        let key = format!("github-actions:{}/{}@{}", owner, repo, version);
        let exists = self
            .cache
            .get_or_create(&key, &registry_entry_options(self.ecosystem()), || {
                self.version_exists(owner, repo, version)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::HttpMethod;
    use crate::shared::test_support::{fixed_clock, github_api, FixtureHttpClient};

    const API: &str = "https://api.github.com";

    fn registry(http: Arc<FixtureHttpClient>) -> GitHubActionsPackageRegistry {
        GitHubActionsPackageRegistry::new(
            github_api(http),
            Arc::new(MemoryCache::new(fixed_clock())),
        )
    }

    async fn owners(registry: &GitHubActionsPackageRegistry, id: &str, version: &str) -> Vec<String> {
        registry
            .get_package_owners(&RepositoryId::new("octo", "app"), id, version)
            .await
            .unwrap()
    }

    #[test]
    fn test_candidate_tags() {
        assert_eq!(
            GitHubActionsPackageRegistry::candidate_tags("3"),
            vec!["v3", "3"]
        );
        assert_eq!(
            GitHubActionsPackageRegistry::candidate_tags("v4.1.0"),
            vec!["v4.1.0", "4.1.0"]
        );
    }

    #[tokio::test]
    async fn test_tag_exists() {
        let url = format!("{}/repos/actions/checkout/git/ref/tags/v3", API);
        let http = Arc::new(FixtureHttpClient::new().with_json(&url, r#"{"ref":"refs/tags/v3"}"#));
        let registry = registry(http.clone());

        assert_eq!(owners(&registry, "actions/checkout", "v3").await, vec!["actions"]);
        assert_eq!(owners(&registry, "actions/checkout", "v3").await, vec!["actions"]);
        assert_eq!(http.calls(&url), 1);
    }

    #[tokio::test]
    async fn test_bare_tag_fallback() {
        let http = Arc::new(
            FixtureHttpClient::new()
                .with_status(&format!("{}/repos/octo-org/deploy/git/ref/tags/v1.2", API), 404)
                .with_json(
                    &format!("{}/repos/octo-org/deploy/git/ref/tags/1.2", API),
                    r#"{"ref":"refs/tags/1.2"}"#,
                ),
        );

        assert_eq!(
            owners(&registry(http), "octo-org/deploy/sub/path", "1.2").await,
            vec!["octo-org"]
        );
    }

    #[tokio::test]
    async fn test_commit_fallback() {
        let sha = "8e5e7e5ab8b370d6c329ec480221332ada57f0ab";
        let http = Arc::new(
            FixtureHttpClient::new()
                .with_status(&format!("{}/repos/actions/cache/git/ref/tags/v{}", API, sha), 404)
                .with_status(&format!("{}/repos/actions/cache/git/ref/tags/{}", API, sha), 404)
                .with_json(
                    &format!("{}/repos/actions/cache/commits/{}", API, sha),
                    r#"{"sha":"8e5e7e5ab8b370d6c329ec480221332ada57f0ab"}"#,
                ),
        );

        assert_eq!(owners(&registry(http), "actions/cache", sha).await, vec!["actions"]);
    }

    #[tokio::test]
    async fn test_unknown_version() {
        let http = Arc::new(
            FixtureHttpClient::new()
                .with_status(&format!("{}/repos/actions/checkout/git/ref/tags/v99", API), 404)
                .with_status(&format!("{}/repos/actions/checkout/git/ref/tags/99", API), 404),
        );

        assert!(owners(&registry(http), "actions/checkout", "99").await.is_empty());
    }

    #[tokio::test]
    async fn test_id_without_owner() {
        let http = Arc::new(FixtureHttpClient::new());

        assert!(owners(&registry(http.clone()), "foo", "v1").await.is_empty());
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_not_cached() {
        let url = format!("{}/repos/actions/checkout/git/ref/tags/v3", API);
        let http = Arc::new(FixtureHttpClient::new().with_status(&url, 502));
        let registry = registry(http.clone());

        for _ in 0..2 {
            assert!(registry
                .get_package_owners(&RepositoryId::new("o", "r"), "actions/checkout", "v3")
                .await
                .is_err());
        }
        assert_eq!(http.calls(&url), 2);
    }

    #[tokio::test]
    async fn test_verified_publisher() {
        let http = Arc::new(FixtureHttpClient::new().with_response(
            HttpMethod::Post,
            "https://api.github.com/graphql",
            200,
            r#"{"data":{"organization":{"isVerified":true}}}"#,
        ));

        assert!(registry(http).is_verified_publisher("actions").await);
    }
}
