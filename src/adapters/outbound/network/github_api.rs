use crate::adapters::outbound::cache::{CacheEntryOptions, MemoryCache, TAG_ALL, TAG_GITHUB};
use crate::ports::outbound::{CredentialProvider, HttpClient, HttpRequest, HttpResponse};
use crate::shared::Result;
use crate::trust_evaluation::domain::Principal;
use chrono::Duration;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const VERIFIED_PUBLISHER_QUERY: &str =
    "query($login: String!) { organization(login: $login) { isVerified } }";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<VerifiedData>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct VerifiedData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    #[serde(rename = "isVerified")]
    is_verified: bool,
}

/// Authenticated access to the GitHub REST and GraphQL APIs
///
/// Shared by every GitHub-backed registry. Requests authenticate as the
/// configured principal, fetching credentials on each call so cached
/// installation tokens are refreshed transparently.
pub struct GitHubApi {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialProvider>,
    principal: Principal,
    api_url: String,
    cache: Arc<MemoryCache>,
}

impl GitHubApi {
    pub fn new(
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialProvider>,
        principal: Principal,
        api_url: impl Into<String>,
        cache: Arc<MemoryCache>,
    ) -> Self {
        Self {
            http,
            credentials,
            principal,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            cache,
        }
    }

    async fn authorize(&self, request: HttpRequest) -> Result<HttpRequest> {
        let credentials = self.credentials.get_credentials(self.principal).await?;
        let mut request = request
            .with_header("Accept", "application/vnd.github+json")
            .with_header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(header) = credentials.authorization_header() {
            request = request.with_header("Authorization", header);
        }
        Ok(request)
    }

    /// GETs a REST path such as `/repos/{owner}/{repo}`; statuses are left to the caller
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        let url = format!("{}{}", self.api_url, path);
        let request = self.authorize(HttpRequest::get(url)).await?;
        self.http.send(request).await
    }

    /// Whether a REST resource exists: 2xx is true, 404 is false, anything
    /// else is an error
    pub async fn exists(&self, path: &str) -> Result<bool> {
        let response = self.get(path).await?;
        if response.is_not_found() {
            return Ok(false);
        }
        response.error_for_status(path)?;
        Ok(true)
    }

    /// Whether `login` is a verified publisher (a GitHub-verified organization).
    ///
    /// Any failure, including GraphQL errors, means "not corroborated".
    /// Successful answers are cached for an hour.
    pub async fn is_verified_publisher(&self, login: &str) -> bool {
        let key = format!("github-verified-publisher:{}", login.to_ascii_lowercase());
        let options = CacheEntryOptions::new(Duration::hours(1)).with_tags([TAG_ALL, TAG_GITHUB]);

        self.cache
            .get_or_create(&key, &options, || self.query_verified_publisher(login))
            .await
            .unwrap_or(false)
    }

    async fn query_verified_publisher(&self, login: &str) -> Result<bool> {
        let url = format!("{}/graphql", self.api_url);
        let body = serde_json::json!({
            "query": VERIFIED_PUBLISHER_QUERY,
            "variables": { "login": login },
        });

        let request = self.authorize(HttpRequest::post(&url, body)).await?;
        let response = self.http.send(request).await?.error_for_status(&url)?;
        let payload: GraphQlResponse = response.json()?;

        if !payload.errors.is_empty() {
            anyhow::bail!("GraphQL query for {} returned errors", login);
        }

        Ok(payload
            .data
            .and_then(|d| d.organization)
            .map(|o| o.is_verified)
            .unwrap_or(false))
    }
}

/// Splits a GitHub remote or web URL into its path segments.
///
/// Accepts `https://github.com/owner/repo(.git)`, `http://`, `git://`,
/// `ssh://git@github.com/owner/repo` and scp-like `git@github.com:owner/repo`.
/// Returns `None` for other hosts.
pub fn github_path_segments(url: &str) -> Option<Vec<String>> {
    let url = url.trim();
    let rest = if let Some(scp) = url.strip_prefix("git@github.com:") {
        scp
    } else {
        let without_scheme = url.split_once("://").map(|(_, rest)| rest)?;
        let without_user = without_scheme
            .split_once('@')
            .filter(|(user, _)| !user.contains('/'))
            .map(|(_, rest)| rest)
            .unwrap_or(without_scheme);
        let (host, path) = without_user.split_once('/')?;
        if !matches!(host, "github.com" | "www.github.com") {
            return None;
        }
        path
    };

    let path = rest.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.strip_suffix(".git").unwrap_or(s).to_string())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::HttpMethod;
    use crate::shared::test_support::{github_api, FixtureHttpClient};

    fn api(http: Arc<FixtureHttpClient>) -> Arc<GitHubApi> {
        github_api(http)
    }

    const GRAPHQL: &str = "https://api.github.com/graphql";

    #[test]
    fn test_github_path_segments() {
        assert_eq!(
            github_path_segments("https://github.com/pypa/sampleproject").unwrap(),
            vec!["pypa", "sampleproject"]
        );
        assert_eq!(
            github_path_segments("git@github.com:octo-org/octo-lib.git").unwrap(),
            vec!["octo-org", "octo-lib"]
        );
        assert_eq!(
            github_path_segments("ssh://git@github.com/octo-org/octo-lib.git").unwrap(),
            vec!["octo-org", "octo-lib"]
        );
        assert_eq!(
            github_path_segments("https://github.com/org/repo/tree/main?x=1").unwrap(),
            vec!["org", "repo", "tree", "main"]
        );
        assert!(github_path_segments("https://gitlab.com/org/repo").is_none());
        assert!(github_path_segments("not a url").is_none());
    }

    #[tokio::test]
    async fn test_get_sends_github_headers() {
        let http = Arc::new(
            FixtureHttpClient::new().with_json("https://api.github.com/repos/a/b", "{}"),
        );
        let api = api(http.clone());

        api.get("/repos/a/b").await.unwrap();

        let headers = &http.requests()[0].headers;
        assert!(headers.contains(&("Authorization".to_string(), "token ghs_test".to_string())));
        assert!(headers.contains(&(
            "X-GitHub-Api-Version".to_string(),
            "2022-11-28".to_string()
        )));
    }

    #[tokio::test]
    async fn test_exists() {
        let http = Arc::new(
            FixtureHttpClient::new()
                .with_json("https://api.github.com/present", "{}")
                .with_status("https://api.github.com/missing", 404)
                .with_status("https://api.github.com/broken", 500),
        );
        let api = api(http);

        assert!(api.exists("/present").await.unwrap());
        assert!(!api.exists("/missing").await.unwrap());
        assert!(api.exists("/broken").await.is_err());
    }

    #[tokio::test]
    async fn test_verified_publisher() {
        let http = Arc::new(FixtureHttpClient::new().with_response(
            HttpMethod::Post,
            GRAPHQL,
            200,
            r#"{"data":{"organization":{"isVerified":true}}}"#,
        ));
        let api = api(http.clone());

        assert!(api.is_verified_publisher("actions").await);
        assert!(api.is_verified_publisher("Actions").await);
        assert_eq!(http.calls(GRAPHQL), 1);
    }

    #[tokio::test]
    async fn test_graphql_errors_are_not_corroborated() {
        let http = Arc::new(FixtureHttpClient::new().with_response(
            HttpMethod::Post,
            GRAPHQL,
            200,
            r#"{"data":{"organization":null},"errors":[{"type":"NOT_FOUND"}]}"#,
        ));
        let api = api(http.clone());

        assert!(!api.is_verified_publisher("some-user").await);
        assert!(!api.is_verified_publisher("some-user").await);
        assert_eq!(http.calls(GRAPHQL), 2);
    }

    #[tokio::test]
    async fn test_graphql_transport_failure_is_not_corroborated() {
        let api = api(Arc::new(FixtureHttpClient::new()));
        assert!(!api.is_verified_publisher("actions").await);
    }
}
