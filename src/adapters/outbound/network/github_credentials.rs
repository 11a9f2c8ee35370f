use crate::adapters::outbound::cache::{CacheEntryOptions, MemoryCache, TAG_ALL, TAG_GITHUB};
use crate::ports::outbound::{Clock, CredentialProvider, HttpClient, HttpRequest};
use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_evaluation::domain::{Credentials, Principal};
use async_trait::async_trait;
use chrono::Duration;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How long a minted App JWT is valid for
pub const TOKEN_LIFETIME_MINUTES: i64 = 10;

/// Allowance for clock drift between this host and GitHub
pub const CLOCK_SKEW_MINUTES: i64 = 1;

const APP_CREDENTIALS_KEY: &str = "app-credentials";

/// Settings for authenticating as a GitHub App
#[derive(Debug, Clone, Default)]
pub struct GitHubAppOptions {
    pub app_id: String,
    /// RSA private key in PEM format
    pub private_key: Option<String>,
    /// Static personal access token used for the `User` principal
    pub access_token: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Serialize)]
struct AppClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

#[derive(Debug, Deserialize)]
struct InstallationToken {
    token: String,
}

/// Long-lived holder of the App's private key material.
///
/// Only the PEM bytes are kept. Every signature binds a fresh
/// [`EncodingKey`], so no parsed key object outlives a single signing call.
struct KeyMaterial {
    pem: Option<Vec<u8>>,
}

impl KeyMaterial {
    fn signing_key(&self) -> Result<EncodingKey> {
        let pem = self.pem.as_deref().ok_or_else(|| TrustError::Signing {
            details: "no private key is configured".to_string(),
        })?;

        EncodingKey::from_rsa_pem(pem).map_err(|e| {
            TrustError::Signing {
                details: e.to_string(),
            }
            .into()
        })
    }
}

/// CredentialProvider adapter for a GitHub App
///
/// App JWTs and installation tokens are cached for `lifetime - skew`
/// (nine minutes) under tags `all` and `github`, so a cached credential always
/// expires before GitHub would reject it. Failures are never cached.
pub struct GitHubAppCredentialProvider {
    options: GitHubAppOptions,
    key_material: KeyMaterial,
    http: Arc<dyn HttpClient>,
    cache: Arc<MemoryCache>,
    clock: Arc<dyn Clock>,
}

impl GitHubAppCredentialProvider {
    pub fn new(
        options: GitHubAppOptions,
        http: Arc<dyn HttpClient>,
        cache: Arc<MemoryCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let key_material = KeyMaterial {
            pem: options.private_key.as_ref().map(|k| k.as_bytes().to_vec()),
        };

        Self {
            options,
            key_material,
            http,
            cache,
            clock,
        }
    }

    fn cache_options() -> CacheEntryOptions {
        CacheEntryOptions::new(
            Duration::minutes(TOKEN_LIFETIME_MINUTES) - Duration::minutes(CLOCK_SKEW_MINUTES),
        )
        .with_tags([TAG_ALL, TAG_GITHUB])
    }

    /// Signs a new App JWT valid from `now - skew` until `now + lifetime`
    fn create_app_token(&self) -> Result<String> {
        let now = self.clock.now();
        let claims = AppClaims {
            iat: (now - Duration::minutes(CLOCK_SKEW_MINUTES)).timestamp(),
            exp: (now + Duration::minutes(TOKEN_LIFETIME_MINUTES)).timestamp(),
            iss: self.options.app_id.clone(),
        };

        let key = self.key_material.signing_key()?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
            TrustError::Signing {
                details: e.to_string(),
            }
            .into()
        })
    }

    async fn app_credentials(&self) -> Result<Credentials> {
        self.cache
            .get_or_create(APP_CREDENTIALS_KEY, &Self::cache_options(), || async {
                self.create_app_token().map(Credentials::bearer)
            })
            .await
    }

    async fn create_installation_token(&self, installation_id: u64) -> Result<Credentials> {
        let app = self.app_credentials().await?;
        let url = format!(
            "{}/app/installations/{}/access_tokens",
            self.options.api_url.trim_end_matches('/'),
            installation_id
        );

        let mut request = HttpRequest::post(&url, serde_json::json!({}))
            .with_header("Accept", "application/vnd.github+json")
            .with_header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(header) = app.authorization_header() {
            request = request.with_header("Authorization", header);
        }

        let response = self.http.send(request).await?.error_for_status(&url)?;
        let token: InstallationToken = response.json()?;

        Ok(Credentials::oauth(token.token))
    }
}

#[async_trait]
impl CredentialProvider for GitHubAppCredentialProvider {
    async fn get_credentials(&self, principal: Principal) -> Result<Credentials> {
        match principal {
            Principal::App => self.app_credentials().await,
            Principal::Installation(installation_id) => {
                let key = format!("installation-credentials:{}", installation_id);
                self.cache
                    .get_or_create(&key, &Self::cache_options(), || {
                        self.create_installation_token(installation_id)
                    })
                    .await
            }
            Principal::User => Ok(match self.options.access_token.as_deref() {
                Some(token) if !token.trim().is_empty() => Credentials::oauth(token),
                _ => Credentials::anonymous(),
            }),
        }
    }
}
