use crate::shared::error::TrustError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// HTTP verbs used against registry and GitHub APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An outbound HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A buffered HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Deserializes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.body.as_bytes())?)
    }

    /// Converts a non-success status into an error.
    ///
    /// 401 and 403 become [`TrustError::Unauthorized`]; every other failure
    /// status becomes [`TrustError::Http`]. Callers handle 404 before this.
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        match self.status {
            s if (200..300).contains(&s) => Ok(self),
            401 | 403 => Err(TrustError::Unauthorized {
                url: url.to_string(),
                status: self.status,
            }
            .into()),
            status => Err(TrustError::Http {
                url: url.to_string(),
                status,
            }
            .into()),
        }
    }
}

/// HttpClient port for all outbound network calls
///
/// Registries and credential providers depend on this port rather than on a
/// concrete HTTP library, so every lookup can be exercised against fixtures.
/// Dropping the returned future aborts the in-flight request.
///
/// # Errors
/// Implementations return an error only for transport failures; HTTP error
/// statuses are returned as responses for the caller to interpret.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
