//! Fixtures shared by unit tests across the crate.

use crate::adapters::outbound::cache::MemoryCache;
use crate::adapters::outbound::clock::ManualClock;
use crate::adapters::outbound::network::GitHubApi;
use crate::ports::outbound::{
    CredentialProvider, HttpClient, HttpMethod, HttpRequest, HttpResponse, ProgressReporter,
};
use crate::shared::Result;
use crate::trust_evaluation::domain::{Credentials, Principal};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// HttpClient serving canned responses keyed by method and exact URL.
///
/// Requests without a fixture fail, so a test never silently hits an
/// unexpected endpoint.
#[derive(Default)]
pub(crate) struct FixtureHttpClient {
    routes: Mutex<HashMap<(HttpMethod, String), HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FixtureHttpClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_json(self, url: &str, body: &str) -> Self {
        self.with_response(HttpMethod::Get, url, 200, body)
    }

    pub(crate) fn with_status(self, url: &str, status: u16) -> Self {
        self.with_response(HttpMethod::Get, url, status, "")
    }

    pub(crate) fn with_response(
        self,
        method: HttpMethod,
        url: &str,
        status: u16,
        body: &str,
    ) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), HttpResponse::new(status, body));
        self
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FixtureHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        match routes.get(&(request.method, request.url.clone())) {
            Some(response) => Ok(response.clone()),
            None => anyhow::bail!("no fixture for {:?} {}", request.method, request.url),
        }
    }
}

/// A clock pinned to 2024-06-03 10:00:00 UTC (a Monday)
pub(crate) fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap(),
    ))
}

/// ProgressReporter capturing every message
#[derive(Default)]
pub(crate) struct RecordingReporter {
    pub(crate) messages: Mutex<Vec<String>>,
    pub(crate) errors: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// CredentialProvider returning a fixed installation token
pub(crate) struct StaticCredentials;

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get_credentials(&self, _principal: Principal) -> Result<Credentials> {
        Ok(Credentials::oauth("ghs_test"))
    }
}

/// A GitHubApi against `https://api.github.com` backed by `http`
pub(crate) fn github_api(http: Arc<FixtureHttpClient>) -> Arc<GitHubApi> {
    Arc::new(GitHubApi::new(
        http,
        Arc::new(StaticCredentials),
        Principal::Installation(1),
        "https://api.github.com/",
        Arc::new(MemoryCache::new(fixed_clock())),
    ))
}
