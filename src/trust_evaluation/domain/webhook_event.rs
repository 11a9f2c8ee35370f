use super::RepositoryId;
use crate::shared::error::TrustError;
use std::fmt;
use std::str::FromStr;

/// Kinds of webhook events that can request a deployment or merge approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    DeploymentProtectionRuleRequested,
    DeploymentStatus,
    CheckSuiteCompleted,
    PullRequest,
    Other(String),
}

impl WebhookEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventKind::DeploymentProtectionRuleRequested => "deployment_protection_rule",
            WebhookEventKind::DeploymentStatus => "deployment_status",
            WebhookEventKind::CheckSuiteCompleted => "check_suite",
            WebhookEventKind::PullRequest => "pull_request",
            WebhookEventKind::Other(name) => name,
        }
    }
}

impl fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEventKind {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(TrustError::Validation {
                message: "Event kind must not be empty".to_string(),
            });
        }

        Ok(match name {
            "deployment_protection_rule" => WebhookEventKind::DeploymentProtectionRuleRequested,
            "deployment_status" => WebhookEventKind::DeploymentStatus,
            "check_suite" => WebhookEventKind::CheckSuiteCompleted,
            "pull_request" => WebhookEventKind::PullRequest,
            other => WebhookEventKind::Other(other.to_string()),
        })
    }
}

/// A normalized webhook event handed to the deployment rule chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub kind: WebhookEventKind,
    pub repository: Option<RepositoryId>,
    pub environment: Option<String>,
}

impl WebhookEvent {
    pub fn new(kind: WebhookEventKind) -> Self {
        Self {
            kind,
            repository: None,
            environment: None,
        }
    }

    pub fn with_repository(mut self, repository: RepositoryId) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}
