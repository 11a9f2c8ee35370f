use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dependabot_trust::application::dto::TrustRequest;
use dependabot_trust::trust_evaluation::domain::{RepositoryId, WebhookEventKind};

/// Parses `ecosystem:id@version`, e.g. `npm:@types/node@20.1.0`
///
/// The version is taken after the last `@`, so scoped npm packages and
/// image references keep their full id.
pub fn parse_dependency(s: &str) -> Result<TrustRequest, String> {
    let (ecosystem, rest) = s.split_once(':').ok_or_else(|| {
        format!(
            "Invalid dependency: {}. Expected the form ecosystem:id@version",
            s
        )
    })?;
    let (id, version) = rest
        .rsplit_once('@')
        .filter(|(id, version)| !id.is_empty() && !version.is_empty())
        .ok_or_else(|| format!("Invalid dependency: {}. Missing @version", s))?;

    Ok(TrustRequest::new(ecosystem, id, version))
}

fn parse_repository(s: &str) -> Result<RepositoryId, String> {
    s.parse().map_err(|e: dependabot_trust::shared::error::TrustError| e.to_string())
}

fn parse_event_kind(s: &str) -> Result<WebhookEventKind, String> {
    s.parse().map_err(|e: dependabot_trust::shared::error::TrustError| e.to_string())
}

/// Trust and approval decisions for Dependabot pull requests
#[derive(Parser, Debug)]
#[command(name = "dependabot-trust")]
#[command(version)]
#[command(about = "Trust and approval decisions for Dependabot pull requests", long_about = None)]
pub struct Args {
    /// Path to the configuration file (defaults to ./dependabot-trust.config.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print detailed progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decide whether dependency versions in an update are trusted
    Check {
        /// Repository receiving the update, as owner/name
        #[arg(short, long, value_parser = parse_repository)]
        repo: RepositoryId,

        /// Dependencies as ecosystem:id@version, e.g. npm:left-pad@1.3.0
        #[arg(required = true, value_parser = parse_dependency)]
        dependencies: Vec<TrustRequest>,
    },

    /// Record a dependency version as trusted
    Trust {
        ecosystem: String,
        id: String,
        version: String,
    },

    /// Remove a dependency version from the trust store
    Distrust {
        ecosystem: String,
        id: String,
        version: String,
    },

    /// List trusted dependency versions for an ecosystem
    List { ecosystem: String },

    /// Evaluate the deployment rules for a webhook event
    Deploy {
        /// Event kind, e.g. deployment_protection_rule or check_suite
        #[arg(short, long, value_parser = parse_event_kind)]
        event: WebhookEventKind,

        /// Repository the event belongs to, as owner/name
        #[arg(short, long, value_parser = parse_repository)]
        repo: Option<RepositoryId>,

        /// Target environment of the deployment
        #[arg(long)]
        environment: Option<String>,
    },

    /// Evict cached registry and GitHub answers by tag (e.g. all, github, npm)
    ClearCache { tag: String },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
