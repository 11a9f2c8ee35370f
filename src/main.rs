mod cli;

use cli::{Args, Command};
use dependabot_trust::adapters::outbound::cache::MemoryCache;
use dependabot_trust::adapters::outbound::clock::SystemClock;
use dependabot_trust::adapters::outbound::console::StderrProgressReporter;
use dependabot_trust::adapters::outbound::network::{
    GitHubApi, GitHubAppCredentialProvider, GoogleCalendarClient, NagerHolidayClient,
    ReqwestHttpClient, DEFAULT_GOOGLE_CALENDAR_URL, DEFAULT_NAGER_DATE_URL,
};
use dependabot_trust::adapters::outbound::storage::SqliteTrustStore;
use dependabot_trust::application::dto::TrustRequest;
use dependabot_trust::application::factories::RegistryFactory;
use dependabot_trust::application::use_cases::{
    EvaluateDeploymentUseCase, EvaluateTrustUseCase, ManageTrustUseCase,
};
use dependabot_trust::config::{
    discover_config, load_config_from_path, ConfigFile, Settings, CONFIG_FILENAME,
    GITHUB_TOKEN_ENV,
};
use dependabot_trust::ports::inbound::{
    DeploymentApprovalPort, TrustEvaluationPort, TrustManagementPort,
};
use dependabot_trust::ports::outbound::{Clock, HttpClient, TrustStore};
use dependabot_trust::shared::error::ExitCode;
use dependabot_trust::shared::Result;
use dependabot_trust::trust_evaluation::domain::{
    DependencyEcosystem, Principal, RepositoryId, TrustVerdict, WebhookEvent, WebhookEventKind,
};
use owo_colors::OwoColorize;
use std::process;
use std::sync::Arc;

fn main() {
    let args = Args::parse_args();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("\n❌ Failed to start the async runtime: {}\n", e);
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    };

    match runtime.block_on(run(args)) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Shared adapters every command is wired from
struct Context {
    settings: Settings,
    clock: Arc<dyn Clock>,
    cache: Arc<MemoryCache>,
    reporter: Arc<StderrProgressReporter>,
}

impl Context {
    fn open_trust_store(&self) -> Result<Arc<dyn TrustStore>> {
        Ok(Arc::new(SqliteTrustStore::open(
            &self.settings.trust_store_path,
            Arc::clone(&self.clock),
        )?))
    }

    fn manage_trust(&self) -> Result<ManageTrustUseCase<Arc<StderrProgressReporter>>> {
        Ok(ManageTrustUseCase::new(
            self.open_trust_store()?,
            Arc::clone(&self.cache),
            Arc::clone(&self.reporter),
        ))
    }

    /// Principal used for GitHub lookups: the App installation when
    /// configured, the static token (or anonymous access) otherwise
    fn principal(&self) -> Principal {
        match self.settings.installation_id {
            Some(id) => Principal::Installation(id),
            None => Principal::User,
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => {
            let dir = std::env::current_dir()?;
            match discover_config(&dir)? {
                Some(config) => {
                    eprintln!(
                        "📄 Auto-discovered config file: {}",
                        dir.join(CONFIG_FILENAME).display()
                    );
                    config
                }
                None => ConfigFile::default(),
            }
        }
    };
    let settings = Settings::resolve(config, std::env::var(GITHUB_TOKEN_ENV).ok())?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let context = Context {
        settings,
        cache: Arc::new(MemoryCache::new(Arc::clone(&clock))),
        clock,
        reporter: Arc::new(StderrProgressReporter::new(args.verbose)),
    };

    match args.command {
        Command::Check { repo, dependencies } => check(&context, repo, dependencies).await,
        Command::Trust {
            ecosystem,
            id,
            version,
        } => {
            let reference = TrustRequest::new(ecosystem, id, version).into_reference()?;
            context.manage_trust()?.trust(&reference).await?;
            println!("{} {}", "✔ Trusted".green(), reference);
            Ok(ExitCode::Success)
        }
        Command::Distrust {
            ecosystem,
            id,
            version,
        } => {
            let reference = TrustRequest::new(ecosystem, id, version).into_reference()?;
            context.manage_trust()?.distrust(&reference).await?;
            println!("{} {}", "✔ Distrusted".yellow(), reference);
            Ok(ExitCode::Success)
        }
        Command::List { ecosystem } => {
            let ecosystem: DependencyEcosystem = ecosystem.parse()?;
            let trusted = context.manage_trust()?.list(ecosystem).await?;
            for dependency in &trusted {
                let trusted_at = dependency
                    .trusted_at
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_default();
                println!(
                    "{}@{}  {}",
                    dependency.id,
                    dependency.version,
                    trusted_at.dimmed()
                );
            }
            eprintln!("📋 {} trusted {} dependencies", trusted.len(), ecosystem);
            Ok(ExitCode::Success)
        }
        Command::Deploy {
            event,
            repo,
            environment,
        } => deploy(&context, event, repo, environment).await,
        Command::ClearCache { tag } => {
            let evicted = context.manage_trust()?.clear_cache(&tag)?;
            println!("🧹 Evicted {} cache entries tagged '{}'", evicted, tag.trim());
            Ok(ExitCode::Success)
        }
    }
}

async fn check(
    context: &Context,
    repo: RepositoryId,
    dependencies: Vec<TrustRequest>,
) -> Result<ExitCode> {
    let references = dependencies
        .into_iter()
        .map(TrustRequest::into_reference)
        .collect::<Result<Vec<_>>>()?;

    let settings = &context.settings;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let credentials = Arc::new(GitHubAppCredentialProvider::new(
        settings.github.clone(),
        Arc::clone(&http),
        Arc::clone(&context.cache),
        Arc::clone(&context.clock),
    ));
    let github = Arc::new(GitHubApi::new(
        Arc::clone(&http),
        credentials,
        context.principal(),
        settings.github.api_url.clone(),
        Arc::clone(&context.cache),
    ));
    let registries = RegistryFactory::create(
        http,
        github,
        Arc::clone(&context.cache),
        &settings.endpoints,
    );

    let use_case = EvaluateTrustUseCase::new(
        registries,
        context.open_trust_store()?,
        settings.identities.clone(),
        Arc::clone(&context.reporter),
    );

    let report = use_case.evaluate_all(&repo, &references).await?;
    for verdict in &report.verdicts {
        print_verdict(verdict);
    }

    if !report.all_trusted() {
        return Ok(ExitCode::Rejected);
    }

    if settings.approvals_enabled {
        println!("{}", "auto-approve".green().bold());
    }
    Ok(ExitCode::Success)
}

fn print_verdict(verdict: &TrustVerdict) {
    let owners = if verdict.owners.is_empty() {
        "no owners".to_string()
    } else {
        verdict.owners.join(", ")
    };

    let marker = if verdict.is_trusted() {
        "✔".green().to_string()
    } else {
        "✘".red().to_string()
    };
    println!(
        "{} {} ({}; {})",
        marker,
        verdict.reference,
        verdict.reason,
        owners.dimmed()
    );
}

async fn deploy(
    context: &Context,
    kind: WebhookEventKind,
    repo: Option<RepositoryId>,
    environment: Option<String>,
) -> Result<ExitCode> {
    let settings = &context.settings;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let calendar = Arc::new(GoogleCalendarClient::new(
        Arc::clone(&http),
        DEFAULT_GOOGLE_CALENDAR_URL,
        settings.calendar_api_key.clone().unwrap_or_default(),
    ));
    let holidays = Arc::new(NagerHolidayClient::new(
        http,
        Arc::clone(&context.cache),
        DEFAULT_NAGER_DATE_URL,
    ));

    let use_case = EvaluateDeploymentUseCase::from_settings(
        &settings.deployment,
        calendar,
        holidays,
        Arc::clone(&context.clock),
        Arc::clone(&context.reporter),
    );

    let mut event = WebhookEvent::new(kind);
    if let Some(repo) = repo {
        event = event.with_repository(repo);
    }
    if let Some(environment) = environment {
        event = event.with_environment(environment);
    }

    let verdict = use_case.evaluate_deployment(&event).await?;
    match verdict.denied_rule_name() {
        Some(rule) => {
            println!("{} {}", "⛔ Deployment denied by".red(), rule);
            Ok(ExitCode::Rejected)
        }
        None => {
            println!("{}", "✅ Deployment approved".green());
            Ok(ExitCode::Success)
        }
    }
}
