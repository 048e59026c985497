//! Repodash CLI - Command-line dashboard for GitHub repositories
//!
//! One subcommand per dashboard panel. Fetch failures are reported on stderr
//! and turn into a non-zero exit code; nothing is retried.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use repodash_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success, Contributor,
    Notifier, RepoRef, RepodashConfig, TracingDiagnostics,
};
use repodash_dashboard::{
    render::{render_activity, render_contributors, render_languages, render_overview, render_tree},
    ActivitySummary, ContributorsView, LanguageBreakdown,
};
use repodash_github::{
    ApiClientConfig, ChainedCredentials, EnvCredentials, GitHubApiClient, RepoDataService,
    StaticCredentials,
};

#[derive(Parser)]
#[command(name = "repodash")]
#[command(about = "A terminal dashboard for GitHub repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// GitHub token, takes precedence over environment and config
    #[arg(short, long, global = true)]
    token: Option<String>,

    /// Print the panel as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Repository metadata
    Overview {
        /// owner/repo or a GitHub URL
        repo: String,
    },

    /// Language breakdown by bytes
    Languages {
        /// owner/repo or a GitHub URL
        repo: String,
    },

    /// Decoded README text
    Readme {
        /// owner/repo or a GitHub URL
        repo: String,
    },

    /// Contributor chart, summary and ranking
    Contributors {
        /// owner/repo or a GitHub URL
        repo: String,
    },

    /// Commit activity statistics
    Stats {
        /// owner/repo or a GitHub URL
        repo: String,
    },

    /// Directory listing, directories first
    Tree {
        /// owner/repo or a GitHub URL
        repo: String,

        /// Directory inside the repository (root when omitted)
        #[arg(short, long, default_value = "")]
        path: String,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,

        /// Validate configuration
        #[arg(long)]
        validate: bool,
    },
}

/// Prints notifications straight to the terminal
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let mut logging_config = config.logging.clone();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }
    init_logging(&logging_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Repodash CLI v{}", env!("CARGO_PKG_VERSION"));

    let repo = match &cli.command {
        Commands::Config {
            show,
            init,
            validate,
        } => {
            handle_config(cli.config.as_ref(), *show, *init, *validate)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Overview { repo }
        | Commands::Languages { repo }
        | Commands::Readme { repo }
        | Commands::Contributors { repo }
        | Commands::Stats { repo }
        | Commands::Tree { repo, .. } => RepoRef::parse(repo)?,
    };

    let service = create_service(&config, cli.token.clone())?;
    let (owner, name) = (repo.owner.as_str(), repo.repo.as_str());
    log_operation_start!("dashboard_command", repo = %repo);

    let panel = match &cli.command {
        Commands::Overview { .. } => Panel::from_fetch(
            service.fetch_repo_basics(owner, name).await,
            |data| output(cli.json, data, render_overview(data)),
        ),
        Commands::Languages { .. } => Panel::from_fetch(
            service.fetch_repo_languages(owner, name).await,
            |languages| {
                let breakdown = LanguageBreakdown::from_languages(languages);
                output(cli.json, &breakdown, render_languages(&breakdown))
            },
        ),
        Commands::Readme { .. } => Panel::from_fetch(
            service.fetch_repo_readme(owner, name).await,
            |text| output(cli.json, text, format!("{}\n", text.trim_end())),
        ),
        Commands::Contributors { .. } => contributors_panel(
            service.fetch_repo_contributors(owner, name).await.as_deref(),
            cli.json,
        ),
        Commands::Stats { .. } => Panel::from_fetch(
            service.fetch_repo_stats(owner, name).await,
            |stats| {
                let summary = ActivitySummary::from_stats(stats);
                output(cli.json, &summary, render_activity(&summary))
            },
        ),
        Commands::Tree { path, .. } => {
            // The listing is never absent; an empty one after a failure has
            // already been reported by the notifier
            let entries = service.fetch_repo_file_tree(owner, name, path).await;
            Panel {
                text: Some(output(cli.json, &entries, render_tree(&entries))),
                fetched: true,
            }
        }
        Commands::Config { .. } => Panel {
            text: None,
            fetched: false,
        },
    };

    if let Some(text) = &panel.text {
        print!("{}", text);
    }

    if panel.fetched {
        log_operation_success!("dashboard_command", repo = %repo);
        Ok(ExitCode::SUCCESS)
    } else {
        log_operation_error!("dashboard_command", "fetch returned no data", repo = %repo);
        Ok(ExitCode::FAILURE)
    }
}

/// What a command prints, and whether its data was actually fetched
#[derive(Debug)]
struct Panel {
    text: Option<String>,
    fetched: bool,
}

impl Panel {
    fn from_fetch<T>(data: Option<T>, render: impl FnOnce(&T) -> String) -> Self {
        Self {
            fetched: data.is_some(),
            text: data.as_ref().map(render),
        }
    }
}

/// The empty state is still printed when the fetch failed
fn contributors_panel(contributors: Option<&[Contributor]>, json: bool) -> Panel {
    let view = ContributorsView::build(contributors, false);
    Panel {
        text: Some(output(json, &view, render_contributors(&view))),
        fetched: contributors.is_some(),
    }
}

/// Either the JSON form of `value` or the pre-rendered text
fn output<T: Serialize>(json: bool, value: &T, text: String) -> String {
    if !json {
        return text;
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{}\n", json),
        Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
    }
}

fn create_service(
    config: &RepodashConfig,
    token: Option<String>,
) -> anyhow::Result<RepoDataService> {
    let credentials = ChainedCredentials::new()
        .then(StaticCredentials::github(token))
        .then(EnvCredentials)
        .then(StaticCredentials::github(config.github.token.clone()));

    let api_config = ApiClientConfig::from(&config.github);
    let client = GitHubApiClient::new(api_config, Arc::new(credentials))
        .context("Failed to create GitHub client")?;

    Ok(RepoDataService::new(
        Arc::new(client),
        Arc::new(TerminalNotifier),
        Arc::new(TracingDiagnostics),
    ))
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|d| d.join("repodash").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".repodash").join("config.toml")),
        Some(PathBuf::from("repodash.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn load_config(config_path: Option<&PathBuf>) -> anyhow::Result<RepodashConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return Ok(RepodashConfig::from_file(path)?);
    }

    for path in default_config_paths() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return Ok(RepodashConfig::from_file(&path)?);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(RepodashConfig::default())
}

fn handle_config(
    config_path: Option<&PathBuf>,
    show: bool,
    init: bool,
    validate: bool,
) -> anyhow::Result<()> {
    if init {
        let target = match config_path {
            Some(path) => path.clone(),
            None => dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
                .context("Could not determine a configuration directory")?
                .join("repodash")
                .join("config.toml"),
        };

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        RepodashConfig::default().save_to_file(&target)?;
        println!("✅ Configuration initialized at: {:?}", target);
    }

    if show {
        let config = load_config(config_path)?;
        println!("📋 Current configuration:");
        println!("{}", toml::to_string_pretty(&config)?);
    }

    if validate {
        let config = load_config(config_path)?;
        match config.validate() {
            Ok(()) => println!("✅ Configuration is valid"),
            Err(e) => {
                println!("❌ Configuration validation failed: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
