//! Repodash Web Server
//!
//! Serves the dashboard panels over HTTP.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use repodash_core::{init_logging, RepodashConfig};
use repodash_github::{ChainedCredentials, EnvCredentials, StaticCredentials};
use repodash_web::{AppState, RepodashServer};

/// Repodash Web Server - GitHub repository dashboard
#[derive(Parser)]
#[command(name = "repodash-web")]
#[command(about = "A web dashboard for GitHub repositories")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server host to bind to (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_ref())?;
    if let Some(host) = args.host {
        config.web.host = host;
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let credentials = ChainedCredentials::new()
        .then(EnvCredentials)
        .then(StaticCredentials::github(config.github.token.clone()));

    let web_config = config.web.clone();
    let state = AppState::new(config, Arc::new(credentials))?;

    println!("🚀 Starting Repodash Web Server");
    println!("📍 Server: http://{}", web_config.address());

    RepodashServer::new(web_config, state).start().await?;
    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> anyhow::Result<RepodashConfig> {
    if let Some(path) = config_path {
        return Ok(RepodashConfig::from_file(path)?);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("repodash").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".repodash").join("config.toml")),
        Some(PathBuf::from("repodash.toml")),
    ];

    for path in default_paths.into_iter().flatten() {
        if path.exists() {
            return Ok(RepodashConfig::from_file(&path)?);
        }
    }

    Ok(RepodashConfig::default())
}
