//! Configuration management

use crate::error::{ErrorContext, RepodashError, RepodashResult};
use crate::logging::LoggingConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Top-level configuration file (`repodash.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepodashConfig {
    pub github: GitHubConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Media type pinned in the `Accept` header
    pub accept: String,
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Token used when neither the CLI nor the environment supplies one
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_API_URL.to_string(),
            accept: GITHUB_V3_MEDIA_TYPE.to_string(),
            user_agent: format!("repodash/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 30,
            token: None,
        }
    }
}

/// Dashboard web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl WebConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl RepodashConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepodashResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RepodashError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: RepodashConfig =
            toml::from_str(&content).map_err(|e| RepodashError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> RepodashResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| RepodashError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| RepodashError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> RepodashResult<()> {
        if let Err(e) = url::Url::parse(&self.github.base_url) {
            return Err(RepodashError::Config {
                message: format!("Invalid github.base_url '{}': {}", self.github.base_url, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Use an absolute URL such as https://api.github.com"),
            });
        }

        if self.github.timeout_seconds == 0 {
            return Err(crate::validation_error!(
                "github.timeout_seconds must be greater than 0",
                "github.timeout_seconds",
                "config"
            ));
        }

        if self.github.accept.trim().is_empty() {
            return Err(crate::validation_error!(
                "github.accept must not be empty",
                "github.accept",
                "config"
            ));
        }

        if self.web.port == 0 {
            return Err(crate::validation_error!(
                "web.port must be greater than 0",
                "web.port",
                "config"
            ));
        }

        Ok(())
    }
}
