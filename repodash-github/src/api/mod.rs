//! Raw API client for the GitHub REST API
//!
//! Methods here propagate every failure as a [`RepodashError`]; the
//! notification contract lives one layer up in [`crate::service`].

use async_trait::async_trait;
use repodash_core::{
    Contributor, ErrorContext, FileEntry, GitHubConfig, RepoData, RepoLanguages, RepoStats,
    RepodashError, RepodashResult,
};
use std::collections::HashMap;

pub mod github;


pub use github::GitHubApiClient;

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Media type sent in the `Accept` header
    pub accept: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&GitHubConfig::default())
    }
}

impl From<&GitHubConfig> for ApiClientConfig {
    fn from(config: &GitHubConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            accept: config.accept.clone(),
            timeout_seconds: config.timeout_seconds,
            user_agent: config.user_agent.clone(),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Configuration pointing at another API root (GitHub Enterprise, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// The six remote reads the dashboard is built from
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Basic repository information
    async fn repository(&self, owner: &str, repo: &str) -> RepodashResult<RepoData>;

    /// Bytes of code per language
    async fn languages(&self, owner: &str, repo: &str) -> RepodashResult<RepoLanguages>;

    /// Decoded README text, `None` when the repository has no README
    async fn readme(&self, owner: &str, repo: &str) -> RepodashResult<Option<String>>;

    /// Contributors in the order the API returns them
    async fn contributors(&self, owner: &str, repo: &str) -> RepodashResult<Vec<Contributor>>;

    /// Activity statistics; fails if any constituent request fails
    async fn stats(&self, owner: &str, repo: &str) -> RepodashResult<RepoStats>;

    /// Directory listing at `path` (empty for the root), directories first
    async fn contents(&self, owner: &str, repo: &str, path: &str)
        -> RepodashResult<Vec<FileEntry>>;
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> RepodashResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            RepodashError::Config {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    for (key, value) in &config.headers {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            RepodashError::Config {
                message: format!("Invalid header name '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?;

        let header_value =
            reqwest::header::HeaderValue::from_str(value).map_err(|e| RepodashError::Config {
                message: format!("Invalid header value for '{}': {}", key, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            })?;

        headers.insert(header_name, header_value);
    }

    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| RepodashError::Internal {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })
}

/// Turn a non-success response into an error, consuming the body for the message
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> RepodashError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();
    let message = format!(
        "HTTP {} for {}: {}",
        status.as_u16(),
        url,
        if error_body.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error")
        } else {
            &error_body
        }
    );

    let context = ErrorContext::new("api_client")
        .with_operation(operation)
        .with_metadata("url", url.as_str())
        .with_suggestion(match status.as_u16() {
            401 => "Check your access token",
            403 => "Check repository permissions or rate limits",
            404 => "Repository not found or not accessible",
            _ => "Check network connectivity and API status",
        });

    if status == reqwest::StatusCode::NOT_FOUND {
        RepodashError::NotFound {
            resource: url.to_string(),
            context,
        }
    } else {
        RepodashError::Api {
            status: status.as_u16(),
            message,
            context,
        }
    }
}
