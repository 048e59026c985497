//! Shared application state

use std::sync::Arc;
use tracing::info;

use repodash_core::{CredentialProvider, RepodashConfig, TracingDiagnostics, TracingNotifier};
use repodash_github::{ApiClientConfig, GitHubApiClient, RepoDataService};

use crate::{WebError, WebResult};

/// Cloned into every handler
///
/// The service's own notifier only sees failures that happen outside a
/// request; handlers swap in a per-request collector.
#[derive(Clone)]
pub struct AppState {
    pub service: RepoDataService,
    pub config: Arc<RepodashConfig>,
}

impl AppState {
    pub fn new(
        config: RepodashConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> WebResult<Self> {
        let client = GitHubApiClient::new(ApiClientConfig::from(&config.github), credentials)
            .map_err(|e| WebError::Config(e.to_string()))?;

        info!("Application state initialized for {}", config.github.base_url);

        let service = RepoDataService::new(
            Arc::new(client),
            Arc::new(TracingNotifier),
            Arc::new(TracingDiagnostics),
        );

        Ok(Self::from_service(service, config))
    }

    pub fn from_service(service: RepoDataService, config: RepodashConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }
}
