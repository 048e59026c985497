//! Dashboard-facing data access
//!
//! Every operation either yields its value or a sentinel (`None`, or an empty
//! listing for the file tree). A failure is logged once through the
//! [`DiagnosticLog`] and announced once through the [`Notifier`]; nothing is
//! propagated to the caller.

use repodash_core::{
    with_timeout, Contributor, DiagnosticLog, FileEntry, Notifier, RepoData, RepoLanguages,
    RepoStats, RepodashResult,
};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::api::RepositoryApi;

/// Returned in place of README text when the repository has none
pub const README_PLACEHOLDER: &str = "No README found in this repository.";

/// Sentinel-returning wrapper around a [`RepositoryApi`]
#[derive(Clone)]
pub struct RepoDataService {
    api: Arc<dyn RepositoryApi>,
    notifier: Arc<dyn Notifier>,
    diagnostics: Arc<dyn DiagnosticLog>,
    operation_timeout_ms: Option<u64>,
}

impl RepoDataService {
    pub fn new(
        api: Arc<dyn RepositoryApi>,
        notifier: Arc<dyn Notifier>,
        diagnostics: Arc<dyn DiagnosticLog>,
    ) -> Self {
        Self {
            api,
            notifier,
            diagnostics,
            operation_timeout_ms: None,
        }
    }

    /// Bound each whole operation (all of its requests) by `timeout_ms`
    pub fn with_operation_timeout(mut self, timeout_ms: u64) -> Self {
        self.operation_timeout_ms = Some(timeout_ms);
        self
    }

    /// Same API and diagnostics, different notification sink
    pub fn with_notifier(&self, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            ..self.clone()
        }
    }

    /// Run `request`, collapsing any failure into `None` after reporting it
    async fn settle<T, F>(&self, operation: &str, failure_message: &str, request: F) -> Option<T>
    where
        F: Future<Output = RepodashResult<T>>,
    {
        let result = match self.operation_timeout_ms {
            Some(timeout_ms) => with_timeout(request, timeout_ms, operation).await,
            None => request.await,
        };

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.diagnostics.log_error(operation, &e);
                self.notifier.notify_error(failure_message);
                None
            }
        }
    }

    pub async fn fetch_repo_basics(&self, owner: &str, repo: &str) -> Option<RepoData> {
        self.settle(
            "fetch_repo_basics",
            "Failed to fetch repository data",
            self.api.repository(owner, repo),
        )
        .await
    }

    pub async fn fetch_repo_languages(&self, owner: &str, repo: &str) -> Option<RepoLanguages> {
        self.settle(
            "fetch_repo_languages",
            "Failed to fetch repository languages",
            self.api.languages(owner, repo),
        )
        .await
    }

    /// README text; [`README_PLACEHOLDER`] when the repository has none
    pub async fn fetch_repo_readme(&self, owner: &str, repo: &str) -> Option<String> {
        self.settle(
            "fetch_repo_readme",
            "Failed to fetch repository README",
            self.api.readme(owner, repo),
        )
        .await
        .map(|readme| readme.unwrap_or_else(|| README_PLACEHOLDER.to_string()))
    }

    pub async fn fetch_repo_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Option<Vec<Contributor>> {
        self.settle(
            "fetch_repo_contributors",
            "Failed to fetch repository contributors",
            self.api.contributors(owner, repo),
        )
        .await
    }

    /// All five statistics or nothing
    pub async fn fetch_repo_stats(&self, owner: &str, repo: &str) -> Option<RepoStats> {
        self.settle(
            "fetch_repo_stats",
            "Failed to fetch repository statistics",
            self.api.stats(owner, repo),
        )
        .await
    }

    /// Listing at `path` (empty for the root); empty on failure
    pub async fn fetch_repo_file_tree(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Vec<FileEntry> {
        let entries = self
            .settle(
                "fetch_repo_file_tree",
                "Failed to fetch repository files",
                self.api.contents(owner, repo, path),
            )
            .await
            .unwrap_or_default();

        debug!(count = entries.len(), path = path, "Listed repository files");
        entries
    }

    /// Root listing of the repository
    pub async fn build_file_tree(&self, owner: &str, repo: &str) -> Vec<FileEntry> {
        self.fetch_repo_file_tree(owner, repo, "").await
    }
}
