//! Repository panel handlers
//!
//! Each request gets its own [`CollectingNotifier`] so the notices returned
//! with a panel are exactly the ones raised while building it.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use repodash_core::CollectingNotifier;
use repodash_dashboard::{ActivitySummary, ContributorsView, LanguageBreakdown};
use repodash_github::RepoDataService;

use super::types::{PanelResponse, StatsPayload, TreeQuery};
use crate::AppState;

/// Service bound to a fresh notification collector
pub(crate) fn request_scope(state: &AppState) -> (RepoDataService, Arc<CollectingNotifier>) {
    let notifier = Arc::new(CollectingNotifier::new());
    let service = state.service.with_notifier(notifier.clone());
    (service, notifier)
}

/// `200` with the payload, or `502` with `data: null` when the fetch failed
fn panel_response<T: Serialize>(data: Option<T>, notifier: &CollectingNotifier) -> Response {
    let status = if data.is_some() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    let body = PanelResponse {
        data,
        notices: notifier.messages(),
    };
    (status, Json(body)).into_response()
}

pub async fn get_repository(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    debug!("Fetching repository {}/{}", owner, repo);
    let (service, notifier) = request_scope(&state);
    let data = service.fetch_repo_basics(&owner, &repo).await;
    panel_response(data, &notifier)
}

pub async fn get_languages(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let (service, notifier) = request_scope(&state);
    let data = service
        .fetch_repo_languages(&owner, &repo)
        .await
        .map(|languages| LanguageBreakdown::from_languages(&languages));
    panel_response(data, &notifier)
}

pub async fn get_readme(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let (service, notifier) = request_scope(&state);
    let data = service.fetch_repo_readme(&owner, &repo).await;
    panel_response(data, &notifier)
}

/// A failed fetch still yields a view (the empty state), so this is always `200`
pub async fn get_contributors(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let (service, notifier) = request_scope(&state);
    let contributors = service.fetch_repo_contributors(&owner, &repo).await;
    let view = ContributorsView::build(contributors.as_deref(), false);
    panel_response(Some(view), &notifier)
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Response {
    let (service, notifier) = request_scope(&state);
    let data = service
        .fetch_repo_stats(&owner, &repo)
        .await
        .map(|stats| StatsPayload {
            summary: ActivitySummary::from_stats(&stats),
            stats,
        });
    panel_response(data, &notifier)
}

pub async fn get_file_tree(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<TreeQuery>,
) -> Response {
    let (service, notifier) = request_scope(&state);
    let entries = service
        .fetch_repo_file_tree(&owner, &repo, &query.path)
        .await;
    panel_response(Some(entries), &notifier)
}
