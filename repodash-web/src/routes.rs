//! Route definitions for the Repodash web server

use crate::{handlers, AppState};
use axum::{routing::get, Router};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/repos/{owner}/{repo}", get(handlers::get_repository))
        .route("/repos/{owner}/{repo}/languages", get(handlers::get_languages))
        .route("/repos/{owner}/{repo}/readme", get(handlers::get_readme))
        .route(
            "/repos/{owner}/{repo}/contributors",
            get(handlers::get_contributors),
        )
        .route("/repos/{owner}/{repo}/stats", get(handlers::get_stats))
        .route("/repos/{owner}/{repo}/tree", get(handlers::get_file_tree))
}

/// Create HTML page routes
pub fn page_routes() -> Router<AppState> {
    Router::new().route(
        "/repos/{owner}/{repo}/contributors",
        get(handlers::contributors_page),
    )
}
