//! Response and query types shared by the handlers

use chrono::{DateTime, Utc};
use repodash_core::RepoStats;
use repodash_dashboard::ActivitySummary;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Panel payload plus the notifications raised while producing it
///
/// `data` is `null` when the fetch failed; the reason is in `notices`.
#[derive(Debug, Serialize)]
pub struct PanelResponse<T> {
    pub data: Option<T>,
    pub notices: Vec<String>,
}

/// Raw statistics together with their summary
#[derive(Debug, Serialize)]
pub struct StatsPayload {
    pub stats: RepoStats,
    pub summary: ActivitySummary,
}

/// Query parameters for the file tree endpoint
#[derive(Debug, Default, Deserialize)]
pub struct TreeQuery {
    #[serde(default)]
    pub path: String,
}
