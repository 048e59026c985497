//! Server-rendered pages

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Html,
};

use repodash_dashboard::ContributorsView;

use super::repository::request_scope;
use crate::{templates::ContributorsTemplate, AppState, WebResult};

/// Contributors chart, summary and ranking as a standalone HTML page
pub async fn contributors_page(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> WebResult<Html<String>> {
    let (service, notifier) = request_scope(&state);
    let contributors = service.fetch_repo_contributors(&owner, &repo).await;
    let view = ContributorsView::build(contributors.as_deref(), false);

    let repository = format!("{}/{}", owner, repo);
    let page = ContributorsTemplate::new(&repository, &view, notifier.messages());
    Ok(Html(page.render()?))
}
