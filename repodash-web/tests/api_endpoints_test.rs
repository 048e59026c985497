//! End-to-end tests of the panel endpoints against a mock GitHub API

mod helpers;

use helpers::spawn_app;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn contributor(login: &str, contributions: u64) -> serde_json::Value {
    json!({
        "login": login,
        "id": contributions,
        "avatar_url": format!("https://avatars.example/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "contributions": contributions,
        "type": "User"
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = MockServer::start().await;
    let app = spawn_app(&upstream).await;

    let (status, body) = app.get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_contributors_endpoint_returns_populated_view() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/contributors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            contributor("a", 50),
            contributor("b", 40),
            contributor("c", 30),
            contributor("d", 20),
            contributor("e", 10),
            contributor("f", 5),
            contributor("g", 5),
        ])))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo/hello/contributors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notices"], json!([]));
    assert_eq!(body["data"]["state"], "populated");
    assert_eq!(body["data"]["stats"]["total_contributions"], 160);
    assert_eq!(body["data"]["stats"]["top_contribution_percentage"], 31);
    assert_eq!(body["data"]["stats"]["average_contributions"], 23);
    assert_eq!(body["data"]["chart"][5]["name"], "Others");
    assert_eq!(body["data"]["chart"][5]["value"], 10);
}

#[tokio::test]
async fn test_failed_contributors_fetch_reports_notice_and_empty_state() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/contributors"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo/hello/contributors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["state"], "empty");
    assert_eq!(body["notices"], json!(["Failed to fetch repository contributors"]));
}

#[tokio::test]
async fn test_failed_basics_is_bad_gateway_with_null_data() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo/hello").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["data"].is_null());
    assert_eq!(body["notices"], json!(["Failed to fetch repository data"]));
}

#[tokio::test]
async fn test_missing_readme_returns_placeholder_without_notice() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/readme"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo/hello/readme").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "No README found in this repository.");
    assert_eq!(body["notices"], json!([]));
}

#[tokio::test]
async fn test_languages_endpoint_returns_breakdown() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Rust": 750,
            "Shell": 250
        })))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo/hello/languages").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_bytes"], 1000);
    assert_eq!(body["data"]["languages"][0]["name"], "Rust");
    assert_eq!(body["data"]["languages"][0]["percentage"], 75.0);
}

#[tokio::test]
async fn test_tree_endpoint_passes_path_and_sorts() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/contents/src"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "main.rs", "path": "src/main.rs", "type": "file", "sha": "1", "url": "u1" },
            { "name": "api", "path": "src/api", "type": "dir", "sha": "2", "url": "u2" }
        ])))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo/hello/tree?path=src").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "api");
    assert_eq!(body["data"][0]["kind"], "dir");
    assert_eq!(body["data"][1]["name"], "main.rs");
}

#[tokio::test]
async fn test_contributors_page_renders_html() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/hello/contributors"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([contributor("octocat", 3), contributor("hubot", 1)])),
        )
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let response = app.get("/repos/octo/hello/contributors").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("octocat"));
    assert!(html.contains("75%"));
    assert!(html.contains("conic-gradient("));
}

#[tokio::test]
async fn test_encoded_separators_in_repo_name_never_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "encoding": "base64",
            "content": "c2VjcmV0LWtleQ=="
        })))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app
        .get_json(
            "/api/repos/octo/x%2F..%2F..%2Fother%2Fprivate%2Fcontents%2Fdeploy%2Fkey.txt%3F/readme",
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["data"].is_null());
    assert_eq!(body["notices"], json!(["Failed to fetch repository README"]));
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_owner_with_query_character_is_rejected_before_any_request() {
    let upstream = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&upstream)
        .await;

    let app = spawn_app(&upstream).await;
    let (status, body) = app.get_json("/api/repos/octo%3Fx%3D1/hello/tree").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["notices"], json!(["Failed to fetch repository files"]));
    assert!(upstream.received_requests().await.unwrap().is_empty());
}
