//! GitHub API client implementation

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use repodash_core::{
    validate_repo_segment, CommitActivity, Contributor, CredentialProvider, ErrorContext,
    FileEntry, FileKind, Participation, RepoData, RepoLanguages, RepoStats, RepodashError,
    RepodashResult,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::{create_http_client, handle_response_error, ApiClientConfig, RepositoryApi};
use crate::credentials::GITHUB_PROVIDER;
use crate::pagination::branch_count_from_link;
use crate::tree::sort_file_entries;

/// GitHub API client
pub struct GitHubApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
    credentials: Arc<dyn CredentialProvider>,
}

/// GitHub README response
#[derive(Debug, Deserialize)]
struct GitHubReadmeResponse {
    content: String,
    encoding: String,
}

/// One item of a `contents` listing
#[derive(Debug, Deserialize)]
struct GitHubContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    sha: String,
    url: String,
}

/// `contents` answers with an array for directories and an object for files
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GitHubContentsResponse {
    Listing(Vec<GitHubContentItem>),
    Single(serde_json::Value),
}

impl From<GitHubContentItem> for FileEntry {
    fn from(item: GitHubContentItem) -> Self {
        Self {
            name: item.name,
            path: item.path,
            kind: if item.item_type == "dir" {
                FileKind::Dir
            } else {
                FileKind::File
            },
            sha: item.sha,
            url: item.url,
        }
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(
        config: ApiClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> RepodashResult<Self> {
        let client = create_http_client(&config)?;

        info!("Created GitHub API client for {}", config.base_url);

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    /// Accept header plus, when a token is available, bearer authorization
    fn request_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Ok(accept_value) = reqwest::header::HeaderValue::from_str(&self.config.accept) {
            headers.insert(reqwest::header::ACCEPT, accept_value);
        }

        if let Some(token) = self.credentials.api_key(GITHUB_PROVIDER) {
            if let Ok(mut auth_value) =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            {
                auth_value.set_sensitive(true);
                headers.insert(reqwest::header::AUTHORIZATION, auth_value);
            }
        }

        headers
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Make a GET request, failing on any non-success status
    async fn get_request(
        &self,
        endpoint: &str,
        operation: &str,
    ) -> RepodashResult<reqwest::Response> {
        let url = self.endpoint_url(endpoint);

        debug!("Making GitHub API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.request_headers())
            .send()
            .await
            .map_err(|e| {
                let context = ErrorContext::new("github_api_client")
                    .with_operation(operation)
                    .with_metadata("url", &url);
                if e.is_timeout() {
                    RepodashError::Timeout {
                        operation: operation.to_string(),
                        duration_ms: self.config.timeout_seconds * 1000,
                        context,
                    }
                } else {
                    RepodashError::Network {
                        message: format!("Failed to make request to GitHub API: {}", e),
                        source: Some(Box::new(e)),
                        context,
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, operation).await);
        }

        Ok(response)
    }

    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &str,
    ) -> RepodashResult<T> {
        response.json().await.map_err(|e| RepodashError::Decode {
            message: format!("Failed to parse response: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client").with_operation(operation),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        operation: &str,
    ) -> RepodashResult<T> {
        let response = self.get_request(endpoint, operation).await?;
        Self::parse_json(response, operation).await
    }

    /// GET one of the `stats/*` endpoints
    ///
    /// GitHub answers 202 with an empty body while it computes statistics.
    async fn get_stats<T: DeserializeOwned>(
        &self,
        owner: &str,
        repo: &str,
        kind: &str,
    ) -> RepodashResult<T> {
        let operation = format!("stats_{}", kind);
        let endpoint = Self::repo_endpoint(owner, repo, &format!("/stats/{}", kind))?;
        let response = self.get_request(&endpoint, &operation).await?;

        if response.status() == reqwest::StatusCode::ACCEPTED {
            return Err(RepodashError::Api {
                status: 202,
                message: format!("GitHub is still generating {} statistics", kind),
                context: ErrorContext::new("github_api_client")
                    .with_operation(&operation)
                    .with_suggestion("Retry in a few seconds"),
            });
        }

        Self::parse_json(response, &operation).await
    }

    pub(crate) async fn branch_count(&self, owner: &str, repo: &str) -> RepodashResult<u32> {
        let endpoint = Self::repo_endpoint(owner, repo, "/branches?per_page=1")?;
        let response = self.get_request(&endpoint, "branch_count").await?;

        let link = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|value| value.to_str().ok());

        Ok(branch_count_from_link(link))
    }

    /// Decode base64 content from GitHub API
    fn decode_base64_content(content: &str) -> RepodashResult<String> {
        // GitHub wraps the payload at 60 columns
        let cleaned_content = content.replace(['\n', '\r', ' '], "");

        let decoded_bytes = BASE64
            .decode(&cleaned_content)
            .map_err(|e| RepodashError::Decode {
                message: format!("Failed to decode base64 content: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client")
                    .with_operation("decode_base64_content"),
            })?;

        String::from_utf8(decoded_bytes).map_err(|e| RepodashError::Decode {
            message: format!("Content is not valid UTF-8: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client")
                .with_operation("decode_base64_content"),
        })
    }

    /// `repos/{owner}/{repo}{suffix}` after checking both names are plain path segments
    fn repo_endpoint(owner: &str, repo: &str, suffix: &str) -> RepodashResult<String> {
        validate_repo_segment(owner, "owner")?;
        validate_repo_segment(repo, "repo")?;

        Ok(format!(
            "repos/{}/{}{}",
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            suffix
        ))
    }

    /// `/`-separated path with each segment percent-encoded; `.` and `..` are dropped
    fn encode_path(path: &str) -> String {
        path.split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[async_trait]
impl RepositoryApi for GitHubApiClient {
    async fn repository(&self, owner: &str, repo: &str) -> RepodashResult<RepoData> {
        info!("Fetching GitHub repository data for {}/{}", owner, repo);

        let endpoint = Self::repo_endpoint(owner, repo, "")?;
        self.get_json(&endpoint, "repository").await
    }

    async fn languages(&self, owner: &str, repo: &str) -> RepodashResult<RepoLanguages> {
        debug!("Fetching GitHub languages for {}/{}", owner, repo);

        let endpoint = Self::repo_endpoint(owner, repo, "/languages")?;
        self.get_json(&endpoint, "languages").await
    }

    async fn readme(&self, owner: &str, repo: &str) -> RepodashResult<Option<String>> {
        debug!("Fetching GitHub README for {}/{}", owner, repo);

        let endpoint = Self::repo_endpoint(owner, repo, "/readme")?;
        let readme_response: GitHubReadmeResponse = match self.get_json(&endpoint, "readme").await
        {
            Ok(readme) => readme,
            Err(e) if e.is_not_found() => {
                debug!("README not found for {}/{}", owner, repo);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if readme_response.encoding != "base64" {
            return Err(RepodashError::Decode {
                message: format!("Unexpected README encoding: {}", readme_response.encoding),
                source: None,
                context: ErrorContext::new("github_api_client")
                    .with_operation("readme")
                    .with_suggestion("Expected base64 encoding from GitHub API"),
            });
        }

        Self::decode_base64_content(&readme_response.content).map(Some)
    }

    async fn contributors(&self, owner: &str, repo: &str) -> RepodashResult<Vec<Contributor>> {
        debug!("Fetching GitHub contributors for {}/{}", owner, repo);

        let endpoint = Self::repo_endpoint(owner, repo, "/contributors")?;
        self.get_json(&endpoint, "contributors").await
    }

    async fn stats(&self, owner: &str, repo: &str) -> RepodashResult<RepoStats> {
        info!("Fetching GitHub statistics for {}/{}", owner, repo);

        let (commit_activity, code_frequency, participation, punch_card, branches) = futures::try_join!(
            self.get_stats::<Vec<CommitActivity>>(owner, repo, "commit_activity"),
            self.get_stats::<Vec<[i64; 3]>>(owner, repo, "code_frequency"),
            self.get_stats::<Participation>(owner, repo, "participation"),
            self.get_stats::<Vec<[u32; 3]>>(owner, repo, "punch_card"),
            self.branch_count(owner, repo),
        )?;

        Ok(RepoStats {
            commit_activity,
            code_frequency,
            participation,
            punch_card,
            branches,
        })
    }

    async fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> RepodashResult<Vec<FileEntry>> {
        let encoded = Self::encode_path(path);
        let endpoint = if encoded.is_empty() {
            Self::repo_endpoint(owner, repo, "/contents")?
        } else {
            Self::repo_endpoint(owner, repo, &format!("/contents/{}", encoded))?
        };
        debug!("Fetching GitHub contents for {}/{} at '{}'", owner, repo, path);

        let mut entries: Vec<FileEntry> = match self.get_json(&endpoint, "contents").await? {
            GitHubContentsResponse::Listing(items) => {
                items.into_iter().map(FileEntry::from).collect()
            }
            GitHubContentsResponse::Single(_) => {
                debug!("'{}' in {}/{} is not a directory", path, owner, repo);
                Vec::new()
            }
        };

        sort_file_entries(&mut entries);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_content_with_line_breaks() {
        // "# Hello\n\nWorld\n" wrapped the way GitHub does
        let decoded = GitHubApiClient::decode_base64_content("IyBIZWxs\nbwoKV29y\nbGQK\n").unwrap();
        assert_eq!(decoded, "# Hello\n\nWorld\n");
    }

    #[test]
    fn test_decode_base64_rejects_garbage() {
        assert!(matches!(
            GitHubApiClient::decode_base64_content("!!not base64!!"),
            Err(RepodashError::Decode { .. })
        ));
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(GitHubApiClient::encode_path(""), "");
        assert_eq!(GitHubApiClient::encode_path("/src/"), "src");
        assert_eq!(
            GitHubApiClient::encode_path("docs/my notes/a#b.md"),
            "docs/my%20notes/a%23b.md"
        );
    }

    #[test]
    fn test_encode_path_drops_dot_segments() {
        assert_eq!(GitHubApiClient::encode_path("src/./../lib"), "src/lib");
        assert_eq!(GitHubApiClient::encode_path("../../x?y"), "x%3Fy");
    }

    #[test]
    fn test_repo_endpoint_validates_names() {
        assert_eq!(
            GitHubApiClient::repo_endpoint("octo", "hello.rs", "/readme").unwrap(),
            "repos/octo/hello.rs/readme"
        );

        for (owner, repo) in [
            ("octo", "x/../../other/private/contents/key.txt?"),
            ("..", "hello"),
            ("octo", ""),
            ("octo", "hello?a=b"),
        ] {
            assert!(matches!(
                GitHubApiClient::repo_endpoint(owner, repo, "/readme"),
                Err(RepodashError::Validation { .. })
            ));
        }
    }

    #[test]
    fn test_content_item_kind_mapping() {
        let item = |kind: &str| GitHubContentItem {
            name: "x".to_string(),
            path: "x".to_string(),
            item_type: kind.to_string(),
            sha: "1".to_string(),
            url: "u".to_string(),
        };

        assert_eq!(FileEntry::from(item("dir")).kind, FileKind::Dir);
        assert_eq!(FileEntry::from(item("file")).kind, FileKind::File);
        assert_eq!(FileEntry::from(item("symlink")).kind, FileKind::File);
        assert_eq!(FileEntry::from(item("submodule")).kind, FileKind::File);
    }
}
