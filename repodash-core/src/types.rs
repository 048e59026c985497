//! Core data type definitions
//!
//! Shapes mirror the GitHub v3 REST payloads the dashboard consumes. Values are
//! immutable once fetched; view models derive new structures from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{ErrorContext, RepodashError, RepodashResult};

/// Owner/name pair identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse `owner/repo` or a `https://github.com/owner/repo[.git]` URL
    pub fn parse(input: &str) -> RepodashResult<Self> {
        let input = input.trim();

        let path = if input.starts_with("http://") || input.starts_with("https://") {
            let url = Url::parse(input).map_err(|e| RepodashError::Validation {
                message: format!("Invalid repository URL: {}", e),
                field: Some("repository".to_string()),
                context: ErrorContext::new("repo_ref").with_operation("parse"),
            })?;
            url.path().to_string()
        } else {
            input.to_string()
        };

        let mut segments = path
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty());

        match (segments.next(), segments.next()) {
            (Some(owner), Some(repo)) => {
                let repo = repo.trim_end_matches(".git");
                validate_repo_segment(owner, "owner")?;
                validate_repo_segment(repo, "repo")?;
                Ok(Self::new(owner, repo))
            }
            _ => Err(RepodashError::Validation {
                message: format!("Expected 'owner/repo', got '{}'", input),
                field: Some("repository".to_string()),
                context: ErrorContext::new("repo_ref")
                    .with_operation("parse")
                    .with_suggestion("Use the form 'owner/repo' or a GitHub repository URL"),
            }),
        }
    }
}

/// Reject an owner or repository name that could not be a single GitHub path segment
///
/// Allowed: non-empty, ASCII alphanumerics plus `.`, `_` and `-`, and not `.` or `..`.
pub fn validate_repo_segment(value: &str, field: &str) -> RepodashResult<()> {
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        return Ok(());
    }

    Err(RepodashError::Validation {
        message: format!("Invalid repository {} '{}'", field, value),
        field: Some(field.to_string()),
        context: ErrorContext::new("repo_ref")
            .with_operation("validate_segment")
            .with_suggestion("Use letters, digits, '.', '_' or '-' only"),
    })
}

impl FromStr for RepoRef {
    type Err = RepodashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Repository owner summary embedded in [`RepoData`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
}

/// Basic repository information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoData {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub owner: RepoOwner,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub watchers_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub default_branch: String,
}

/// Language name to number of bytes written in it
pub type RepoLanguages = BTreeMap<String, u64>;

/// A user credited with changes to a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    /// Profile page
    pub html_url: String,
    pub contributions: u64,
    #[serde(rename = "type", default)]
    pub account_type: String,
}

/// One week of commit activity, `days` starting on Sunday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitActivity {
    pub days: Vec<u32>,
    pub total: u32,
    /// Unix timestamp of the start of the week
    pub week: i64,
}

/// Weekly commit counts for the last 52 weeks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub all: Vec<u32>,
    pub owner: Vec<u32>,
}

/// Combined statistics; only ever constructed when every part was fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoStats {
    pub commit_activity: Vec<CommitActivity>,
    /// `[week timestamp, additions, deletions]`
    pub code_frequency: Vec<[i64; 3]>,
    pub participation: Participation,
    /// `[weekday, hour, commits]`
    pub punch_card: Vec<[u32; 3]>,
    pub branches: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Dir,
    File,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub kind: FileKind,
    pub sha: String,
    pub url: String,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parse_short_form() {
        let repo = RepoRef::parse("rust-lang/cargo").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.repo, "cargo");
        assert_eq!(repo.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn test_repo_ref_parse_url() {
        let repo: RepoRef = "https://github.com/tokio-rs/tokio.git".parse().unwrap();
        assert_eq!(repo, RepoRef::new("tokio-rs", "tokio"));

        let repo = RepoRef::parse("https://github.com/serde-rs/serde/tree/master").unwrap();
        assert_eq!(repo, RepoRef::new("serde-rs", "serde"));
    }

    #[test]
    fn test_repo_ref_parse_rejects_single_segment() {
        assert!(RepoRef::parse("cargo").is_err());
        assert!(RepoRef::parse("https://github.com/rust-lang").is_err());
    }

    #[test]
    fn test_repo_segment_validation() {
        assert!(validate_repo_segment("rust-lang", "owner").is_ok());
        assert!(validate_repo_segment("my_repo.rs", "repo").is_ok());

        for bad in ["", ".", "..", "a?b", "a%2Fb", "a b", "héllo", "x#y"] {
            let err = validate_repo_segment(bad, "repo").unwrap_err();
            assert!(matches!(err, RepodashError::Validation { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_repo_ref_parse_rejects_traversal() {
        assert!(RepoRef::parse("octo/..").is_err());
        assert!(RepoRef::parse("../hello").is_err());
        assert!(RepoRef::parse("octo/hello?x=1").is_err());
    }

    #[test]
    fn test_contributor_deserializes_type_field() {
        let contributor: Contributor = serde_json::from_value(serde_json::json!({
            "login": "octocat",
            "id": 1,
            "avatar_url": "https://avatars.example/1",
            "html_url": "https://github.com/octocat",
            "contributions": 42,
            "type": "User",
            "site_admin": false
        }))
        .unwrap();

        assert_eq!(contributor.account_type, "User");
        assert_eq!(contributor.contributions, 42);
    }

    #[test]
    fn test_file_kind_serialization() {
        assert_eq!(serde_json::to_string(&FileKind::Dir).unwrap(), "\"dir\"");
        assert_eq!(serde_json::to_string(&FileKind::File).unwrap(), "\"file\"");
    }
}
