//! Repodash GitHub - data-access layer over the GitHub REST API
//!
//! [`api`] holds the raw, error-propagating client. [`RepoDataService`] wraps it
//! with the dashboard contract: every failure is reported once through the
//! injected collaborators and turned into a sentinel value.

pub mod api;
pub mod credentials;
pub mod pagination;
pub mod service;
pub mod tree;

pub use api::{ApiClientConfig, GitHubApiClient, RepositoryApi};
pub use credentials::{ChainedCredentials, EnvCredentials, StaticCredentials, GITHUB_PROVIDER};
pub use pagination::{branch_count_from_link, last_page_from_link};
pub use service::{RepoDataService, README_PLACEHOLDER};
pub use tree::sort_file_entries;
