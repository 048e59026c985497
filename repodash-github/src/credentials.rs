//! Credential providers
//!
//! Tokens are looked up per request so a provider may change its answer over
//! the lifetime of a client. Blank tokens are treated as absent.

use repodash_core::CredentialProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Provider name used for GitHub tokens
pub const GITHUB_PROVIDER: &str = "github";

fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads `REPODASH_<PROVIDER>_TOKEN`, then `<PROVIDER>_TOKEN`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    fn variables(provider: &str) -> [String; 2] {
        let upper = provider.to_uppercase();
        [format!("REPODASH_{}_TOKEN", upper), format!("{}_TOKEN", upper)]
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self, provider: &str) -> Option<String> {
        Self::variables(provider)
            .iter()
            .find_map(|name| std::env::var(name).ok().and_then(non_blank))
    }
}

/// Fixed tokens, typically from the command line or the config file
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    tokens: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, provider: &str, token: impl Into<String>) -> Self {
        self.tokens.insert(provider.to_string(), token.into());
        self
    }

    /// A GitHub-only provider; `None` yields a provider without tokens
    pub fn github(token: Option<String>) -> Self {
        match token {
            Some(token) => Self::new().with_token(GITHUB_PROVIDER, token),
            None => Self::new(),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self, provider: &str) -> Option<String> {
        self.tokens.get(provider).cloned().and_then(non_blank)
    }
}

/// Asks each provider in turn; the first token found wins
#[derive(Clone, Default)]
pub struct ChainedCredentials {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }
}

impl CredentialProvider for ChainedCredentials {
    fn api_key(&self, provider: &str) -> Option<String> {
        self.providers
            .iter()
            .find_map(|candidate| candidate.api_key(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repodash_core::NoCredentials;

    #[test]
    fn test_static_credentials() {
        let credentials = StaticCredentials::github(Some("abc".to_string()));
        assert_eq!(credentials.api_key(GITHUB_PROVIDER), Some("abc".to_string()));
        assert_eq!(credentials.api_key("gitlab"), None);

        assert_eq!(StaticCredentials::github(None).api_key(GITHUB_PROVIDER), None);
    }

    #[test]
    fn test_blank_token_is_absent() {
        let credentials = StaticCredentials::new().with_token(GITHUB_PROVIDER, "   ");
        assert_eq!(credentials.api_key(GITHUB_PROVIDER), None);
    }

    #[test]
    fn test_chain_takes_first_hit() {
        let chain = ChainedCredentials::new()
            .then(NoCredentials)
            .then(StaticCredentials::github(Some("from-cli".to_string())))
            .then(StaticCredentials::github(Some("from-config".to_string())));

        assert_eq!(chain.api_key(GITHUB_PROVIDER), Some("from-cli".to_string()));
        assert_eq!(ChainedCredentials::new().api_key(GITHUB_PROVIDER), None);
    }

    #[test]
    fn test_env_variable_names() {
        assert_eq!(
            EnvCredentials::variables("github"),
            [
                "REPODASH_GITHUB_TOKEN".to_string(),
                "GITHUB_TOKEN".to_string()
            ]
        );
    }
}
