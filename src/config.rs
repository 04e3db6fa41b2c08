use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{IssueDigestError, Result};

/// Largest page size the GitHub REST API accepts.
pub const MAX_PER_PAGE: u8 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestConfig {
    pub github: GitHubConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Explicit token. Takes precedence over `token_env_var` and is never serialized.
    #[serde(skip)]
    pub token: Option<String>,
    pub token_env_var: String,
    pub api_base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env_var: "GITHUB_TOKEN".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
        }
    }
}

impl GitHubConfig {
    /// Returns the bearer token, either the explicit one or the value of
    /// `token_env_var`. Missing and blank values are both rejected.
    pub fn resolve_token(&self) -> Result<String> {
        let token = match &self.token {
            Some(token) => token.clone(),
            None => std::env::var(&self.token_env_var).map_err(|_| {
                IssueDigestError::AuthError(format!(
                    "{} environment variable not set",
                    self.token_env_var
                ))
            })?,
        };

        let token = token.trim();
        if token.is_empty() {
            return Err(IssueDigestError::AuthError(match self.token {
                Some(_) => "token is empty".to_string(),
                None => format!("{} environment variable is empty", self.token_env_var),
            }));
        }

        Ok(token.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub per_page: u8,
    /// Upper bound on requested pages. Hitting it while the API still
    /// advertises a next page is an error.
    pub max_pages: u32,
    pub exclude_pull_requests: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: 1000,
            exclude_pull_requests: false,
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(IssueDigestError::ConfigError(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, self.per_page
            )));
        }
        if self.max_pages == 0 {
            return Err(IssueDigestError::ConfigError(
                "max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DigestConfig::default();
        assert_eq!(config.github.token_env_var, "GITHUB_TOKEN");
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.github.timeout(), Duration::from_secs(30));
        assert!(config.github.user_agent.starts_with("gh-issue-digest/"));
        assert_eq!(config.pagination.per_page, 100);
        assert_eq!(config.pagination.max_pages, 1000);
        assert!(config.pagination.validate().is_ok());
    }

    #[test]
    fn test_explicit_token_wins() {
        let config = GitHubConfig {
            token: Some("  abc123 ".to_string()),
            token_env_var: "GH_ISSUE_DIGEST_TEST_UNUSED".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_token().unwrap(), "abc123");
    }

    #[test]
    fn test_token_from_env() {
        std::env::set_var("GH_ISSUE_DIGEST_TEST_TOKEN_SET", "from-env");
        let config = GitHubConfig {
            token_env_var: "GH_ISSUE_DIGEST_TEST_TOKEN_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_token().unwrap(), "from-env");
    }

    #[test]
    fn test_missing_token_env() {
        let config = GitHubConfig {
            token_env_var: "GH_ISSUE_DIGEST_TEST_TOKEN_MISSING".to_string(),
            ..Default::default()
        };
        match config.resolve_token() {
            Err(IssueDigestError::AuthError(msg)) => {
                assert!(msg.contains("GH_ISSUE_DIGEST_TEST_TOKEN_MISSING"));
                assert!(msg.contains("not set"));
            }
            other => panic!("expected AuthError, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_token_env() {
        std::env::set_var("GH_ISSUE_DIGEST_TEST_TOKEN_BLANK", "   ");
        let config = GitHubConfig {
            token_env_var: "GH_ISSUE_DIGEST_TEST_TOKEN_BLANK".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve_token(),
            Err(IssueDigestError::AuthError(msg)) if msg.contains("empty")
        ));
    }

    #[test]
    fn test_pagination_validation() {
        let zero_page = PaginationConfig {
            per_page: 0,
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let too_big = PaginationConfig {
            per_page: 101,
            ..Default::default()
        };
        assert!(too_big.validate().is_err());

        let no_pages = PaginationConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert!(matches!(
            no_pages.validate(),
            Err(IssueDigestError::ConfigError(_))
        ));
    }
}
