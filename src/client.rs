use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;

use crate::config::GitHubConfig;
use crate::error::{IssueDigestError, Result};
use crate::types::Repository;

const GITHUB_API_HEADER: &str = "x-github-api-version";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Authenticated REST client scoped to one repository.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, repo: &Repository) -> Result<Self> {
        let token = config.resolve_token()?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| IssueDigestError::AuthError(format!("Invalid token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                IssueDigestError::ConfigError(format!("Invalid user agent: {}", e))
            })?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            GITHUB_API_HEADER,
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        let api_base_url = config.api_base_url.trim_end_matches('/');
        if api_base_url.is_empty() {
            return Err(IssueDigestError::ConfigError(
                "API base URL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            http,
            base_url: format!("{}/repos/{}/{}", api_base_url, repo.owner, repo.name),
        })
    }

    /// `https://api.github.com/repos/<owner>/<name>` for the default host.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one GET to `<base_url><path>`. Transport failures are errors;
    /// any HTTP status, including failures, is returned to the caller.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
