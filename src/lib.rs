//! List every open or closed issue of a GitHub repository, newest first.
//!
//! ```no_run
//! use gh_issue_digest::{IssueDigestBuilder, IssueState, Repository};
//!
//! # async fn run() -> gh_issue_digest::Result<()> {
//! let digest = IssueDigestBuilder::new()
//!     .token_env_var("GITHUB_TOKEN")
//!     .build(Repository::new("ibm", "jobs"))?;
//! digest.print_issues(IssueState::Closed).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod processor;
pub mod types;

use std::io::Write;

pub use client::{ApiResponse, GitHubClient};
pub use config::{DigestConfig, GitHubConfig, PaginationConfig};
pub use error::{IssueDigestError, Result};
pub use pagination::{has_next_page, parse_link_header};
pub use processor::{render_issue, sort_issues, write_issues, IssueProcessor};
pub use types::{Issue, IssueState, Repository};

pub struct IssueDigest {
    repository: Repository,
    processor: IssueProcessor,
}

impl IssueDigest {
    pub fn new(repository: Repository) -> Result<Self> {
        Self::with_config(DigestConfig::default(), repository)
    }

    pub fn with_config(config: DigestConfig, repository: Repository) -> Result<Self> {
        config.pagination.validate()?;
        let client = GitHubClient::new(&config.github, &repository)?;

        Ok(Self {
            repository,
            processor: IssueProcessor::new(client, config.pagination),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// All issues in `state`, in API order.
    pub async fn fetch_issues(&self, state: IssueState) -> Result<Vec<Issue>> {
        self.processor.fetch_all(state).await
    }

    pub async fn list_issues<W: Write>(&self, state: IssueState, out: &mut W) -> Result<usize> {
        self.processor.list_issues(state, out).await
    }

    pub async fn print_issues(&self, state: IssueState) -> Result<usize> {
        let mut issues = self.fetch_issues(state).await?;
        sort_issues(&mut issues);
        let mut handle = std::io::stdout().lock();
        write_issues(&issues, &mut handle)
    }
}

pub struct IssueDigestBuilder {
    config: DigestConfig,
}

impl IssueDigestBuilder {
    pub fn new() -> Self {
        Self {
            config: DigestConfig::default(),
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.github.token = Some(token.into());
        self
    }

    pub fn token_env_var(mut self, var_name: impl Into<String>) -> Self {
        self.config.github.token_env_var = var_name.into();
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.github.api_base_url = url.into();
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.github.user_agent = agent.into();
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.github.timeout_seconds = seconds;
        self
    }

    pub fn per_page(mut self, per_page: u8) -> Self {
        self.config.pagination.per_page = per_page;
        self
    }

    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.pagination.max_pages = max_pages;
        self
    }

    pub fn exclude_pull_requests(mut self, exclude: bool) -> Self {
        self.config.pagination.exclude_pull_requests = exclude;
        self
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    pub fn build(self, repository: Repository) -> Result<IssueDigest> {
        IssueDigest::with_config(self.config, repository)
    }
}

impl Default for IssueDigestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
