//! Command line options for the gh-issue-digest tool
use anyhow::Context;
use clap::{Parser, ValueEnum};

use crate::config::{DigestConfig, GitHubConfig, PaginationConfig};
use crate::types::{IssueState, Repository};
use crate::IssueDigest;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateArg {
    Open,
    Closed,
}

impl From<StateArg> for IssueState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Open => IssueState::Open,
            StateArg::Closed => IssueState::Closed,
        }
    }
}

/// gh-issue-digest - List the issues of a GitHub repository, newest first
#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Repository as `owner/name` or a GitHub URL
    pub target: String,

    /// Which issues to list
    #[arg(short, long, value_enum, default_value_t = StateArg::Closed)]
    pub state: StateArg,

    /// Shorthand for `--state open`
    #[arg(long, conflicts_with = "state")]
    pub open: bool,

    /// Environment variable holding the API token
    #[arg(long, default_value = "GITHUB_TOKEN")]
    pub token_env: String,

    /// API root, e.g. `https://ghe.example.com/api/v3` for GitHub Enterprise
    #[arg(long, default_value = "https://api.github.com")]
    pub api_base_url: String,

    /// Issues requested per page
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub per_page: u8,

    /// Give up when the API still advertises a next page after this many pages
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Skip pull requests, which the issues endpoint also returns
    #[arg(long)]
    pub exclude_pull_requests: bool,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn issue_state(&self) -> IssueState {
        if self.open {
            IssueState::Open
        } else {
            self.state.into()
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn to_config(&self) -> DigestConfig {
        DigestConfig {
            github: GitHubConfig {
                token_env_var: self.token_env.clone(),
                api_base_url: self.api_base_url.clone(),
                timeout_seconds: self.timeout,
                ..Default::default()
            },
            pagination: PaginationConfig {
                per_page: self.per_page,
                max_pages: self.max_pages,
                exclude_pull_requests: self.exclude_pull_requests,
            },
        }
    }
}

/// Resolve the configuration, then print the requested issues to stdout.
pub async fn run(cli: &Cli) -> anyhow::Result<usize> {
    let repository = Repository::parse(&cli.target)
        .with_context(|| format!("Unable to parse target '{}'", cli.target))?;
    let digest = IssueDigest::with_config(cli.to_config(), repository)
        .context("Unable to set up the GitHub client")?;

    let state = cli.issue_state();
    let count = digest
        .print_issues(state)
        .await
        .with_context(|| format!("Unable to list {} issues of {}", state, digest.repository()))?;

    Ok(count)
}
