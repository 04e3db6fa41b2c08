use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IssueDigestError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }

    pub fn from_open(open: bool) -> Self {
        if open {
            IssueState::Open
        } else {
            IssueState::Closed
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of `GET /repos/{owner}/{repo}/issues`. Fields not listed here
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub number: Option<u64>,
    pub title: String,
    pub state: IssueState,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: Option<String>,
    /// Present (non-null) only when the record is a pull request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// `closed_at` for closed issues, `created_at` for open ones.
    pub fn relevant_date(&self) -> Option<DateTime<Utc>> {
        match self.state {
            IssueState::Closed => self.closed_at,
            IssueState::Open => self.created_at,
        }
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    pub full_name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let owner = owner.into();
        let name = name.into();
        let full_name = format!("{}/{}", owner, name);
        Self {
            owner,
            name,
            full_name,
        }
    }

    /// Accepts `owner/name` or a repository URL such as
    /// `https://github.com/owner/name.git` or
    /// `https://api.github.com/repos/owner/name`.
    pub fn parse(target: &str) -> Result<Self> {
        if target.contains("://") {
            Self::from_url(target)
        } else {
            Self::from_full_name(target)
        }
    }

    /// The path after the host must be exactly `owner/name`, or
    /// `repos/owner/name` on an `api.` host. Deeper paths such as
    /// `/issues` or `/pull/3` are rejected.
    pub fn from_url(url: &str) -> Result<Self> {
        let invalid = || {
            IssueDigestError::InvalidRepository(format!("Invalid repository URL: {}", url))
        };

        let (_, rest) = url.trim().split_once("://").ok_or_else(invalid)?;
        let rest = rest.trim_end_matches('/');
        let (host, path) = rest.split_once('/').ok_or_else(invalid)?;
        let path = path.strip_suffix(".git").unwrap_or(path);
        let segments: Vec<&str> = path.split('/').collect();

        let repo_segments = if host.starts_with("api.") {
            match segments.as_slice() {
                ["repos", owner, name] => [*owner, *name],
                _ => return Err(invalid()),
            }
        } else {
            match segments.as_slice() {
                [owner, name] => [*owner, *name],
                _ => return Err(invalid()),
            }
        };

        Self::checked(repo_segments[0], repo_segments[1], url)
    }

    pub fn from_full_name(full_name: &str) -> Result<Self> {
        let parts: Vec<&str> = full_name.trim().split('/').collect();
        if parts.len() != 2 {
            return Err(IssueDigestError::InvalidRepository(format!(
                "Expected 'owner/name', got: {}",
                full_name
            )));
        }
        Self::checked(parts[0], parts[1], full_name)
    }

    fn checked(owner: &str, name: &str, input: &str) -> Result<Self> {
        if owner.is_empty() || name.is_empty() {
            return Err(IssueDigestError::InvalidRepository(format!(
                "Owner and name must not be empty: {}",
                input
            )));
        }
        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}
