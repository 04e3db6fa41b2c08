use std::cmp::Reverse;
use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};

use crate::client::GitHubClient;
use crate::config::PaginationConfig;
use crate::error::{IssueDigestError, Result};
use crate::pagination::has_next_page;
use crate::types::{Issue, IssueState};

const ISSUES_PATH: &str = "/issues";

pub struct IssueProcessor {
    client: GitHubClient,
    pagination: PaginationConfig,
}

impl IssueProcessor {
    pub fn new(client: GitHubClient, pagination: PaginationConfig) -> Self {
        Self { client, pagination }
    }

    /// Fetches every issue in `state`, following `Link: rel="next"` until the
    /// API stops advertising one. Fails on the first bad page; nothing
    /// collected so far is returned in that case.
    pub async fn fetch_all(&self, state: IssueState) -> Result<Vec<Issue>> {
        self.pagination.validate()?;
        info!("Collecting {} issues from {}", state, self.client.base_url());

        let mut all_issues = Vec::new();
        let mut page = 1u32;

        loop {
            debug!("Fetching page {} of {} issues", page, state);

            let query = [
                ("state", state.as_str().to_string()),
                ("per_page", self.pagination.per_page.to_string()),
                ("page", page.to_string()),
            ];
            let response = self.client.get(ISSUES_PATH, &query).await?;

            if !response.is_success() {
                warn!("Page {} returned HTTP {}", page, response.status);
                return Err(IssueDigestError::ApiError {
                    status: response.status.as_u16(),
                    message: api_error_message(&response.body),
                });
            }

            let issues: Vec<Issue> = serde_json::from_str(&response.body)?;
            debug!("Page {} returned {} issues", page, issues.len());
            all_issues.extend(issues);

            if !has_next_page(&response.headers)? {
                break;
            }
            if page >= self.pagination.max_pages {
                return Err(IssueDigestError::PaginationExceeded {
                    max_pages: self.pagination.max_pages,
                });
            }
            page += 1;
        }

        if self.pagination.exclude_pull_requests {
            let before = all_issues.len();
            all_issues.retain(|issue| !issue.is_pull_request());
            debug!("Dropped {} pull requests", before - all_issues.len());
        }

        info!(
            "Collected {} {} issues over {} pages",
            all_issues.len(),
            state,
            page
        );

        Ok(all_issues)
    }

    /// Fetches, sorts and writes one line per issue. Returns the number of
    /// lines written.
    pub async fn list_issues<W: Write>(&self, state: IssueState, out: &mut W) -> Result<usize> {
        let mut issues = self.fetch_all(state).await?;
        sort_issues(&mut issues);
        write_issues(&issues, out)
    }

    pub async fn list_issues_open<W: Write>(&self, open: bool, out: &mut W) -> Result<usize> {
        self.list_issues(IssueState::from_open(open), out).await
    }
}

/// Newest first by [`Issue::relevant_date`]. Issues without that date go
/// last; ties keep their input order.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by_key(|issue| Reverse(issue.relevant_date()));
}

pub fn write_issues<W: Write>(issues: &[Issue], out: &mut W) -> Result<usize> {
    for issue in issues {
        writeln!(out, "{}", render_issue(issue))?;
    }
    out.flush()?;
    Ok(issues.len())
}

pub fn render_issue(issue: &Issue) -> String {
    match issue.state {
        IssueState::Closed => format!(
            "{} - {} - Closed at: {}",
            issue.title,
            issue.state,
            format_date(issue.closed_at)
        ),
        IssueState::Open => format!(
            "{} - {} - Created at: {}",
            issue.title,
            issue.state,
            format_date(issue.created_at)
        ),
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "unknown".to_string())
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| body.trim().to_string())
}
