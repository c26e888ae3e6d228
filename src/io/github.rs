//! Issue source abstraction and the paginating GitHub client.
//!
//! The [`IssueSource`] trait decouples the sync orchestration from the actual
//! tracker backend. Tests use scripted sources that return predetermined
//! issue lists without touching the network.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::core::issue::{Issue, IssueState};

const API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// Failure while fetching the assigned-issue list. All variants are fatal to
/// the run and occur before any file mutation.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("github rejected the token (http {0})")]
    Auth(StatusCode),
    #[error("github request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("github returned http {0}")]
    Api(StatusCode),
}

/// Abstraction over issue tracker backends.
///
/// Implementations must return the complete, finite list of issues assigned
/// to the authenticated user, across all accessible repositories, or fail.
pub trait IssueSource {
    fn fetch_assigned(&self) -> Result<Vec<Issue>, SourceError>;
}

/// Issue source backed by the GitHub REST v3 `/issues` endpoint.
pub struct GithubClient {
    client: Client,
    token: String,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: String) -> Result<Self, SourceError> {
        Self::with_base_url(token, API_BASE.to_string())
    }

    /// Client against a non-default API root. Used by tests.
    pub fn with_base_url(token: String, base_url: String) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("github-todotxt/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    fn fetch_page(&self, page: usize) -> Result<Vec<WireIssue>, SourceError> {
        let per_page = PER_PAGE.to_string();
        let page_number = page.to_string();
        let response = self
            .client
            .get(format!("{}/issues", self.base_url))
            .header("Authorization", format!("token {}", self.token))
            .query(&[
                ("filter", "assigned"),
                ("state", "all"),
                ("per_page", per_page.as_str()),
                ("page", page_number.as_str()),
            ])
            .send()?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Auth(status));
        }
        if !status.is_success() {
            return Err(SourceError::Api(status));
        }
        Ok(response.json()?)
    }
}

impl IssueSource for GithubClient {
    fn fetch_assigned(&self) -> Result<Vec<Issue>, SourceError> {
        info!("fetching assigned issues from github");
        let mut issues = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.fetch_page(page)?;
            let batch_len = batch.len();
            debug!(page, count = batch_len, "fetched issue page");
            issues.extend(batch.into_iter().map(Issue::from));
            if batch_len < PER_PAGE {
                return Ok(issues);
            }
            page += 1;
        }
    }
}

/// GitHub wire format for one `/issues` entry, reduced to the fields the
/// reconciler needs. Pull requests show up in this listing too and carry the
/// same fields, so no filtering is required.
#[derive(Debug, Deserialize)]
struct WireIssue {
    number: u64,
    title: String,
    state: WireState,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    milestone: Option<WireMilestone>,
    repository: WireRepository,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WireState {
    Open,
    Closed,
}

#[derive(Debug, Deserialize)]
struct WireMilestone {
    title: String,
}

#[derive(Debug, Deserialize)]
struct WireRepository {
    full_name: String,
}

impl From<WireIssue> for Issue {
    fn from(wire: WireIssue) -> Self {
        Self {
            repository: wire.repository.full_name,
            number: wire.number,
            state: match wire.state {
                WireState::Open => IssueState::Open,
                WireState::Closed => IssueState::Closed,
            },
            title: wire.title,
            created_at: wire.created_at,
            closed_at: wire.closed_at,
            milestone: wire.milestone.map(|m| m.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "number": 7,
        "title": "Fix the widget",
        "state": "closed",
        "created_at": "2021-03-01T09:30:00Z",
        "closed_at": "2021-03-04T16:00:00Z",
        "milestone": {"title": "v1.0 beta", "number": 2},
        "repository": {"full_name": "acme/widgets", "private": false},
        "pull_request": {"url": "https://api.github.com/repos/acme/widgets/pulls/7"}
    }"#;

    #[test]
    fn wire_issue_maps_to_core_record() {
        let wire: WireIssue = serde_json::from_str(SAMPLE).expect("deserialize");
        let issue = Issue::from(wire);
        assert_eq!(issue.id(), "acme/widgets#7");
        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.milestone.as_deref(), Some("v1.0 beta"));
        assert_eq!(issue.created_at.date_naive().to_string(), "2021-03-01");
    }

    #[test]
    fn wire_issue_without_milestone_or_close_date() {
        let raw = r#"{
            "number": 1,
            "title": "Open one",
            "state": "open",
            "created_at": "2022-01-01T00:00:00Z",
            "closed_at": null,
            "milestone": null,
            "repository": {"full_name": "acme/widgets"}
        }"#;
        let issue = Issue::from(serde_json::from_str::<WireIssue>(raw).expect("deserialize"));
        assert_eq!(issue.state, IssueState::Open);
        assert_eq!(issue.closed_at, None);
        assert_eq!(issue.milestone, None);
    }
}
