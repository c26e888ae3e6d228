//! Issue records as supplied by the issue source.

use chrono::{DateTime, Utc};

/// State of a remote issue. GitHub only reports these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

/// One issue assigned to the authenticated user.
///
/// Read-only input to the reconciler. The source must not return two issues
/// with the same [`id`](Issue::id); if it does, first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Repository full name, `<owner>/<repo>`.
    pub repository: String,
    /// Issue number, unique within the repository.
    pub number: u64,
    pub state: IssueState,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Milestone title, when the issue has one.
    pub milestone: Option<String>,
}

impl Issue {
    /// Join key against `TaskRecord::issue`: `<owner>/<repo>#<number>`.
    pub fn id(&self) -> String {
        format!("{}#{}", self.repository, self.number)
    }

    /// Repository short name (the part after the `/`).
    pub fn repo_short_name(&self) -> &str {
        self.repository
            .rsplit_once('/')
            .map_or(self.repository.as_str(), |(_, short)| short)
    }
}
