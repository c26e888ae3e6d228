//! Test-only builders for task and issue records, plus scripted sources.

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::issue::{Issue, IssueState};
use crate::core::task::TaskRecord;
use crate::io::github::{IssueSource, SourceError};

/// Parse a line into a task record, like the file parser would.
pub fn task(text: &str) -> TaskRecord {
    TaskRecord::parse(text)
}

/// Build a `NaiveDate`, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid rfc3339 timestamp")
}

/// Open issue with deterministic defaults and no milestone.
pub fn open_issue(repository: &str, number: u64, title: &str, created_at: &str) -> Issue {
    Issue {
        repository: repository.to_string(),
        number,
        state: IssueState::Open,
        title: title.to_string(),
        created_at: timestamp(created_at),
        closed_at: None,
        milestone: None,
    }
}

/// Closed issue with a fixed creation date and the given close timestamp.
pub fn closed_issue(repository: &str, number: u64, title: &str, closed_at: &str) -> Issue {
    Issue {
        repository: repository.to_string(),
        number,
        state: IssueState::Closed,
        title: title.to_string(),
        created_at: timestamp("2020-01-01T00:00:00Z"),
        closed_at: Some(timestamp(closed_at)),
        milestone: None,
    }
}

/// Issue source returning a fixed list.
pub struct ScriptedSource {
    issues: Vec<Issue>,
}

impl ScriptedSource {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

impl IssueSource for ScriptedSource {
    fn fetch_assigned(&self) -> Result<Vec<Issue>, SourceError> {
        Ok(self.issues.clone())
    }
}

/// Issue source that always fails with an auth error.
pub struct FailingSource;

impl IssueSource for FailingSource {
    fn fetch_assigned(&self) -> Result<Vec<Issue>, SourceError> {
        Err(SourceError::Auth(reqwest::StatusCode::UNAUTHORIZED))
    }
}
