//! The two-pass reconciliation between task records and assigned issues.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::core::format::{complete_line, new_task_line};
use crate::core::issue::{Issue, IssueState};
use crate::core::task::TaskRecord;

/// What one reconciliation run changed, in deterministic order.
///
/// Issue-driven lists follow source order; task-driven lists follow document
/// order. The orchestrator logs these; the core itself performs no I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Issue ids whose task line was rewritten because the issue closed.
    pub completed: Vec<String>,
    /// Issue ids for which a new task line was appended.
    pub added: Vec<String>,
    /// Issue refs of tasks completed because the issue is no longer assigned.
    pub orphaned: Vec<String>,
    /// Issue ids marked done locally while still open remotely. Closing the
    /// remote issue is an intentional design gap; these are logged no-ops.
    pub done_but_open: Vec<String>,
}

impl ReconcileSummary {
    /// Whether the run changed any task text or appended any line.
    pub fn changed(&self) -> bool {
        !self.completed.is_empty() || !self.added.is_empty() || !self.orphaned.is_empty()
    }
}

/// Reconcile `tasks` against `issues`, mutating and extending `tasks`.
///
/// Pass 1 walks the issues: a closed issue completes its matching task line
/// (dated by `closed_at`, falling back to `today`), an open issue without a
/// task line gets one appended. Pass 2 walks the tasks: an incomplete task
/// whose issue ref matches no issue in the source is completed with `today`.
///
/// Pass 1 never un-completes a line and must run before Pass 2, since Pass 2
/// skips lines Pass 1 already completed. Matching is first-match in document
/// order, via a lookup map built once up front.
pub fn reconcile(
    tasks: &mut Vec<TaskRecord>,
    issues: &[Issue],
    today: NaiveDate,
) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    // First task index per issue ref, in document order.
    let mut by_ref: HashMap<String, usize> = HashMap::new();
    for (index, task) in tasks.iter().enumerate() {
        if let Some(issue_ref) = &task.issue {
            by_ref.entry(issue_ref.clone()).or_insert(index);
        }
    }
    let known_ids: HashSet<String> = issues.iter().map(Issue::id).collect();

    for issue in issues {
        let id = issue.id();
        match by_ref.get(&id) {
            Some(&index) => {
                let task = &mut tasks[index];
                if task.is_complete() {
                    if issue.state == IssueState::Open {
                        summary.done_but_open.push(id);
                    }
                } else if issue.state == IssueState::Closed {
                    let completed_on = issue.closed_at.map_or(today, |ts| ts.date_naive());
                    task.text = complete_line(&task.text, completed_on);
                    summary.completed.push(id);
                }
            }
            None if issue.state == IssueState::Open => {
                tasks.push(TaskRecord {
                    text: new_task_line(issue),
                    issue: Some(id.clone()),
                });
                summary.added.push(id);
            }
            // Closed and absent from the file: nothing to record.
            None => {}
        }
    }

    for task in &mut *tasks {
        let Some(issue_ref) = &task.issue else {
            continue;
        };
        if task.is_complete() || known_ids.contains(issue_ref) {
            continue;
        }
        summary.orphaned.push(issue_ref.clone());
        task.text = complete_line(&task.text, today);
    }

    summary
}
