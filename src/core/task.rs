//! Task records and the todo.txt line parser.

use std::sync::LazyLock;

use regex::Regex;

/// One task line from the todo.txt file.
///
/// `issue` is extracted once at parse time and is never recomputed, even when
/// `text` is rewritten during reconciliation. Records are never deleted:
/// every parsed line is written back in its original relative order, with
/// newly synthesized lines appended at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Raw line content. Rewritten in place when the task is marked complete.
    pub text: String,
    /// Issue reference of the form `<owner>/<repo>#<number>`, taken from the
    /// first `issue:<token>` occurrence on the line.
    pub issue: Option<String>,
}

static ISSUE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"issue:(\S+)").unwrap());

impl TaskRecord {
    /// Parse a single line into a record, extracting the `issue:` token.
    pub fn parse(line: &str) -> Self {
        let issue = ISSUE_TOKEN
            .captures(line)
            .map(|caps| caps[1].to_string());
        Self {
            text: line.to_string(),
            issue,
        }
    }

    /// Whether the line already carries the todo.txt completion marker:
    /// a lowercase `x` followed by whitespace at the start of the line.
    pub fn is_complete(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next() == Some('x') && chars.next().is_some_and(char::is_whitespace)
    }
}

/// Parse file contents into ordered task records.
///
/// Lines with no non-whitespace content are dropped (they are not written
/// back either). Order is preserved from the input.
pub fn parse_tasks(contents: &str) -> Vec<TaskRecord> {
    contents
        .lines()
        .filter(|line| line.chars().any(|c| !c.is_whitespace()))
        .map(TaskRecord::parse)
        .collect()
}
