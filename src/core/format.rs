//! Line formatting: completion rewrites, project tags, new task lines.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::core::issue::Issue;

static PRIORITY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\(([A-Z])\)\s*").unwrap());

/// Rewrite a task line to its completed form.
///
/// A leading `(A)`-style priority marker is stripped from the front and kept
/// as a trailing `pri:A` tag, since completed tasks do not retain the active
/// priority syntax:
///
/// - `(A) Fix bug` → `x <date> Fix bug pri:A`
/// - `Fix bug` → `x <date> Fix bug`
pub fn complete_line(text: &str, date: NaiveDate) -> String {
    if let Some(caps) = PRIORITY_MARKER.captures(text) {
        let rest = &text[caps.get(0).map_or(0, |m| m.end())..];
        let letter = &caps[1];
        return format!("x {} {} pri:{}", date.format("%Y-%m-%d"), rest, letter);
    }
    format!("x {} {}", date.format("%Y-%m-%d"), text)
}

/// Upper-camel-case a repository or milestone name for use as a `+Tag`.
///
/// Words are split on non-alphanumeric boundaries; each word keeps its first
/// letter uppercased and the rest lowercased: `my-cool-repo` → `MyCoolRepo`.
pub fn project_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Build the text of a task line for a newly discovered open issue:
/// `<createdDate> <title> issue:<id> +<ProjectTag>[ +<MilestoneTag>]`.
pub fn new_task_line(issue: &Issue) -> String {
    let mut line = format!(
        "{} {} issue:{} +{}",
        issue.created_at.format("%Y-%m-%d"),
        issue.title,
        issue.id(),
        project_case(issue.repo_short_name()),
    );
    if let Some(milestone) = &issue.milestone {
        line.push_str(" +");
        line.push_str(&project_case(milestone));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, open_issue};

    #[test]
    fn complete_line_prefixes_marker_and_date() {
        assert_eq!(
            complete_line("Fix bug issue:x/y#1", date(2020, 1, 2)),
            "x 2020-01-02 Fix bug issue:x/y#1"
        );
    }

    #[test]
    fn complete_line_moves_priority_to_trailing_tag() {
        assert_eq!(
            complete_line("(A) Fix bug issue:x/y#1", date(2020, 1, 2)),
            "x 2020-01-02 Fix bug issue:x/y#1 pri:A"
        );
    }

    #[test]
    fn complete_line_handles_leading_whitespace_before_priority() {
        assert_eq!(
            complete_line("  (B) tidy docs", date(2021, 6, 30)),
            "x 2021-06-30 tidy docs pri:B"
        );
    }

    #[test]
    fn complete_line_ignores_lowercase_parenthetical() {
        assert_eq!(
            complete_line("(a) not a priority", date(2020, 1, 2)),
            "x 2020-01-02 (a) not a priority"
        );
    }

    #[test]
    fn project_case_splits_on_non_alphanumeric() {
        assert_eq!(project_case("my-cool-repo"), "MyCoolRepo");
        assert_eq!(project_case("v1.2 release"), "V12Release");
        assert_eq!(project_case("WIDGETS"), "Widgets");
    }

    #[test]
    fn new_task_line_includes_milestone_tag_when_present() {
        let mut issue = open_issue("acme/my-cool-repo", 12, "Ship it", "2021-03-04T10:00:00Z");
        issue.milestone = Some("v1.0 beta".to_string());
        assert_eq!(
            new_task_line(&issue),
            "2021-03-04 Ship it issue:acme/my-cool-repo#12 +MyCoolRepo +V10Beta"
        );
    }

    #[test]
    fn new_task_line_without_milestone() {
        let issue = open_issue("acme/widgets", 7, "Fix it", "2021-03-04T10:00:00Z");
        assert_eq!(
            new_task_line(&issue),
            "2021-03-04 Fix it issue:acme/widgets#7 +Widgets"
        );
    }
}
