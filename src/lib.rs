//! Reconcile a todo.txt file with the GitHub issues assigned to you.
//!
//! The tool merges two inputs — the lines of a local todo.txt file and the
//! flat list of issues assigned to the authenticated user — and rewrites the
//! file: closed or unassigned issues mark their task lines complete, open
//! issues without a task line get one appended. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (line parsing, the two-pass
//!   reconciliation, line formatting). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting collaborators (todo file backup/rewrite, the
//!   GitHub issue source, config loading). Isolated to enable mocking in
//!   tests via the [`io::github::IssueSource`] trait.
//!
//! The [`sync`] module coordinates core logic with I/O to implement the one
//! CLI operation.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod sync;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
