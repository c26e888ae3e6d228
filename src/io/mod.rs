//! I/O collaborators: the todo file, the GitHub issue source, and config.

pub mod config;
pub mod github;
pub mod todo_file;
