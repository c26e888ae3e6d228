//! Reading and backup-then-rewrite persistence of the todo.txt file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::task::{TaskRecord, parse_tasks};

/// Failure in the persist phase.
///
/// The two variants differ in what survives on disk: a backup failure leaves
/// the original file untouched, while a write failure after the backup rename
/// leaves the live file missing or partial with the original content only in
/// the backup. The binary maps them to distinct exit codes.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("back up {} to {}: {source}", path.display(), backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "write {} after backup; original content preserved at {}: {source}",
        path.display(),
        backup.display()
    )]
    Write {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },
}

impl PersistError {
    /// Whether the original file has already been moved to the backup path,
    /// i.e. the live file can no longer be trusted.
    pub fn backup_taken(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

/// Path of the backup written alongside `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Read and parse the todo file into ordered task records.
pub fn read_tasks(path: &Path) -> Result<Vec<TaskRecord>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(parse_tasks(&contents))
}

/// Persist the reconciled records: rename the original to `<path>.bak`
/// (overwriting any previous backup), then write the records' text joined by
/// newlines, trailing newline included, to the original path.
///
/// The rename comes first so a write failure can never lose the original
/// content. If the rename itself fails, nothing is written.
pub fn persist(path: &Path, tasks: &[TaskRecord]) -> Result<(), PersistError> {
    let backup = backup_path(path);
    fs::rename(path, &backup).map_err(|source| PersistError::Backup {
        path: path.to_path_buf(),
        backup: backup.clone(),
        source,
    })?;
    debug!(backup = %backup.display(), "original moved to backup");

    let mut data = tasks
        .iter()
        .map(|task| task.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    data.push('\n');
    fs::write(path, data).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        backup,
        source,
    })
}
