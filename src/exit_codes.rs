//! Stable exit codes for the CLI.

/// Run succeeded; file reconciled and backup written.
pub const OK: i32 = 0;
/// Run failed with the original file untouched (read, fetch, config, or
/// backup-rename failure).
pub const FAILURE: i32 = 1;
/// The final write failed after the backup rename: the live file may be
/// missing or partial, the original content is in the `.bak` file.
pub const BACKUP_ONLY: i32 = 2;
