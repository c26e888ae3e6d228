//! Deterministic, pure reconciliation logic.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! task and issue records and return deterministic outputs suitable for tests.

pub mod format;
pub mod issue;
pub mod reconcile;
pub mod task;
