//! Backup and restore subsystem.
//!
//! # Responsibility
//! - Define the portable `.receipts` payload shape shared by export and
//!   import.
//! - Export: snapshot the store into a self-contained byte payload.
//! - Import: merge a payload back into the store by identity, reporting
//!   partial failure instead of aborting on the first bad record.
//!
//! # Invariants
//! - Payload timestamps are integer Unix epoch milliseconds; no locale or
//!   timezone-dependent encoding.
//! - A payload is an independent snapshot with no back-reference to the
//!   store.
//! - Malformed payloads are rejected before any store mutation.

use serde::{Deserialize, Serialize};

use crate::model::entry::{Entry, EntryId};

pub mod export;
pub mod import;

pub use export::{backup_file_name, export_entries, write_backup, BackupError};
pub use import::{restore_entries, RestoreError, RestoreReport};

/// One record as it appears in a `.receipts` payload.
///
/// Field names are the external wire contract (`uuid`, `text`, `timestamp`)
/// and must not change without a payload version bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedEntry {
    pub uuid: EntryId,
    pub text: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl From<&Entry> for ExportedEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            uuid: entry.uuid,
            text: entry.text.clone(),
            timestamp: entry.created_at_ms,
        }
    }
}

impl From<ExportedEntry> for Entry {
    fn from(exported: ExportedEntry) -> Self {
        Entry::with_id(exported.uuid, exported.text, exported.timestamp)
    }
}
