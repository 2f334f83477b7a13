//! Core domain logic for the Receipt entry log.
//! This crate is the single source of truth for entry identity, persistence
//! and backup/restore invariants; presentation layers stay thin on top.

pub mod backup;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use backup::{
    backup_file_name, export_entries, restore_entries, write_backup, BackupError, ExportedEntry,
    RestoreError, RestoreReport,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{Entry, EntryId, EntryValidationError};
pub use repo::entry_repo::{
    EntryRepository, RepoError, RepoResult, SqliteEntryRepository, UpsertOutcome,
};
pub use service::entry_service::{EntryService, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
