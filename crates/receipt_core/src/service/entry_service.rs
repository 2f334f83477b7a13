//! Entry use-case service.
//!
//! # Responsibility
//! - Provide the stable entry CRUD and backup/restore entry points consumed
//!   by the presentation layer.
//! - Delegate persistence to repository implementations and payload work to
//!   the backup module.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - All mutations assume the caller serializes writers; a restore must not
//!   run concurrently with any other mutation on the same store.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::backup::{export_entries, restore_entries, write_backup, BackupError, RestoreError, RestoreReport};
use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};

/// Failure surface for the combined backup/restore entry points.
///
/// CRUD methods return repository errors unchanged; only the operations that
/// cross the repository/payload boundary need this wrapper.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Backup(BackupError),
    Restore(RestoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Backup(err) => write!(f, "{err}"),
            Self::Restore(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Backup(err) => Some(err),
            Self::Restore(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<BackupError> for ServiceError {
    fn from(value: BackupError) -> Self {
        Self::Backup(value)
    }
}

impl From<RestoreError> for ServiceError {
    fn from(value: RestoreError) -> Self {
        Self::Restore(value)
    }
}

/// Use-case service wrapper for entry CRUD and backup/restore.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new entry stamped with the current wall-clock time.
    ///
    /// # Errors
    /// - Validation error when `text` is whitespace-only; the store is
    ///   unchanged.
    /// - Persistence error when the synchronous write fails.
    pub fn create_entry(&self, text: impl AsRef<str>) -> RepoResult<Entry> {
        self.create_entry_at(text.as_ref(), now_epoch_ms())
    }

    /// Creates a new entry with an explicit creation timestamp.
    pub fn create_entry_at(&self, text: &str, created_at_ms: i64) -> RepoResult<Entry> {
        self.repo.insert_entry(text, created_at_ms)
    }

    /// Deletes an entry by stable ID. Absent IDs are a no-op.
    pub fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        self.repo.delete_entry(id)
    }

    /// Deletes every entry, returning how many were removed.
    pub fn delete_all_entries(&self) -> RepoResult<usize> {
        self.repo.delete_all_entries()
    }

    /// Lists all entries in insertion order.
    ///
    /// Chronological presentation order is the caller's concern.
    pub fn list_entries(&self) -> RepoResult<Vec<Entry>> {
        self.repo.list_entries()
    }

    /// Returns the number of stored entries.
    pub fn entry_count(&self) -> RepoResult<u64> {
        self.repo.count_entries()
    }

    /// Serializes a point-in-time snapshot of all entries into the portable
    /// payload format.
    pub fn export_all(&self) -> Result<Vec<u8>, ServiceError> {
        let snapshot = self.repo.list_entries()?;
        Ok(export_entries(&snapshot)?)
    }

    /// Exports all entries and writes them to a timestamped `.receipts`
    /// file in `dir`, returning the file path.
    pub fn backup_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ServiceError> {
        let snapshot = self.repo.list_entries()?;
        Ok(write_backup(dir, &snapshot)?)
    }

    /// Merges a previously exported payload into the store.
    ///
    /// See `backup::import::restore_entries` for the merge and partial
    /// failure contract. The caller must not run other mutations while this
    /// executes.
    pub fn import_from(&self, bytes: &[u8]) -> Result<RestoreReport, ServiceError> {
        Ok(restore_entries(bytes, &self.repo)?)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
