//! Import/merge side of the backup subsystem.
//!
//! # Responsibility
//! - Parse and validate `.receipts` payloads before touching the store.
//! - Merge payload records by identity: overwrite matching uuids in place,
//!   recreate missing uuids exactly.
//! - Report per-record failures without abandoning the rest of the payload.
//!
//! # Invariants
//! - A payload that fails to parse is applied zero times, never partially.
//! - Payload order is preserved during the merge.
//! - Re-importing the same payload leaves the store contents unchanged
//!   (records shift from inserted to updated in the report).

use log::{info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

use super::ExportedEntry;
use crate::db::DbError;
use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::{EntryRepository, RepoError, UpsertOutcome};

/// Highest payload envelope version this binary understands.
///
/// Legacy payloads are a bare array with no version field and are treated as
/// version 0.
pub const LATEST_PAYLOAD_VERSION: u32 = 1;

/// Import-side failure.
#[derive(Debug)]
pub enum RestoreError {
    /// The payload is structurally invalid. Nothing was applied.
    Decode(serde_json::Error),
    /// The payload declares an envelope version newer than this binary
    /// supports. Nothing was applied.
    UnsupportedVersion { found: u32, latest_supported: u32 },
    /// The store itself became unusable mid-restore. Records before
    /// `failed_at` were applied; processing stopped there.
    Store { failed_at: EntryId, source: DbError },
}

impl Display for RestoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "malformed backup payload: {err}"),
            Self::UnsupportedVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "backup payload version {found} is newer than supported {latest_supported}"
            ),
            Self::Store { failed_at, source } => {
                write!(f, "storage failed while restoring entry {failed_at}: {source}")
            }
        }
    }
}

impl Error for RestoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::UnsupportedVersion { .. } => None,
            Self::Store { source, .. } => Some(source),
        }
    }
}

/// Structured outcome of a restore.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestoreReport {
    /// Payload records that did not exist in the store and were created with
    /// their original identity.
    pub inserted: usize,
    /// Payload records whose uuid already existed; text and timestamp were
    /// overwritten from the payload.
    pub updated: usize,
    /// Uuids whose persistence failed individually. The rest of the payload
    /// was still processed.
    pub failed: Vec<EntryId>,
}

impl RestoreReport {
    /// Whether every payload record was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Payload envelope shapes accepted on import.
///
/// The versioned form must come first: an object is never a valid bare
/// array, so the two arms are unambiguous.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Versioned {
        version: u32,
        entries: Vec<ExportedEntry>,
    },
    Legacy(Vec<ExportedEntry>),
}

fn parse_payload(bytes: &[u8]) -> Result<Vec<ExportedEntry>, RestoreError> {
    let payload: Payload = serde_json::from_slice(bytes).map_err(RestoreError::Decode)?;

    match payload {
        Payload::Legacy(entries) => Ok(entries),
        Payload::Versioned { version, entries } => {
            if version > LATEST_PAYLOAD_VERSION {
                return Err(RestoreError::UnsupportedVersion {
                    found: version,
                    latest_supported: LATEST_PAYLOAD_VERSION,
                });
            }
            Ok(entries)
        }
    }
}

/// Merges a `.receipts` payload into the store.
///
/// The whole payload is parsed before the first write, so a malformed
/// payload leaves the store untouched. Records are then upserted in payload
/// order: per-record storage failures are collected in the report and
/// processing continues; a store-wide fault aborts with the failure point.
///
/// The caller must hold the single-writer exclusion for the full duration.
pub fn restore_entries(
    bytes: &[u8],
    repo: &impl EntryRepository,
) -> Result<RestoreReport, RestoreError> {
    let exported = parse_payload(bytes)?;
    let entry_count = exported.len();
    info!("event=restore module=backup status=start entry_count={entry_count}");

    let mut report = RestoreReport::default();
    for exported_entry in exported {
        let entry = Entry::from(exported_entry);
        match repo.upsert_entry(&entry) {
            Ok(UpsertOutcome::Inserted) => report.inserted += 1,
            Ok(UpsertOutcome::Updated) => report.updated += 1,
            Err(RepoError::Db(db_err)) if db_err.is_store_wide() => {
                warn!(
                    "event=restore module=backup status=error error_code=store_unavailable failed_at={} error={db_err}",
                    entry.uuid
                );
                return Err(RestoreError::Store {
                    failed_at: entry.uuid,
                    source: db_err,
                });
            }
            Err(err) => {
                // Metadata only: entry text stays out of the logs.
                warn!(
                    "event=restore module=backup status=record_failed uuid={} error={err}",
                    entry.uuid
                );
                report.failed.push(entry.uuid);
            }
        }
    }

    info!(
        "event=restore module=backup status=ok entry_count={entry_count} inserted={} updated={} failed={}",
        report.inserted,
        report.updated,
        report.failed.len()
    );
    Ok(report)
}
