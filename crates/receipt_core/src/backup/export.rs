//! Export side of the backup subsystem.
//!
//! # Responsibility
//! - Serialize an ordered entry snapshot into the `.receipts` payload.
//! - Write payloads to discoverable backup files.
//!
//! # Invariants
//! - Export never mutates the store; it only reads the snapshot it is given.
//! - Identical input (set and order) yields byte-identical payloads.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::ExportedEntry;
use crate::model::entry::Entry;

/// Export-side failure.
#[derive(Debug)]
pub enum BackupError {
    /// Payload serialization failed. Defensive: well-formed entry text always
    /// round-trips through JSON, so this indicates an internal error.
    Encode(serde_json::Error),
    /// Writing the backup file failed.
    Io(std::io::Error),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode backup payload: {err}"),
            Self::Io(err) => write!(f, "failed to write backup file: {err}"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<std::io::Error> for BackupError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Serializes entries into the portable payload format.
///
/// The emitted format is a bare JSON array of `{uuid, text, timestamp}`
/// objects, matching backups produced by earlier releases. Import also
/// accepts a versioned envelope; see `backup::import`.
pub fn export_entries(entries: &[Entry]) -> Result<Vec<u8>, BackupError> {
    let exported: Vec<ExportedEntry> = entries.iter().map(ExportedEntry::from).collect();
    let bytes = match serde_json::to_vec(&exported) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(
                "event=export module=backup status=error entry_count={} error_code=encode_failed error={err}",
                entries.len()
            );
            return Err(err.into());
        }
    };

    info!(
        "event=export module=backup status=ok entry_count={} payload_bytes={}",
        entries.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Returns the conventional backup file name for a generation time.
///
/// The timestamp lives in the file name only; it is not part of the payload,
/// so payload bytes stay deterministic.
pub fn backup_file_name(unix_seconds: u64) -> String {
    format!("ReceiptBackup_{unix_seconds}.receipts")
}

/// Exports entries and writes the payload to a `.receipts` file in `dir`.
///
/// Returns the path of the written file.
pub fn write_backup(dir: impl AsRef<Path>, entries: &[Entry]) -> Result<PathBuf, BackupError> {
    let bytes = export_entries(entries)?;

    let unix_seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let path = dir.as_ref().join(backup_file_name(unix_seconds));

    if let Err(err) = std::fs::write(&path, &bytes) {
        error!(
            "event=backup_write module=backup status=error path={} error_code=io_failed error={err}",
            path.display()
        );
        return Err(err.into());
    }

    info!(
        "event=backup_write module=backup status=ok path={} payload_bytes={}",
        path.display(),
        bytes.len()
    );
    Ok(path)
}
