//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical record for logged entries.
//! - Validate user content at the creation boundary.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another entry.
//! - `created_at_ms` is assigned at creation and only ever rewritten by a
//!   restore that carries the same `uuid`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// Canonical persisted record: one free-text entry with its creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable global ID used for lookup and backup identity matching.
    pub uuid: EntryId,
    /// Free-form user text. Non-whitespace-only at creation time.
    pub text: String,
    /// Creation time in Unix epoch milliseconds.
    pub created_at_ms: i64,
}

/// Validation failure raised before any persistence is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// The entry text is empty after trimming leading/trailing whitespace.
    EmptyText,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "entry text must not be empty or whitespace-only"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    /// Creates a new entry with a generated stable ID.
    ///
    /// # Errors
    /// - `EntryValidationError::EmptyText` when `text` trimmed of leading and
    ///   trailing whitespace is empty.
    pub fn new(
        text: impl Into<String>,
        created_at_ms: i64,
    ) -> Result<Self, EntryValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self {
            uuid: Uuid::new_v4(),
            text,
            created_at_ms,
        })
    }

    /// Creates an entry with a caller-provided stable ID.
    ///
    /// Used by the restore path where identity already exists externally.
    /// Does not validate `text`: a backup may only contain content that was
    /// accepted at its original creation.
    pub fn with_id(uuid: EntryId, text: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            uuid,
            text: text.into(),
            created_at_ms,
        }
    }
}

/// Checks the creation-time content contract.
fn validate_text(text: &str) -> Result<(), EntryValidationError> {
    if text.trim().is_empty() {
        return Err(EntryValidationError::EmptyText);
    }
    Ok(())
}
