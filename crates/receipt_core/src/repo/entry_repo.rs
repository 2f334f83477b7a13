//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and upsert APIs over canonical `entries` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `insert_entry` must validate text before any SQL mutation.
//! - `upsert_entry` is atomic per key: one statement, identity preserved.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::entry::{Entry, EntryId, EntryValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT uuid, text, created_at FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Outcome of an identity-keyed upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry with the key existed; a new row was created with that exact
    /// identity.
    Inserted,
    /// An entry with the key existed; its text and timestamp were overwritten
    /// in place.
    Updated,
}

/// Repository interface for entry storage.
///
/// All mutations assume a single logical writer; callers serialize restore
/// against other writes.
pub trait EntryRepository {
    /// Validates and persists a brand-new entry with a fresh identity.
    fn insert_entry(&self, text: &str, created_at_ms: i64) -> RepoResult<Entry>;
    /// Overwrites by key if present, else inserts with exactly that key.
    fn upsert_entry(&self, entry: &Entry) -> RepoResult<UpsertOutcome>;
    /// Removes an entry. Absent keys are a no-op, not an error.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    /// Removes every entry, returning how many were deleted.
    fn delete_all_entries(&self) -> RepoResult<usize>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// All entries in insertion order.
    fn list_entries(&self) -> RepoResult<Vec<Entry>>;
    fn count_entries(&self) -> RepoResult<u64>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn insert_entry(&self, text: &str, created_at_ms: i64) -> RepoResult<Entry> {
        let entry = Entry::new(text, created_at_ms)?;
        self.conn.execute(
            "INSERT INTO entries (uuid, text, created_at) VALUES (?1, ?2, ?3);",
            params![
                entry.uuid.to_string(),
                entry.text.as_str(),
                entry.created_at_ms
            ],
        )?;

        Ok(entry)
    }

    fn upsert_entry(&self, entry: &Entry) -> RepoResult<UpsertOutcome> {
        // Existence check and write are not one statement, but the write
        // itself is; under the single-writer contract the classification
        // cannot go stale between the two.
        let outcome = if self.get_entry(entry.uuid)?.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        };

        self.conn.execute(
            "INSERT INTO entries (uuid, text, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (uuid) DO UPDATE SET
                text = excluded.text,
                created_at = excluded.created_at;",
            params![
                entry.uuid.to_string(),
                entry.text.as_str(),
                entry.created_at_ms
            ],
        )?;

        Ok(outcome)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM entries WHERE uuid = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn delete_all_entries(&self) -> RepoResult<usize> {
        let deleted = self.conn.execute("DELETE FROM entries;", [])?;
        Ok(deleted)
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn list_entries(&self) -> RepoResult<Vec<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY rowid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn count_entries(&self) -> RepoResult<u64> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM entries;", [], |row| {
                    row.get::<_, u64>(0)
                })?;
        Ok(count)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in entries.uuid"))
    })?;

    Ok(Entry {
        uuid,
        text: row.get("text")?,
        created_at_ms: row.get("created_at")?,
    })
}
