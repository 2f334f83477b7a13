//! Domain model for receipt entries.
//!
//! # Responsibility
//! - Define the canonical persisted record shape.
//! - Enforce content validation at the creation boundary.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Entry content is never whitespace-only at creation time.

pub mod entry;
