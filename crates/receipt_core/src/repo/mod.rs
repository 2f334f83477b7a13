//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the entry-store data access contract.
//! - Isolate SQLite query details from service/backup orchestration.
//!
//! # Invariants
//! - Repository writes enforce content validation before persistence.
//! - Repository APIs return semantic errors in addition to DB transport
//!   errors.

pub mod entry_repo;
