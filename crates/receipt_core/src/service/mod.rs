//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and backup calls into the API consumed by the
//!   presentation layer.
//! - Keep UI layers decoupled from storage and payload details.

pub mod entry_service;
