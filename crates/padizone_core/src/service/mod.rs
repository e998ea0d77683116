//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and pure derivations into screen-level APIs.
//! - Keep FFI and CLI layers decoupled from storage details.

pub mod contact_book;
