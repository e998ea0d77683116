//! Domain model for the contacts screen.
//!
//! # Responsibility
//! - Define contact records with engagement metadata.
//! - Define recent-notification events that reference contacts by id.
//!
//! # Invariants
//! - `Contact::id` is unique within a session store.
//! - `Contact::interaction_count` never decreases.
//! - Notification events may reference missing contacts; readers filter them.

pub mod contact;
pub mod notification;
