//! Pure derivations over the contact store.
//!
//! # Responsibility
//! - Rank contacts for display.
//! - Decide whether the reconnect prompt should show.
//! - Join notification events with their contacts.
//!
//! # Invariants
//! - Every function here is pure: same input, same output, no mutation.
//! - Derived views are recomputed on read and never stored.

pub mod notifications;
pub mod rank;
pub mod reconnect;
