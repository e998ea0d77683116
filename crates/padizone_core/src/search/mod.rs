//! Contact lookup for the contacts screen search box.
//!
//! # Responsibility
//! - Filter an already ranked list by name without reordering it.

pub mod contact_search;
