//! Repository layer over the session store.
//!
//! # Responsibility
//! - Define data access contracts used by the contact book service.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Listing returns records in seed order; display ordering is derived later.
//! - Missing records surface as `RepoError::NotFound`, never as silent success.

pub mod contact_repo;
pub mod notification_repo;
