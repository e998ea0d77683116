//! Contact domain model.
//!
//! # Responsibility
//! - Define the address-book record and its engagement metadata.
//! - Validate identity and display fields at construction and decode time.
//!
//! # Invariants
//! - `id` and `name` are never blank.
//! - `interaction_count` only moves forward, one step per recorded interaction.
//! - `avatar_ref` is opaque; core never interprets it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable contact key (for example `jeff-johnson`).
pub type ContactId = String;

/// Unix epoch milliseconds.
pub type EpochMillis = i64;

/// Validation errors for contact records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    BlankId,
    BlankName { id: ContactId },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "contact id must not be blank"),
            Self::BlankName { id } => write!(f, "contact `{id}` must have a non-blank name"),
        }
    }
}

impl Error for ContactValidationError {}

/// Address-book entry with engagement metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContactRecord")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// URL or local blob reference for the avatar image.
    pub avatar_ref: String,
    /// `None` means the user never called or chatted with this contact.
    pub last_interaction_at: Option<EpochMillis>,
    pub interaction_count: u32,
}

impl Contact {
    /// Creates a never-contacted entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        avatar_ref: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        let contact = Self {
            id: id.into(),
            name: name.into(),
            avatar_ref: avatar_ref.into(),
            last_interaction_at: None,
            interaction_count: 0,
        };
        contact.validate()?;
        Ok(contact)
    }

    /// Sets seeded engagement history.
    pub fn with_interactions(mut self, last_at: EpochMillis, count: u32) -> Self {
        self.last_interaction_at = Some(last_at);
        self.interaction_count = count;
        self
    }

    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.id.trim().is_empty() {
            return Err(ContactValidationError::BlankId);
        }
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::BlankName {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    pub fn has_interacted(&self) -> bool {
        self.last_interaction_at.is_some()
    }

    /// True when the contact was never engaged: no timestamp, or a zero count.
    pub fn is_unengaged(&self) -> bool {
        self.last_interaction_at.is_none() || self.interaction_count == 0
    }
}

#[derive(Deserialize)]
struct ContactRecord {
    id: ContactId,
    name: String,
    avatar_ref: String,
    #[serde(default)]
    last_interaction_at: Option<EpochMillis>,
    #[serde(default)]
    interaction_count: u32,
}

impl TryFrom<ContactRecord> for Contact {
    type Error = ContactValidationError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        let contact = Self {
            id: record.id,
            name: record.name,
            avatar_ref: record.avatar_ref,
            last_interaction_at: record.last_interaction_at,
            interaction_count: record.interaction_count,
        };
        contact.validate()?;
        Ok(contact)
    }
}
