//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Seed, read and list contacts in seed order.
//! - Apply the interaction update as one atomic statement.
//!
//! # Invariants
//! - Write paths call `Contact::validate()` before SQL mutations.
//! - `record_interaction` never moves `last_interaction_at` backwards.
//! - Read paths reject invalid stored rows instead of masking them.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactValidationError, EpochMillis};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    avatar_ref,
    last_interaction_at,
    interaction_count
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by contact and notification storage.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    /// No contact with this id exists in the store.
    NotFound(ContactId),
    /// A record with this id was already seeded.
    Duplicate(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Duplicate(id) => write!(f, "record already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Duplicate(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
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

/// Maps a unique-constraint failure on insert to `Duplicate`.
pub(crate) fn insert_error(err: rusqlite::Error, id: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RepoError::Duplicate(id.to_string())
        }
        _ => err.into(),
    }
}

/// Repository interface for the session contact store.
pub trait ContactRepository {
    fn insert_contact(&self, contact: &Contact) -> RepoResult<()>;
    fn get_contact(&self, id: &str) -> RepoResult<Option<Contact>>;
    /// All contacts in seed order.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Stamps `at` (or keeps a later stored stamp) and bumps the counter by one.
    fn record_interaction(&self, id: &str, at: EpochMillis) -> RepoResult<Contact>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert_contact(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;

        self.conn
            .execute(
                "INSERT INTO contacts (
                    id,
                    name,
                    avatar_ref,
                    last_interaction_at,
                    interaction_count
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    contact.id.as_str(),
                    contact.name.as_str(),
                    contact.avatar_ref.as_str(),
                    contact.last_interaction_at,
                    contact.interaction_count,
                ],
            )
            .map_err(|err| insert_error(err, &contact.id))?;

        Ok(())
    }

    fn get_contact(&self, id: &str) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_contact_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn record_interaction(&self, id: &str, at: EpochMillis) -> RepoResult<Contact> {
        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                last_interaction_at = MAX(COALESCE(last_interaction_at, ?1), ?1),
                interaction_count = interaction_count + 1
             WHERE id = ?2;",
            params![at, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        self.get_contact(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("contact `{id}` vanished after interaction update"))
        })
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id: String = row.get("id")?;

    let raw_count: i64 = row.get("interaction_count")?;
    let interaction_count = u32::try_from(raw_count).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid interaction_count `{raw_count}` for contact `{id}`"
        ))
    })?;

    let contact = Contact {
        id,
        name: row.get("name")?,
        avatar_ref: row.get("avatar_ref")?,
        last_interaction_at: row.get("last_interaction_at")?,
        interaction_count,
    };
    contact.validate()?;
    Ok(contact)
}
