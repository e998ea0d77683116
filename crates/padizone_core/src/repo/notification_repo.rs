//! Notification event repository contracts and SQLite implementation.

use crate::model::notification::{NotificationEvent, NotificationKind};
use crate::repo::contact_repo::{insert_error, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for seeded notification events.
pub trait NotificationRepository {
    fn insert_event(&self, event: &NotificationEvent) -> RepoResult<()>;
    /// All events in seed order, including ones whose contact is missing.
    fn list_events(&self) -> RepoResult<Vec<NotificationEvent>>;
}

/// SQLite-backed notification repository.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn insert_event(&self, event: &NotificationEvent) -> RepoResult<()> {
        if event.id.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "notification id must not be blank".to_string(),
            ));
        }

        self.conn
            .execute(
                "INSERT INTO notification_events (id, contact_id, kind, content, occurred_at)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    event.id.as_str(),
                    event.contact_id.as_str(),
                    kind_to_db(event.kind),
                    event.content.as_str(),
                    event.occurred_at,
                ],
            )
            .map_err(|err| insert_error(err, &event.id))?;

        Ok(())
    }

    fn list_events(&self) -> RepoResult<Vec<NotificationEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, contact_id, kind, content, occurred_at
             FROM notification_events
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<NotificationEvent> {
    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid notification kind `{kind_text}` in notification_events.kind"
        ))
    })?;

    Ok(NotificationEvent {
        id: row.get("id")?,
        contact_id: row.get("contact_id")?,
        kind,
        content: row.get("content")?,
        occurred_at: row.get("occurred_at")?,
    })
}

fn kind_to_db(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Message => "message",
        NotificationKind::MissedCall => "missed_call",
    }
}

fn parse_kind(value: &str) -> Option<NotificationKind> {
    match value {
        "message" => Some(NotificationKind::Message),
        "missed_call" => Some(NotificationKind::MissedCall),
        _ => None,
    }
}
