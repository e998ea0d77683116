//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose contacts-screen use cases to Dart via FRB.
//! - Hold the session contact book for the calling UI thread.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok=false` envelopes, never by unwinding.
//! - The session store is seeded once per thread and lives until exit.

use log::{error, warn};
use padizone_core::db::open_db_in_memory;
use padizone_core::seed::seed_demo;
use padizone_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Banner, Clock, Contact, ContactBook, CoreConfig, NotificationAction, NotificationCard,
    NotificationKind, SqliteContactRepository, SqliteNotificationRepository, SystemClock,
};
use rusqlite::Connection;
use std::cell::RefCell;

type SessionBook = ContactBook<
    SqliteContactRepository<'static>,
    SqliteNotificationRepository<'static>,
    SystemClock,
>;

thread_local! {
    static SESSION: Result<RefCell<SessionBook>, String> = open_session();
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Contact row as rendered by the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub id: String,
    pub name: String,
    pub avatar_ref: String,
    /// Epoch milliseconds of the last call or chat, if any.
    pub last_interaction_at: Option<i64>,
    pub interaction_count: u32,
}

/// One card of the recent-notification strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub id: String,
    pub contact_id: String,
    pub contact_name: String,
    pub avatar_ref: String,
    /// `message|missed_call`.
    pub kind: String,
    pub content: String,
    /// Navigation target on tap: `open_conversation|start_voice_call`.
    pub action: String,
}

/// Everything the contacts screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsScreenResponse {
    pub ok: bool,
    /// Contacts in display order.
    pub contacts: Vec<ContactItem>,
    /// When true the UI shows the reconnect prompt instead of notifications.
    pub show_reconnect: bool,
    pub notifications: Vec<NotificationItem>,
    pub message: String,
}

impl ContactsScreenResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            contacts: Vec::new(),
            show_reconnect: false,
            notifications: Vec::new(),
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub contact: Option<ContactItem>,
    pub message: String,
}

/// Search response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSearchResponse {
    pub items: Vec<ContactItem>,
    pub message: String,
}

/// Returns the current contacts-screen state.
///
/// # FFI contract
/// - Sync call over the in-memory session store.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_screen() -> ContactsScreenResponse {
    match with_session(|book| book.snapshot().map_err(|err| err.to_string())) {
        Ok(snapshot) => {
            let (show_reconnect, cards) = match snapshot.banner {
                Banner::Reconnect => (true, Vec::new()),
                Banner::RecentNotifications(cards) => (false, cards),
                Banner::Empty => (false, Vec::new()),
            };
            ContactsScreenResponse {
                ok: true,
                contacts: snapshot.contacts.iter().map(to_contact_item).collect(),
                show_reconnect,
                notifications: cards.iter().map(to_notification_item).collect(),
                message: String::new(),
            }
        }
        Err(err) => ContactsScreenResponse::failure(format!("contacts_screen failed: {err}")),
    }
}

/// Records a call or chat with `contact_id`.
///
/// # FFI contract
/// - Unknown ids return `ok=false` and leave the store unchanged.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn record_interaction(contact_id: String) -> ActionResponse {
    let contact_id = contact_id.trim().to_string();
    match with_session(|book| {
        book.record_interaction(&contact_id)
            .map_err(|err| err.to_string())
    }) {
        Ok(contact) => ActionResponse {
            ok: true,
            contact: Some(to_contact_item(&contact)),
            message: "Interaction recorded.".to_string(),
        },
        Err(err) => ActionResponse {
            ok: false,
            contact: None,
            message: format!("record_interaction failed: {err}"),
        },
    }
}

/// Hides the reconnect prompt until the next interaction and returns the
/// refreshed screen.
#[flutter_rust_bridge::frb(sync)]
pub fn dismiss_suggestion() -> ContactsScreenResponse {
    if let Err(err) = with_session(|book| {
        book.dismiss_suggestion();
        Ok(())
    }) {
        return ContactsScreenResponse::failure(format!("dismiss_suggestion failed: {err}"));
    }
    contacts_screen()
}

/// Filters ranked contacts by name.
#[flutter_rust_bridge::frb(sync)]
pub fn search_contacts(query: String) -> ContactSearchResponse {
    match with_session(|book| book.search(&query).map_err(|err| err.to_string())) {
        Ok(contacts) => {
            let items = contacts.iter().map(to_contact_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No results.".to_string()
            } else {
                format!("Found {} contact(s).", items.len())
            };
            ContactSearchResponse { items, message }
        }
        Err(err) => ContactSearchResponse {
            items: Vec::new(),
            message: format!("search_contacts failed: {err}"),
        },
    }
}

fn open_session() -> Result<RefCell<SessionBook>, String> {
    let config = CoreConfig::from_env().map_err(|err| format!("config failed: {err}"))?;
    if let Err(err) = config.init_logging() {
        // Logging is optional; the session still opens.
        warn!("event=logging_init module=ffi status=skipped error={err}");
    }

    let conn = open_db_in_memory().map_err(|err| {
        error!("event=session_open module=ffi status=error error={err}");
        format!("session store open failed: {err}")
    })?;
    // The session store backs this UI thread until process exit.
    let conn: &'static Connection = Box::leak(Box::new(conn));

    let contacts = SqliteContactRepository::new(conn);
    let notifications = SqliteNotificationRepository::new(conn);
    seed_demo(&contacts, &notifications, SystemClock.now_ms())
        .map_err(|err| format!("session seed failed: {err}"))?;

    Ok(RefCell::new(
        ContactBook::new(contacts, notifications, SystemClock).with_policy(config.reconnect),
    ))
}

fn with_session<T>(f: impl FnOnce(&mut SessionBook) -> Result<T, String>) -> Result<T, String> {
    SESSION.with(|session| match session {
        Ok(book) => {
            let mut book = book
                .try_borrow_mut()
                .map_err(|_| "session is busy".to_string())?;
            f(&mut book)
        }
        Err(err) => Err(err.clone()),
    })
}

fn to_contact_item(contact: &Contact) -> ContactItem {
    ContactItem {
        id: contact.id.clone(),
        name: contact.name.clone(),
        avatar_ref: contact.avatar_ref.clone(),
        last_interaction_at: contact.last_interaction_at,
        interaction_count: contact.interaction_count,
    }
}

fn to_notification_item(card: &NotificationCard) -> NotificationItem {
    NotificationItem {
        id: card.event.id.clone(),
        contact_id: card.contact.id.clone(),
        contact_name: card.contact.name.clone(),
        avatar_ref: card.contact.avatar_ref.clone(),
        kind: notification_kind_label(card.event.kind).to_string(),
        content: card.event.content.clone(),
        action: notification_action_label(&card.action()).to_string(),
    }
}

fn notification_kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Message => "message",
        NotificationKind::MissedCall => "missed_call",
    }
}

fn notification_action_label(action: &NotificationAction) -> &'static str {
    match action {
        NotificationAction::OpenConversation { .. } => "open_conversation",
        NotificationAction::StartVoiceCall { .. } => "start_voice_call",
    }
}
