//! Core domain logic for Padizone.
//! This crate is the single source of truth for contact engagement rules.

pub mod call;
pub mod clock;
pub mod config;
pub mod db;
pub mod engagement;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;

pub use call::{
    missed_call_note, CallKind, CallPhase, CallSession, IncomingCall, MediaConstraints,
    MediaDevices, MediaError, MediaStream, MissedCallReply, TrackKind,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CoreConfig;
pub use engagement::notifications::{visible_notifications, NotificationCard, VisibleNotification};
pub use engagement::rank::{compare_contacts, compare_names, rank};
pub use engagement::reconnect::{should_suggest_reconnect, ReconnectPolicy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactId, ContactValidationError, EpochMillis};
pub use model::notification::{NotificationAction, NotificationEvent, NotificationKind};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use repo::notification_repo::{NotificationRepository, SqliteNotificationRepository};
pub use search::contact_search::filter_contacts;
pub use service::contact_book::{Banner, ContactBook, ContactsSnapshot, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
