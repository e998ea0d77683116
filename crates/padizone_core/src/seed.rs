//! Session seed data for the contacts screen.
//!
//! Timestamps are relative to the `now` passed in, so a freshly seeded store
//! always looks the same regardless of wall-clock time.

use crate::model::contact::{Contact, ContactValidationError, EpochMillis};
use crate::model::notification::{NotificationEvent, NotificationKind};
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use crate::repo::notification_repo::NotificationRepository;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

const AVATAR_BASE: &str = "https://via.placeholder.com/150";

const SEED_CONTACTS: &[(&str, &str, &str)] = &[
    ("jeff-johnson", "Jeff Johnson", "00CED1/FFFFFF?text=JJ"),
    ("kate-madison", "Kate Madison", "40E0D0/FFFFFF?text=KM"),
    ("john-doe", "John Doe", "7FFFD4/000000?text=JD"),
    ("jane-smith", "Jane Smith", "20B2AA/FFFFFF?text=JS"),
    ("tim-brown", "Tim Brown", "66CDAA/000000?text=TB"),
    ("kelly-williams", "Kelly Williams", "008080/FFFFFF?text=KW"),
    ("rene-wells", "Rene Wells", "4682B4/FFFFFF?text=RW"),
    ("jack-richards", "Jack Richards", "5F9EA0/FFFFFF?text=JR"),
    ("katherine-moss", "Katherine Moss", "87CEEB/000000?text=KM"),
];

/// `(contact id, age of last interaction, interaction count)`.
const SEED_HISTORY: &[(&str, i64, u32)] = &[
    ("jeff-johnson", 0, 10),
    ("kate-madison", 3 * DAY_MS, 5),
    ("jane-smith", 2 * HOUR_MS, 8),
    ("kelly-williams", 30 * MINUTE_MS, 7),
];

/// Nine contacts, four of them with interaction history.
pub fn demo_contacts(now: EpochMillis) -> Result<Vec<Contact>, ContactValidationError> {
    SEED_CONTACTS
        .iter()
        .map(|(id, name, avatar)| -> Result<Contact, ContactValidationError> {
            let contact = Contact::new(*id, *name, format!("{AVATAR_BASE}/{avatar}"))?;
            let history = SEED_HISTORY
                .iter()
                .find(|(history_id, _, _)| history_id == id);
            Ok(match history {
                Some((_, age, count)) => contact.with_interactions(now - age, *count),
                None => contact,
            })
        })
        .collect()
}

/// Four recent events, newest first.
pub fn demo_notifications(now: EpochMillis) -> Vec<NotificationEvent> {
    vec![
        NotificationEvent::new(
            "notif1",
            "jeff-johnson",
            NotificationKind::Message,
            "Hey, are you free for a quick call?",
            now - 2 * MINUTE_MS,
        ),
        NotificationEvent::new(
            "notif2",
            "kate-madison",
            NotificationKind::MissedCall,
            "Missed Call",
            now - 5 * MINUTE_MS,
        ),
        NotificationEvent::new(
            "notif3",
            "jane-smith",
            NotificationKind::Message,
            "Got your message!",
            now - 10 * MINUTE_MS,
        ),
        NotificationEvent::new(
            "notif4",
            "tim-brown",
            NotificationKind::Message,
            "Long time no see!",
            now - 15 * MINUTE_MS,
        ),
    ]
}

/// Writes the demo contacts and events into empty repositories.
pub fn seed_demo<C, N>(contacts: &C, notifications: &N, now: EpochMillis) -> RepoResult<()>
where
    C: ContactRepository,
    N: NotificationRepository,
{
    for contact in demo_contacts(now)? {
        contacts.insert_contact(&contact)?;
    }
    for event in demo_notifications(now) {
        notifications.insert_event(&event)?;
    }
    Ok(())
}
