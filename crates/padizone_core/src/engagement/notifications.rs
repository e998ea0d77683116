//! Recent-notification strip: events joined with their contacts.

use crate::model::contact::Contact;
use crate::model::notification::{NotificationAction, NotificationEvent};
use std::collections::HashMap;

/// Borrowed event/contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleNotification<'a> {
    pub event: &'a NotificationEvent,
    pub contact: &'a Contact,
}

/// Owned event/contact pair carried by snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCard {
    pub event: NotificationEvent,
    pub contact: Contact,
}

impl NotificationCard {
    pub fn action(&self) -> NotificationAction {
        self.event.action()
    }
}

impl From<VisibleNotification<'_>> for NotificationCard {
    fn from(value: VisibleNotification<'_>) -> Self {
        Self {
            event: value.event.clone(),
            contact: value.contact.clone(),
        }
    }
}

/// Pairs each event with its contact, dropping events whose contact is not in
/// `contacts`. Seed order is preserved; `occurred_at` is not used for ordering.
pub fn visible_notifications<'a>(
    events: &'a [NotificationEvent],
    contacts: &'a [Contact],
) -> Vec<VisibleNotification<'a>> {
    let by_id = contacts
        .iter()
        .map(|contact| (contact.id.as_str(), contact))
        .collect::<HashMap<_, _>>();

    events
        .iter()
        .filter_map(|event| {
            by_id
                .get(event.contact_id.as_str())
                .map(|contact| VisibleNotification {
                    event,
                    contact: *contact,
                })
        })
        .collect()
}
