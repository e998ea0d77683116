//! Recent-notification events shown above the contact list.

use crate::model::contact::{ContactId, EpochMillis};
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    MissedCall,
}

/// Where tapping a notification leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    OpenConversation { contact_id: ContactId },
    StartVoiceCall { contact_id: ContactId },
}

/// One entry of the recent-notification strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub id: String,
    /// May reference a contact that is not in the store.
    pub contact_id: ContactId,
    pub kind: NotificationKind,
    /// Free-text summary, e.g. "Missed Call".
    pub content: String,
    pub occurred_at: EpochMillis,
}

impl NotificationEvent {
    pub fn new(
        id: impl Into<String>,
        contact_id: impl Into<ContactId>,
        kind: NotificationKind,
        content: impl Into<String>,
        occurred_at: EpochMillis,
    ) -> Self {
        Self {
            id: id.into(),
            contact_id: contact_id.into(),
            kind,
            content: content.into(),
            occurred_at,
        }
    }

    /// Messages open the conversation; missed calls call back by voice.
    pub fn action(&self) -> NotificationAction {
        let contact_id = self.contact_id.clone();
        match self.kind {
            NotificationKind::Message => NotificationAction::OpenConversation { contact_id },
            NotificationKind::MissedCall => NotificationAction::StartVoiceCall { contact_id },
        }
    }
}
