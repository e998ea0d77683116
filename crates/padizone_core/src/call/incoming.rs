//! Incoming-call screen.

use super::media::MediaDevices;
use super::session::{CallKind, CallSession};
use crate::model::contact::ContactId;
use crate::model::notification::NotificationAction;
use log::info;

/// Note prefilled into the conversation when the callee answers by message.
pub fn missed_call_note(caller_name: &str) -> String {
    format!("📞 Call from {caller_name} was missed.")
}

/// Conversation to open after replying to a call with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedCallReply {
    pub action: NotificationAction,
    pub note: String,
}

/// A ringing call from a contact, waiting for the user to pick an action.
///
/// Every action consumes the value: the screen closes once one is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingCall {
    contact_id: ContactId,
    caller_name: String,
}

impl IncomingCall {
    pub fn new(contact_id: impl Into<ContactId>, caller_name: impl Into<String>) -> Self {
        Self {
            contact_id: contact_id.into(),
            caller_name: caller_name.into(),
        }
    }

    pub fn contact_id(&self) -> &str {
        &self.contact_id
    }

    pub fn caller_name(&self) -> &str {
        &self.caller_name
    }

    pub fn status_label(&self) -> &'static str {
        "Incoming call..."
    }

    /// Picks up as a voice call with the same contact.
    pub fn answer<D: MediaDevices>(self, devices: &mut D) -> CallSession<D::Stream> {
        info!("event=incoming_call_answer module=call status=ok");
        CallSession::start(devices, self.contact_id, CallKind::Voice)
    }

    pub fn decline(self) {
        info!("event=incoming_call_decline module=call status=ok");
    }

    /// Closes the screen; the reminder itself is left to the platform.
    pub fn remind_later(self) {
        info!("event=incoming_call_remind module=call status=ok");
    }

    /// Replies with a message instead of answering.
    pub fn message(self) -> MissedCallReply {
        info!("event=incoming_call_message module=call status=ok");
        MissedCallReply {
            note: missed_call_note(&self.caller_name),
            action: NotificationAction::OpenConversation {
                contact_id: self.contact_id,
            },
        }
    }
}
