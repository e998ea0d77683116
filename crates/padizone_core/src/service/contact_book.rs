//! Contact book use-case service.
//!
//! # Responsibility
//! - Own the session store and funnel every mutation through
//!   `record_interaction`.
//! - Derive the contacts-screen snapshot (ranked list plus banner) on read.
//! - Push a fresh snapshot to subscribers after each state change.
//!
//! # Invariants
//! - Ranked order and reconnect state are never cached; each read recomputes
//!   them from the repository.
//! - Observers run synchronously after the mutation is fully applied.
//! - A failed mutation leaves the store and the dismissal flag untouched and
//!   notifies nobody.
//! - If deriving the snapshot fails after a successful mutation, observers
//!   miss that change; only an error log records it. The next successful
//!   push carries the full state again.

use crate::call::{CallKind, CallSession, IncomingCall, MediaDevices, MissedCallReply};
use crate::clock::Clock;
use crate::engagement::notifications::{visible_notifications, NotificationCard};
use crate::engagement::rank::rank;
use crate::engagement::reconnect::ReconnectPolicy;
use crate::model::contact::Contact;
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use crate::repo::notification_repo::NotificationRepository;
use crate::search::contact_search::filter_contacts;
use log::{error, info, warn};

/// What the strip above the contact list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// Reconnect prompt; replaces the notification strip while shown.
    Reconnect,
    RecentNotifications(Vec<NotificationCard>),
    Empty,
}

/// Everything the contacts screen renders, derived from one store read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsSnapshot {
    /// Contacts in display order.
    pub contacts: Vec<Contact>,
    pub banner: Banner,
}

impl ContactsSnapshot {
    pub fn shows_reconnect(&self) -> bool {
        matches!(self.banner, Banner::Reconnect)
    }
}

/// Handle returned by [`ContactBook::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&ContactsSnapshot)>;

/// Session contact store with derived views and change notification.
pub struct ContactBook<R, N, C> {
    contacts: R,
    notifications: N,
    clock: C,
    policy: ReconnectPolicy,
    suggestion_dismissed: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<R, N, C> ContactBook<R, N, C>
where
    R: ContactRepository,
    N: NotificationRepository,
    C: Clock,
{
    /// Creates a book with the default seven-day reconnect policy.
    pub fn new(contacts: R, notifications: N, clock: C) -> Self {
        Self {
            contacts,
            notifications,
            clock,
            policy: ReconnectPolicy::default(),
            suggestion_dismissed: false,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    pub fn contact(&self, id: &str) -> RepoResult<Option<Contact>> {
        self.contacts.get_contact(id)
    }

    pub fn ranked_contacts(&self) -> RepoResult<Vec<Contact>> {
        Ok(rank(&self.contacts.list_contacts()?))
    }

    /// Raw trigger value, ignoring any dismissal.
    pub fn should_suggest_reconnect(&self) -> RepoResult<bool> {
        let contacts = self.contacts.list_contacts()?;
        Ok(self.policy.should_suggest(&contacts, self.clock.now_ms()))
    }

    pub fn visible_notifications(&self) -> RepoResult<Vec<NotificationCard>> {
        let contacts = self.contacts.list_contacts()?;
        let events = self.notifications.list_events()?;
        Ok(visible_notifications(&events, &contacts)
            .into_iter()
            .map(NotificationCard::from)
            .collect())
    }

    /// Ranked contacts whose name matches `query`.
    pub fn search(&self, query: &str) -> RepoResult<Vec<Contact>> {
        Ok(filter_contacts(&self.ranked_contacts()?, query))
    }

    pub fn snapshot(&self) -> RepoResult<ContactsSnapshot> {
        let contacts = self.contacts.list_contacts()?;
        let show_reconnect = !self.suggestion_dismissed
            && self.policy.should_suggest(&contacts, self.clock.now_ms());

        let banner = if show_reconnect {
            Banner::Reconnect
        } else {
            let events = self.notifications.list_events()?;
            let cards = visible_notifications(&events, &contacts)
                .into_iter()
                .map(NotificationCard::from)
                .collect::<Vec<_>>();
            if cards.is_empty() {
                Banner::Empty
            } else {
                Banner::RecentNotifications(cards)
            }
        };

        Ok(ContactsSnapshot {
            contacts: rank(&contacts),
            banner,
        })
    }

    /// Stamps the current time on `id` and bumps its counter.
    ///
    /// # Errors
    /// - `RepoError::NotFound` for an unknown id; nothing changes.
    pub fn record_interaction(&mut self, id: &str) -> RepoResult<Contact> {
        let now = self.clock.now_ms();
        let updated = match self.contacts.record_interaction(id, now) {
            Ok(contact) => contact,
            Err(err) => {
                match &err {
                    RepoError::NotFound(_) => warn!(
                        "event=interaction_record module=service status=error error_code=contact_not_found"
                    ),
                    other => error!(
                        "event=interaction_record module=service status=error error={other}"
                    ),
                }
                return Err(err);
            }
        };

        info!(
            "event=interaction_record module=service status=ok interaction_count={}",
            updated.interaction_count
        );
        self.suggestion_dismissed = false;
        self.publish();
        Ok(updated)
    }

    /// Opening a chat counts as an interaction.
    pub fn open_conversation(&mut self, id: &str) -> RepoResult<Contact> {
        self.record_interaction(id)
    }

    /// Records the call as an interaction, then opens the call session.
    ///
    /// Unknown contacts fail before any device is touched.
    pub fn start_call<D: MediaDevices>(
        &mut self,
        devices: &mut D,
        id: &str,
        kind: CallKind,
    ) -> RepoResult<CallSession<D::Stream>> {
        let contact = self.record_interaction(id)?;
        Ok(CallSession::start(devices, contact.id, kind))
    }

    /// Opens the incoming-call screen for a known contact.
    ///
    /// # Errors
    /// - `RepoError::NotFound` for an unknown id.
    pub fn incoming_call(&self, id: &str) -> RepoResult<IncomingCall> {
        match self.contacts.get_contact(id)? {
            Some(contact) => Ok(IncomingCall::new(contact.id, contact.name)),
            None => Err(RepoError::NotFound(id.to_string())),
        }
    }

    /// Answering counts as an interaction, then switches to a voice call.
    pub fn answer_incoming<D: MediaDevices>(
        &mut self,
        devices: &mut D,
        call: IncomingCall,
    ) -> RepoResult<CallSession<D::Stream>> {
        self.record_interaction(call.contact_id())?;
        Ok(call.answer(devices))
    }

    /// Replying by message counts as an interaction.
    pub fn message_incoming(&mut self, call: IncomingCall) -> RepoResult<MissedCallReply> {
        self.record_interaction(call.contact_id())?;
        Ok(call.message())
    }

    /// Hides the reconnect prompt until the next recorded interaction.
    pub fn dismiss_suggestion(&mut self) {
        if self.suggestion_dismissed {
            return;
        }
        self.suggestion_dismissed = true;
        info!("event=suggestion_dismiss module=service status=ok");
        self.publish();
    }

    pub fn is_suggestion_dismissed(&self) -> bool {
        self.suggestion_dismissed
    }

    /// Registers `observer` to receive a snapshot after every state change.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&ContactsSnapshot) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = match self.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("event=snapshot_publish module=service status=error error={err}");
                return;
            }
        };
        for (_, observer) in self.observers.iter_mut() {
            observer(&snapshot);
        }
    }
}
