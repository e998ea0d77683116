//! Reconnect prompt trigger.
//!
//! The prompt shows when the least recently contacted person has gone stale
//! AND somebody in the store was never engaged at all. Uniformly infrequent
//! but engaged address books do not trigger it.

use crate::model::contact::{Contact, EpochMillis};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Default staleness threshold in days.
pub const DEFAULT_RECONNECT_AFTER_DAYS: u32 = 7;

/// Staleness threshold for the reconnect prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Oldest interaction must be strictly older than this.
    pub stale_after_ms: i64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::after_days(DEFAULT_RECONNECT_AFTER_DAYS)
    }
}

impl ReconnectPolicy {
    pub fn after_days(days: u32) -> Self {
        Self {
            stale_after_ms: i64::from(days) * MILLIS_PER_DAY,
        }
    }

    /// Evaluates the trigger against a store snapshot at `now`.
    ///
    /// With no timestamped contacts the oldest interaction is `now`, so an
    /// empty or never-used store never triggers.
    pub fn should_suggest(&self, contacts: &[Contact], now: EpochMillis) -> bool {
        let oldest_interaction = contacts
            .iter()
            .filter_map(|contact| contact.last_interaction_at)
            .min()
            .unwrap_or(now);
        let has_unengaged = contacts.iter().any(Contact::is_unengaged);

        now.saturating_sub(oldest_interaction) > self.stale_after_ms && has_unengaged
    }
}

/// [`ReconnectPolicy::should_suggest`] with the default seven-day threshold.
pub fn should_suggest_reconnect(contacts: &[Contact], now: EpochMillis) -> bool {
    ReconnectPolicy::default().should_suggest(contacts, now)
}
