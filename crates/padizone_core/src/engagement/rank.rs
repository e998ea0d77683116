//! Display ordering for the contact list.

use crate::model::contact::Contact;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns contacts in display order.
///
/// Order: contacts with an interaction timestamp first, newest first; then
/// higher interaction count; then name. The sort is stable, so contacts equal
/// on every key keep their input order.
pub fn rank(contacts: &[Contact]) -> Vec<Contact> {
    let mut ranked = contacts.to_vec();
    ranked.sort_by(compare_contacts);
    ranked
}

/// Comparator behind [`rank`].
pub fn compare_contacts(a: &Contact, b: &Contact) -> Ordering {
    let by_recency = match (a.last_interaction_at, b.last_interaction_at) {
        (Some(a_at), Some(b_at)) => b_at.cmp(&a_at),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_recency
        .then_with(|| b.interaction_count.cmp(&a.interaction_count))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Root-locale style name order.
///
/// Letters compare by base form first, ignoring accents and case, so `Émile`
/// sorts with the `E`s. Ties fall back to accents (unaccented first), then
/// case (lowercase first), then raw code points.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(base_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| b.cmp(a))
}

fn accent_key(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

fn base_key(name: &str) -> impl Iterator<Item = char> + '_ {
    accent_key(name).filter(|c| !is_combining_mark(*c))
}
