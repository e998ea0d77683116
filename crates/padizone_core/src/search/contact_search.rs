//! Name filter over ranked contacts.

use crate::model::contact::Contact;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Keeps contacts whose name contains `query`, preserving input order.
///
/// Matching is case-insensitive and whitespace-tolerant: runs of spaces in
/// either side collapse to one. A blank query keeps every contact.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let needle = normalize_search_text(query);
    if needle.is_empty() {
        return contacts.to_vec();
    }

    contacts
        .iter()
        .filter(|contact| normalize_search_text(&contact.name).contains(&needle))
        .cloned()
        .collect()
}

fn normalize_search_text(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(value.trim(), " ")
        .to_lowercase()
}
