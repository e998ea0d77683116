use padizone_core::{should_suggest_reconnect, Contact, ReconnectPolicy};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;
const NOW: i64 = 1_750_000_000_000;

fn contact(id: &str, last: Option<i64>, count: u32) -> Contact {
    let mut contact = Contact::new(id, id.to_uppercase(), "").unwrap();
    contact.last_interaction_at = last;
    contact.interaction_count = count;
    contact
}

#[test]
fn empty_store_never_suggests() {
    assert!(!should_suggest_reconnect(&[], NOW));
    assert!(!ReconnectPolicy::after_days(1).should_suggest(&[], NOW));
}

#[test]
fn never_contacted_plus_stale_others_suggests() {
    let contacts = vec![
        contact("a", None, 0),
        contact("b", Some(NOW - 8 * DAY_MS), 5),
        contact("c", Some(NOW - 10 * DAY_MS), 2),
    ];
    assert!(should_suggest_reconnect(&contacts, NOW));
}

#[test]
fn fresh_oldest_interaction_suppresses_suggestion() {
    let stale = vec![contact("a", None, 0), contact("b", Some(NOW - 8 * DAY_MS), 5)];
    assert!(should_suggest_reconnect(&stale, NOW));

    let fresh = vec![contact("a", None, 0), contact("b", Some(NOW - HOUR_MS), 5)];
    assert!(!should_suggest_reconnect(&fresh, NOW));
}

#[test]
fn stale_but_uniformly_engaged_store_does_not_suggest() {
    let contacts = vec![
        contact("a", Some(NOW - 30 * DAY_MS), 3),
        contact("b", Some(NOW - 20 * DAY_MS), 1),
    ];
    assert!(!should_suggest_reconnect(&contacts, NOW));
}

#[test]
fn zero_count_with_timestamp_counts_as_unengaged() {
    let contacts = vec![contact("a", Some(NOW - 9 * DAY_MS), 0)];
    assert!(should_suggest_reconnect(&contacts, NOW));
}

#[test]
fn store_without_any_timestamps_never_suggests() {
    let contacts = vec![contact("a", None, 0), contact("b", None, 4)];
    assert!(!should_suggest_reconnect(&contacts, NOW));
}

#[test]
fn threshold_is_strictly_greater_than() {
    let exactly = vec![contact("a", None, 0), contact("b", Some(NOW - 7 * DAY_MS), 1)];
    assert!(!should_suggest_reconnect(&exactly, NOW));

    let just_over = vec![contact("a", None, 0), contact("b", Some(NOW - 7 * DAY_MS - 1), 1)];
    assert!(should_suggest_reconnect(&just_over, NOW));
}

#[test]
fn custom_policy_changes_threshold() {
    let contacts = vec![contact("a", None, 0), contact("b", Some(NOW - 2 * DAY_MS), 1)];
    assert!(!should_suggest_reconnect(&contacts, NOW));
    assert!(ReconnectPolicy::after_days(1).should_suggest(&contacts, NOW));
}
