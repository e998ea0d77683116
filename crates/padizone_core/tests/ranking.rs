use padizone_core::{compare_contacts, rank, Contact};
use std::cmp::Ordering;

fn contact(id: &str, name: &str, last: Option<i64>, count: u32) -> Contact {
    let mut contact = Contact::new(id, name, "").unwrap();
    contact.last_interaction_at = last;
    contact.interaction_count = count;
    contact
}

fn ids(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn rank_is_deterministic_and_does_not_touch_input() {
    let contacts = vec![
        contact("c", "Carol", None, 2),
        contact("a", "Alice", Some(10), 1),
        contact("b", "Bob", Some(30), 9),
        contact("d", "Dan", None, 2),
    ];
    let original = contacts.clone();

    let first = rank(&contacts);
    let second = rank(&contacts);
    assert_eq!(first, second);
    assert_eq!(contacts, original);
    assert_eq!(ids(&first), vec!["b", "a", "c", "d"]);
}

#[test]
fn timestamped_contacts_precede_untimestamped_regardless_of_count() {
    let contacts = vec![
        contact("busy", "Busy", None, 500),
        contact("once", "Once", Some(1), 0),
    ];

    assert_eq!(ids(&rank(&contacts)), vec!["once", "busy"]);
    assert_eq!(compare_contacts(&contacts[1], &contacts[0]), Ordering::Less);
}

#[test]
fn newer_timestamp_sorts_first() {
    let contacts = vec![
        contact("old", "Old", Some(100), 9),
        contact("new", "New", Some(200), 1),
    ];
    assert_eq!(ids(&rank(&contacts)), vec!["new", "old"]);
}

#[test]
fn count_breaks_timestamp_ties_and_orders_never_contacted() {
    let contacts = vec![
        contact("low", "Low", Some(500), 1),
        contact("high", "High", Some(500), 4),
        contact("quiet", "Quiet", None, 0),
        contact("loud", "Loud", None, 3),
    ];
    assert_eq!(ids(&rank(&contacts)), vec!["high", "low", "loud", "quiet"]);
}

#[test]
fn equal_keys_fall_back_to_case_insensitive_name() {
    let contacts = vec![
        contact("t", "tim brown", None, 0),
        contact("k", "Kate Madison", None, 0),
        contact("j", "Jack Richards", None, 0),
        contact("r", "Rene Wells", Some(7), 2),
        contact("q", "Alice", Some(7), 2),
    ];
    assert_eq!(ids(&rank(&contacts)), vec!["q", "r", "j", "k", "t"]);
}

#[test]
fn identical_keys_keep_input_order() {
    let contacts = vec![
        contact("first", "Sam", None, 1),
        contact("second", "Sam", None, 1),
    ];
    assert_eq!(ids(&rank(&contacts)), vec!["first", "second"]);

    let reversed = vec![contacts[1].clone(), contacts[0].clone()];
    assert_eq!(ids(&rank(&reversed)), vec!["second", "first"]);
}

#[test]
fn empty_input_ranks_to_empty() {
    assert!(rank(&[]).is_empty());
}

#[test]
fn accented_names_rank_with_their_base_letter() {
    let contacts = vec![
        contact("z", "Zoe", None, 0),
        contact("a", "Ángela", None, 0),
        contact("b", "Bob", None, 0),
        contact("e", "Émile", None, 0),
    ];

    assert_eq!(ids(&rank(&contacts)), vec!["a", "b", "e", "z"]);
}
