use padizone_core::db::open_db_in_memory;
use padizone_core::seed::{demo_contacts, seed_demo};
use padizone_core::{
    Banner, CallKind, CallPhase, Contact, ContactBook, ContactRepository, ContactsSnapshot,
    ManualClock, MediaConstraints, MediaDevices, MediaError, MediaStream, NotificationEvent,
    NotificationKind, NotificationRepository, ReconnectPolicy, RepoError,
    SqliteContactRepository, SqliteNotificationRepository, TrackKind,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;
const NOW: i64 = 1_750_000_000_000;

type Book<'a> = ContactBook<
    SqliteContactRepository<'a>,
    SqliteNotificationRepository<'a>,
    &'a ManualClock,
>;

fn book<'a>(conn: &'a Connection, clock: &'a ManualClock) -> Book<'a> {
    ContactBook::new(
        SqliteContactRepository::new(conn),
        SqliteNotificationRepository::new(conn),
        clock,
    )
}

fn insert(conn: &Connection, id: &str, name: &str, last: Option<i64>, count: u32) {
    let mut contact = Contact::new(id, name, format!("avatar://{id}")).unwrap();
    contact.last_interaction_at = last;
    contact.interaction_count = count;
    SqliteContactRepository::new(conn)
        .insert_contact(&contact)
        .unwrap();
}

fn insert_event(conn: &Connection, id: &str, contact_id: &str, kind: NotificationKind) {
    SqliteNotificationRepository::new(conn)
        .insert_event(&NotificationEvent::new(id, contact_id, kind, "content", NOW))
        .unwrap();
}

fn ids(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.id.as_str()).collect()
}

/// Store where the reconnect prompt is due: `a` never contacted, `b` stale.
fn stale_store(conn: &Connection) {
    insert(conn, "a", "Amy", None, 0);
    insert(conn, "b", "Ben", Some(NOW - 8 * DAY_MS), 5);
    insert_event(conn, "n1", "b", NotificationKind::Message);
}

#[test]
fn record_interaction_reorders_ranked_contacts() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "jeff", "Jeff", Some(NOW - HOUR_MS), 10);
    insert(&conn, "tim", "Tim", None, 0);
    let mut book = book(&conn, &clock);

    assert_eq!(ids(&book.ranked_contacts().unwrap()), vec!["jeff", "tim"]);

    clock.advance(1_000);
    let updated = book.record_interaction("tim").unwrap();
    assert_eq!(updated.interaction_count, 1);
    assert_eq!(updated.last_interaction_at, Some(NOW + 1_000));
    assert_eq!(ids(&book.ranked_contacts().unwrap()), vec!["tim", "jeff"]);
}

#[test]
fn record_interaction_unknown_id_is_a_reported_no_op() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    stale_store(&conn);
    let mut book = book(&conn, &clock);

    let calls = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&calls);
    book.subscribe(move |_| *seen.borrow_mut() += 1);
    let before = book.snapshot().unwrap();

    let err = book.record_interaction("missing").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == "missing"));
    assert_eq!(book.snapshot().unwrap(), before);
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn record_interaction_increments_by_one_and_keeps_timestamp_monotonic() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "kate", "Kate", Some(NOW), 5);
    let mut book = book(&conn, &clock);

    clock.set(NOW - DAY_MS);
    let updated = book.record_interaction("kate").unwrap();
    assert_eq!(updated.interaction_count, 6);
    assert_eq!(updated.last_interaction_at, Some(NOW));
}

#[test]
fn snapshot_shows_reconnect_banner_instead_of_notifications() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    stale_store(&conn);
    let book = book(&conn, &clock);

    assert!(book.should_suggest_reconnect().unwrap());
    let snapshot = book.snapshot().unwrap();
    assert!(snapshot.shows_reconnect());
    assert_eq!(ids(&snapshot.contacts), vec!["b", "a"]);
    assert_eq!(book.visible_notifications().unwrap().len(), 1);
}

#[test]
fn interaction_with_stale_contact_clears_reconnect_banner() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    stale_store(&conn);
    let mut book = book(&conn, &clock);

    book.record_interaction("b").unwrap();

    let snapshot = book.snapshot().unwrap();
    assert!(!snapshot.shows_reconnect());
    match snapshot.banner {
        Banner::RecentNotifications(cards) => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].contact.id, "b");
        }
        other => panic!("expected notifications, got {other:?}"),
    }
}

#[test]
fn dismissal_lasts_until_next_interaction() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    stale_store(&conn);
    insert(&conn, "c", "Cleo", Some(NOW - 30 * DAY_MS), 1);
    let mut book = book(&conn, &clock);

    book.dismiss_suggestion();
    assert!(book.is_suggestion_dismissed());
    assert!(!book.snapshot().unwrap().shows_reconnect());
    assert!(book.should_suggest_reconnect().unwrap());

    // `c` is still thirty days stale, so the prompt comes back.
    book.record_interaction("b").unwrap();
    assert!(!book.is_suggestion_dismissed());
    assert!(book.snapshot().unwrap().shows_reconnect());
}

#[test]
fn empty_banner_when_every_event_dangles() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "jeff", "Jeff", Some(NOW), 1);
    insert_event(&conn, "n1", "deleted", NotificationKind::MissedCall);
    let book = book(&conn, &clock);

    assert_eq!(book.snapshot().unwrap().banner, Banner::Empty);
}

#[test]
fn empty_store_has_no_banner_and_no_suggestion() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    let book = book(&conn, &clock);

    assert!(!book.should_suggest_reconnect().unwrap());
    assert_eq!(
        book.snapshot().unwrap(),
        ContactsSnapshot {
            contacts: Vec::new(),
            banner: Banner::Empty,
        }
    );
}

#[test]
fn observers_receive_fresh_snapshots_until_unsubscribed() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    stale_store(&conn);
    let mut book = book(&conn, &clock);

    let received = Rc::new(RefCell::new(Vec::<ContactsSnapshot>::new()));
    let sink = Rc::clone(&received);
    let subscription = book.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

    book.record_interaction("a").unwrap();
    book.dismiss_suggestion();
    book.dismiss_suggestion();

    {
        let received = received.borrow();
        assert_eq!(received.len(), 2);
        assert_eq!(ids(&received[0].contacts), vec!["a", "b"]);
        assert_eq!(received[0].contacts[0].interaction_count, 1);
    }

    assert!(book.unsubscribe(subscription));
    assert!(!book.unsubscribe(subscription));
    book.record_interaction("b").unwrap();
    assert_eq!(received.borrow().len(), 2);
}

#[test]
fn custom_policy_is_applied() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "a", "Amy", None, 0);
    insert(&conn, "b", "Ben", Some(NOW - 2 * DAY_MS), 5);

    let book = book(&conn, &clock).with_policy(ReconnectPolicy::after_days(1));
    assert_eq!(book.policy(), ReconnectPolicy::after_days(1));
    assert!(book.snapshot().unwrap().shows_reconnect());
}

#[test]
fn search_filters_ranked_contacts() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "kate", "Kate Madison", Some(NOW - DAY_MS), 5);
    insert(&conn, "katherine", "Katherine  Moss", Some(NOW), 1);
    insert(&conn, "tim", "Tim Brown", None, 0);
    let book = book(&conn, &clock);

    assert_eq!(ids(&book.search("  KAT ").unwrap()), vec!["katherine", "kate"]);
    assert_eq!(ids(&book.search("katherine moss").unwrap()), vec!["katherine"]);
    assert_eq!(book.search("").unwrap().len(), 3);
    assert!(book.search("zed").unwrap().is_empty());
}

#[test]
fn open_conversation_counts_as_interaction() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "jane", "Jane", None, 0);
    let mut book = book(&conn, &clock);

    let contact = book.open_conversation("jane").unwrap();
    assert_eq!(contact.interaction_count, 1);
    assert_eq!(book.contact("jane").unwrap(), Some(contact));
}

#[derive(Debug)]
struct NullStream;

impl MediaStream for NullStream {
    fn set_track_enabled(&mut self, _kind: TrackKind, _enabled: bool) -> usize {
        1
    }

    fn stop(&mut self) {}
}

#[derive(Default)]
struct CountingDevices {
    acquired: usize,
}

impl MediaDevices for CountingDevices {
    type Stream = NullStream;

    fn acquire(&mut self, _constraints: MediaConstraints) -> Result<NullStream, MediaError> {
        self.acquired += 1;
        Ok(NullStream)
    }
}

#[test]
fn start_call_records_interaction_then_opens_session() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "kate", "Kate", None, 0);
    let mut book = book(&conn, &clock);
    let mut devices = CountingDevices::default();

    let call = book
        .start_call(&mut devices, "kate", CallKind::Voice)
        .unwrap();
    assert_eq!(call.contact_id(), "kate");
    assert_eq!(call.phase(), CallPhase::Ringing);
    assert_eq!(devices.acquired, 1);
    assert_eq!(
        book.contact("kate").unwrap().unwrap().last_interaction_at,
        Some(NOW)
    );
}

#[test]
fn start_call_with_unknown_contact_touches_no_device() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    let mut book = book(&conn, &clock);
    let mut devices = CountingDevices::default();

    let err = book
        .start_call(&mut devices, "ghost", CallKind::Video)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert_eq!(devices.acquired, 0);
}

#[test]
fn incoming_call_resolves_caller_name() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "kate", "Kate Madison", None, 0);
    let book = book(&conn, &clock);

    let incoming = book.incoming_call("kate").unwrap();
    assert_eq!(incoming.caller_name(), "Kate Madison");
    assert!(matches!(
        book.incoming_call("ghost").unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn answering_incoming_call_records_interaction() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "kate", "Kate", None, 0);
    let mut book = book(&conn, &clock);
    let mut devices = CountingDevices::default();

    let incoming = book.incoming_call("kate").unwrap();
    let call = book.answer_incoming(&mut devices, incoming).unwrap();
    assert_eq!(call.kind(), CallKind::Voice);
    assert_eq!(devices.acquired, 1);

    let stored = book.contact("kate").unwrap().unwrap();
    assert_eq!(stored.interaction_count, 1);
    assert_eq!(stored.last_interaction_at, Some(NOW));
}

#[test]
fn messaging_incoming_call_records_interaction() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "jeff", "Jeff", Some(NOW - DAY_MS), 2);
    let mut book = book(&conn, &clock);

    let incoming = book.incoming_call("jeff").unwrap();
    let reply = book.message_incoming(incoming).unwrap();
    assert_eq!(reply.note, "📞 Call from Jeff was missed.");
    assert_eq!(book.contact("jeff").unwrap().unwrap().interaction_count, 3);
}

#[test]
fn declining_incoming_call_leaves_contact_untouched() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    insert(&conn, "jeff", "Jeff", None, 0);
    let book = book(&conn, &clock);

    book.incoming_call("jeff").unwrap().decline();
    book.incoming_call("jeff").unwrap().remind_later();
    let stored = book.contact("jeff").unwrap().unwrap();
    assert_eq!(stored.interaction_count, 0);
    assert_eq!(stored.last_interaction_at, None);
}

#[test]
fn demo_seed_shows_all_notifications_and_no_prompt() {
    let conn = open_db_in_memory().unwrap();
    let clock = ManualClock::new(NOW);
    let contacts_repo = SqliteContactRepository::new(&conn);
    let events_repo = SqliteNotificationRepository::new(&conn);
    seed_demo(&contacts_repo, &events_repo, NOW).unwrap();
    let book = book(&conn, &clock);

    assert_eq!(demo_contacts(NOW).unwrap().len(), 9);
    let snapshot = book.snapshot().unwrap();
    assert_eq!(
        ids(&snapshot.contacts[..5]),
        vec!["jeff-johnson", "kelly-williams", "jane-smith", "kate-madison", "jack-richards"]
    );
    match snapshot.banner {
        Banner::RecentNotifications(cards) => assert_eq!(cards.len(), 4),
        other => panic!("expected notifications, got {other:?}"),
    }
}
