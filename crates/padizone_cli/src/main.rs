//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `padizone_core` linkage outside the Flutter runtime.
//! - Print the seeded contacts screen in a stable text layout.

use padizone_core::db::open_db_in_memory;
use padizone_core::seed::seed_demo;
use padizone_core::{
    Banner, Clock, ContactBook, ContactsSnapshot, CoreConfig, SqliteContactRepository,
    SqliteNotificationRepository, SystemClock,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("padizone_core ping={}", padizone_core::ping());
    println!("padizone_core version={}", padizone_core::core_version());

    match contacts_screen() {
        Ok(snapshot) => {
            print_snapshot(&snapshot);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("padizone_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn contacts_screen() -> Result<ContactsSnapshot, String> {
    let config = CoreConfig::from_env()?;
    config.init_logging()?;

    let conn = open_db_in_memory().map_err(|err| err.to_string())?;
    let contacts = SqliteContactRepository::new(&conn);
    let notifications = SqliteNotificationRepository::new(&conn);
    seed_demo(&contacts, &notifications, SystemClock.now_ms()).map_err(|err| err.to_string())?;

    ContactBook::new(contacts, notifications, SystemClock)
        .with_policy(config.reconnect)
        .snapshot()
        .map_err(|err| err.to_string())
}

fn print_snapshot(snapshot: &ContactsSnapshot) {
    match &snapshot.banner {
        Banner::Reconnect => println!("banner=reconnect"),
        Banner::RecentNotifications(cards) => {
            println!("banner=notifications count={}", cards.len());
            for card in cards {
                println!(
                    "  notification id={} contact={} content={:?}",
                    card.event.id, card.contact.id, card.event.content
                );
            }
        }
        Banner::Empty => println!("banner=empty"),
    }

    println!("contacts count={}", snapshot.contacts.len());
    for (position, contact) in snapshot.contacts.iter().enumerate() {
        println!(
            "  {:>2}. {:<16} interactions={}",
            position + 1,
            contact.name,
            contact.interaction_count
        );
    }
}
