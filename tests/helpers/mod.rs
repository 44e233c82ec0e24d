#![allow(dead_code)]

use flotilla::db;
use flotilla::roster::index::RosterIndex;
use flotilla::roster::store;
use flotilla::roster::types::{Crew, Member};
use flotilla::service::DirectoryService;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Insert a roster member with the given crew. Returns the stored record.
pub fn seed_member(conn: &Connection, handle: &str, boat: &str, captain: &str) -> Member {
    let member = Member::new(
        handle,
        Crew {
            boat: boat.into(),
            captain: captain.into(),
        },
    );
    store::insert(conn, &member).unwrap();
    member
}

/// Build a directory service over a fresh in-memory store seeded with the
/// given (handle, boat, captain) triples. The returned Arcs share the
/// service's connection and index so tests can inspect both sides.
pub fn build_directory(
    members: &[(&str, &str, &str)],
) -> (Arc<Mutex<Connection>>, Arc<RosterIndex>, DirectoryService) {
    let conn = test_db();
    for (handle, boat, captain) in members {
        seed_member(&conn, handle, boat, captain);
    }

    let db = Arc::new(Mutex::new(conn));
    let index = Arc::new(RosterIndex::new());
    {
        let conn = db.lock().unwrap();
        index
            .reload_with(|| store::load_all(&conn).map_err(Into::into))
            .unwrap();
    }

    let service = DirectoryService::new(Arc::clone(&db), Arc::clone(&index));
    (db, index, service)
}
