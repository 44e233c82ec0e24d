//! Durable directed-like storage with dual indexing.
//!
//! One logical relation, two projections: `likes_from` keyed by source and
//! `likes_to` keyed by destination, so either side queries efficiently. Both
//! projections are maintained only by the write path in this module. The two
//! physical writes are not atomic across tables; a failure between them
//! leaves the projections divergent, surfaced as that call's error and never
//! silently repaired.
//!
//! TODO: reconciliation pass that re-derives `likes_to` from `likes_from`
//! after a partial dual write.

use rusqlite::{params, Connection};

/// Idempotent insert of the directed edge `from -> to` into both projections.
///
/// Returns `true` iff the by-source edge was newly created — re-liking an
/// existing edge is a state no-op and returns `false`.
pub fn add_edge(conn: &Connection, from: &str, to: &str) -> rusqlite::Result<bool> {
    let now = chrono::Utc::now().to_rfc3339();
    let created = conn.execute(
        "INSERT OR IGNORE INTO likes_from (src, dst, created_at) VALUES (?1, ?2, ?3)",
        params![from, to, now],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO likes_to (dst, src, created_at) VALUES (?1, ?2, ?3)",
        params![to, from, now],
    )?;
    Ok(created == 1)
}

/// Idempotent delete of the directed edge `from -> to` from both projections.
/// Removing a non-existent edge is not an error.
pub fn remove_edge(conn: &Connection, from: &str, to: &str) -> rusqlite::Result<()> {
    conn.execute(
        "DELETE FROM likes_from WHERE src = ?1 AND dst = ?2",
        params![from, to],
    )?;
    conn.execute(
        "DELETE FROM likes_to WHERE dst = ?1 AND src = ?2",
        params![to, from],
    )?;
    Ok(())
}

/// Existence check against the by-source projection — the building block for
/// match detection.
pub fn has_edge(conn: &Connection, from: &str, to: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM likes_from WHERE src = ?1 AND dst = ?2",
        params![from, to],
        |row| row.get(0),
    )
}

/// Handles this identity has liked. Re-queried on every call; storage order.
pub fn edges_from(conn: &Connection, from: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT dst FROM likes_from WHERE src = ?1")?;
    let edges = stmt
        .query_map(params![from], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(edges)
}

/// Handles that have liked this identity. Re-queried on every call.
pub fn edges_to(conn: &Connection, to: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT src FROM likes_to WHERE dst = ?1")?;
    let edges = stmt
        .query_map(params![to], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(edges)
}
