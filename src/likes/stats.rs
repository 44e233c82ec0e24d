use rusqlite::{params, Connection};
use serde::Serialize;

/// Like activity counts for one member.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MemberStats {
    pub likes_sent: u64,
    pub likes_received: u64,
    pub matches: u64,
}

/// Aggregate counts for the whole directory.
#[derive(Debug, Serialize)]
pub struct DirectoryStats {
    pub members: u64,
    pub boats: u64,
    pub likes: u64,
    pub matches: u64,
}

/// Per-member like/match counts.
///
/// Matches are counted as reciprocated pairs in the by-source projection, so
/// the figure stays consistent with [`crate::likes::engine::is_match`].
pub fn member_stats(conn: &Connection, handle: &str) -> rusqlite::Result<MemberStats> {
    let likes_sent: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes_from WHERE src = ?1",
        params![handle],
        |row| row.get(0),
    )?;
    let likes_received: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes_to WHERE dst = ?1",
        params![handle],
        |row| row.get(0),
    )?;
    let matches: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes_from a \
         JOIN likes_from b ON b.src = a.dst AND b.dst = a.src \
         WHERE a.src = ?1",
        params![handle],
        |row| row.get(0),
    )?;

    Ok(MemberStats {
        likes_sent: likes_sent as u64,
        likes_received: likes_received as u64,
        matches: matches as u64,
    })
}

/// Directory-wide counts for the `stats` command.
pub fn directory_stats(conn: &Connection) -> rusqlite::Result<DirectoryStats> {
    let members: i64 =
        conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
    let boats: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT boat || ' (' || captain || ')') FROM members",
        [],
        |row| row.get(0),
    )?;
    let likes: i64 =
        conn.query_row("SELECT COUNT(*) FROM likes_from", [], |row| row.get(0))?;
    // The self-join counts each mutual pair once per direction.
    let mutual_edges: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes_from a \
         JOIN likes_from b ON b.src = a.dst AND b.dst = a.src",
        [],
        |row| row.get(0),
    )?;

    Ok(DirectoryStats {
        members: members as u64,
        boats: boats as u64,
        likes: likes as u64,
        matches: (mutual_edges / 2) as u64,
    })
}
