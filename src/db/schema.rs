//! SQL DDL for all flotilla tables.
//!
//! Defines the `members`, `likes_from`, `likes_to`, and `schema_meta` tables.
//! Likes live in two projections of the same logical relation so they can be
//! queried efficiently from either side; both are written by a single
//! internal write path in [`crate::likes::store`]. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

/// All schema DDL statements for flotilla's core tables.
const SCHEMA_SQL: &str = r#"
-- Roster
CREATE TABLE IF NOT EXISTS members (
    handle TEXT PRIMARY KEY,
    boat TEXT NOT NULL,
    captain TEXT NOT NULL,
    display_name TEXT,
    bio TEXT,
    city TEXT,
    insta TEXT,
    photo TEXT,
    photo_file_id TEXT,
    user_id INTEGER,
    chat_id INTEGER,
    version INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_members_boat ON members(boat);
CREATE INDEX IF NOT EXISTS idx_members_captain ON members(captain);

-- Likes, by-source projection
CREATE TABLE IF NOT EXISTS likes_from (
    src TEXT NOT NULL,
    dst TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (src, dst)
);

-- Likes, by-destination projection
CREATE TABLE IF NOT EXISTS likes_to (
    dst TEXT NOT NULL,
    src TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (dst, src)
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '2')",
        [],
    )?;

    Ok(())
}
