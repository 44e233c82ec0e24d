//! Durable member storage with optimistic-concurrency updates.
//!
//! [`try_update`] is the write primitive: a conditional write gated on the
//! member's version token, reporting [`WriteOutcome`]. The merge-and-retry
//! policy lives one layer above in [`update`], so a single conflict and an
//! exhausted retry are separately observable.

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use crate::roster::types::{Crew, Member};

/// Outcome of the conditional write primitive.
#[derive(Debug)]
pub enum WriteOutcome {
    /// The write landed; carries the freshly stored record (bumped version).
    Applied(Member),
    /// The caller's version token is stale.
    Conflict,
    /// No member with that handle exists.
    Missing,
}

/// Failure modes of [`update`], after the single merge-and-retry.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("member not found: {0}")]
    NotFound(String),
    #[error("write conflict for {0} not resolved after retry")]
    ConflictExhausted(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

/// Upsert a member row. Used by roster seeding only — end users never create
/// members.
pub fn insert(conn: &Connection, member: &Member) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO members (handle, boat, captain, display_name, bio, city, insta, \
         photo, photo_file_id, user_id, chat_id, version, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14) \
         ON CONFLICT(handle) DO UPDATE SET boat = excluded.boat, captain = excluded.captain",
        params![
            member.handle,
            member.crew.boat,
            member.crew.captain,
            member.display_name,
            member.bio,
            member.city,
            member.insta,
            member.photo,
            member.photo_file_id,
            member.user_id,
            member.chat_id,
            member.version,
            member.created_at,
            member.updated_at,
        ],
    )?;
    Ok(())
}

/// Fetch every member. Feeds the in-memory index loader.
pub fn load_all(conn: &Connection) -> rusqlite::Result<Vec<Member>> {
    let mut stmt = conn.prepare(
        "SELECT handle, boat, captain, display_name, bio, city, insta, photo, \
         photo_file_id, user_id, chat_id, version, created_at, updated_at FROM members",
    )?;
    let members = stmt
        .query_map([], member_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members)
}

/// Durable read by normalized handle. The conflict re-read path — user-facing
/// lookups go through the in-memory index instead.
pub fn get(conn: &Connection, handle: &str) -> rusqlite::Result<Option<Member>> {
    conn.query_row(
        "SELECT handle, boat, captain, display_name, bio, city, insta, photo, \
         photo_file_id, user_id, chat_id, version, created_at, updated_at \
         FROM members WHERE handle = ?1",
        params![handle],
        member_from_row,
    )
    .optional()
}

/// Conditional write: applies the mutable columns iff the caller's version
/// token matches the stored one. Crew columns are never part of the payload.
pub fn try_update(conn: &Connection, member: &Member) -> Result<WriteOutcome, rusqlite::Error> {
    let now = chrono::Utc::now().to_rfc3339();
    let rows = conn.execute(
        "UPDATE members SET display_name = ?1, bio = ?2, city = ?3, insta = ?4, \
         photo = ?5, photo_file_id = ?6, user_id = ?7, chat_id = ?8, \
         version = version + 1, updated_at = ?9 \
         WHERE handle = ?10 AND version = ?11",
        params![
            member.display_name,
            member.bio,
            member.city,
            member.insta,
            member.photo,
            member.photo_file_id,
            member.user_id,
            member.chat_id,
            now,
            member.handle,
            member.version,
        ],
    )?;

    if rows == 1 {
        let stored = get(conn, &member.handle)?
            .expect("row updated a moment ago must exist");
        return Ok(WriteOutcome::Applied(stored));
    }

    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM members WHERE handle = ?1",
        params![member.handle],
        |row| row.get(0),
    )?;
    if exists {
        Ok(WriteOutcome::Conflict)
    } else {
        Ok(WriteOutcome::Missing)
    }
}

/// Persist a mutated member, recovering from a single stale-token conflict.
///
/// On conflict the current stored record is re-read and only the caller's
/// intended mutable fields (display name, chat id, user id, photo, cached
/// photo reference, external handle, bio) are re-applied to it before one
/// retry. A second conflict is surfaced as [`UpdateError::ConflictExhausted`].
pub fn update(conn: &Connection, member: &Member) -> Result<Member, UpdateError> {
    update_with(
        member,
        |m| try_update(conn, m),
        |handle| get(conn, handle),
    )
}

/// The retry policy itself, over an injected write primitive and re-read.
/// Kept separate so a double conflict is exercisable without a live race.
fn update_with<W, R>(member: &Member, mut write: W, reread: R) -> Result<Member, UpdateError>
where
    W: FnMut(&Member) -> Result<WriteOutcome, rusqlite::Error>,
    R: Fn(&str) -> Result<Option<Member>, rusqlite::Error>,
{
    match write(member)? {
        WriteOutcome::Applied(stored) => Ok(stored),
        WriteOutcome::Missing => Err(UpdateError::NotFound(member.handle.clone())),
        WriteOutcome::Conflict => {
            tracing::warn!(handle = %member.handle, "stale version token, merging and retrying");
            let fresh = reread(&member.handle)?
                .ok_or_else(|| UpdateError::NotFound(member.handle.clone()))?;
            let merged = merge_mutable(fresh, member);

            match write(&merged)? {
                WriteOutcome::Applied(stored) => Ok(stored),
                WriteOutcome::Conflict => {
                    Err(UpdateError::ConflictExhausted(member.handle.clone()))
                }
                WriteOutcome::Missing => Err(UpdateError::NotFound(member.handle.clone())),
            }
        }
    }
}

/// Re-apply the caller's mutable fields onto the freshest stored record.
/// Everything else (crew, city, timestamps, version) stays as stored.
fn merge_mutable(fresh: Member, intended: &Member) -> Member {
    Member {
        display_name: intended.display_name.clone(),
        chat_id: intended.chat_id,
        user_id: intended.user_id,
        photo: intended.photo.clone(),
        photo_file_id: intended.photo_file_id.clone(),
        insta: intended.insta.clone(),
        bio: intended.bio.clone(),
        ..fresh
    }
}

fn member_from_row(row: &Row) -> rusqlite::Result<Member> {
    Ok(Member {
        handle: row.get(0)?,
        crew: Crew {
            boat: row.get(1)?,
            captain: row.get(2)?,
        },
        display_name: row.get(3)?,
        bio: row.get(4)?,
        city: row.get(5)?,
        insta: row.get(6)?,
        photo: row.get(7)?,
        photo_file_id: row.get(8)?,
        user_id: row.get(9)?,
        chat_id: row.get(10)?,
        version: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}
