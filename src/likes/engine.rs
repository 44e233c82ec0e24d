//! Like toggling and match detection.
//!
//! The single place that encodes liking semantics, so direct commands and
//! button callbacks behave identically. Pure orchestration over
//! [`crate::likes::store`] — no durable state of its own.

use rusqlite::Connection;
use serde::Serialize;

use crate::likes::store;

/// Outcome of a like/unlike toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The toggle was applied. `newly_liked` is `true` only when a like
    /// created an edge that did not exist before — the signal for
    /// at-most-once match notification.
    Applied { newly_liked: bool },
    /// Self-targeting toggles mutate nothing.
    RejectedSelf,
}

/// Toggle the directed like `from -> to` on or off.
///
/// Idempotent in both directions: re-liking is a state no-op, unliking a
/// non-existent edge is a no-op. `from == to` is rejected without touching
/// the store.
pub fn toggle_like(
    conn: &Connection,
    from: &str,
    to: &str,
    want_liked: bool,
) -> rusqlite::Result<ToggleOutcome> {
    if from == to {
        return Ok(ToggleOutcome::RejectedSelf);
    }

    let newly_liked = if want_liked {
        store::add_edge(conn, from, to)?
    } else {
        store::remove_edge(conn, from, to)?;
        false
    };

    Ok(ToggleOutcome::Applied { newly_liked })
}

/// A match holds iff directed likes exist in both directions.
///
/// The two reads are independent; a concurrent toggle between them can yield
/// a transient false negative, re-evaluated on the next interaction.
pub fn is_match(conn: &Connection, a: &str, b: &str) -> rusqlite::Result<bool> {
    Ok(store::has_edge(conn, a, b)? && store::has_edge(conn, b, a)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_db() -> Connection {
        db::open_memory_database().unwrap()
    }

    #[test]
    fn like_then_reciprocate_makes_match() {
        let conn = test_db();

        toggle_like(&conn, "alice", "bob", true).unwrap();
        assert!(!is_match(&conn, "alice", "bob").unwrap());
        assert!(store::has_edge(&conn, "alice", "bob").unwrap());
        assert!(!store::has_edge(&conn, "bob", "alice").unwrap());

        toggle_like(&conn, "bob", "alice", true).unwrap();
        assert!(is_match(&conn, "alice", "bob").unwrap());
        assert!(is_match(&conn, "bob", "alice").unwrap());
    }

    #[test]
    fn toggle_is_idempotent() {
        let conn = test_db();

        assert_eq!(
            toggle_like(&conn, "alice", "bob", true).unwrap(),
            ToggleOutcome::Applied { newly_liked: true }
        );
        assert_eq!(
            toggle_like(&conn, "alice", "bob", true).unwrap(),
            ToggleOutcome::Applied { newly_liked: false }
        );
        assert_eq!(store::edges_from(&conn, "alice").unwrap().len(), 1);

        // unliking a non-existent edge is a no-op
        toggle_like(&conn, "alice", "bob", false).unwrap();
        assert_eq!(
            toggle_like(&conn, "alice", "bob", false).unwrap(),
            ToggleOutcome::Applied { newly_liked: false }
        );
    }

    #[test]
    fn self_like_is_rejected_without_mutation() {
        let conn = test_db();

        assert_eq!(
            toggle_like(&conn, "alice", "alice", true).unwrap(),
            ToggleOutcome::RejectedSelf
        );
        assert!(!store::has_edge(&conn, "alice", "alice").unwrap());
        assert!(store::edges_from(&conn, "alice").unwrap().is_empty());
    }

    #[test]
    fn unlike_breaks_match_one_direction_only() {
        let conn = test_db();
        toggle_like(&conn, "alice", "bob", true).unwrap();
        toggle_like(&conn, "bob", "alice", true).unwrap();
        assert!(is_match(&conn, "alice", "bob").unwrap());

        toggle_like(&conn, "alice", "bob", false).unwrap();
        assert!(!is_match(&conn, "alice", "bob").unwrap());
        assert!(store::has_edge(&conn, "bob", "alice").unwrap());
    }

    #[test]
    fn match_equals_edge_conjunction() {
        let conn = test_db();
        let pairs = [("a", "b"), ("b", "a"), ("a", "c"), ("c", "b")];
        toggle_like(&conn, "a", "b", true).unwrap();
        toggle_like(&conn, "b", "a", true).unwrap();
        toggle_like(&conn, "c", "b", true).unwrap();

        for (x, y) in pairs {
            let expected = store::has_edge(&conn, x, y).unwrap()
                && store::has_edge(&conn, y, x).unwrap();
            assert_eq!(is_match(&conn, x, y).unwrap(), expected, "pair ({x},{y})");
        }
    }
}
