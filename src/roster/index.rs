//! In-memory roster read index.
//!
//! The sole read path for user-facing lookups: a handle-keyed map refreshed
//! only by explicit reload, trading staleness-after-external-edit for O(1)
//! reads. Roster membership changes via administrative reload, not user
//! traffic, so the trade holds.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::roster::types::{normalize_handle, Member};

/// Shared-read index of the roster, keyed by normalized handle.
#[derive(Debug, Default)]
pub struct RosterIndex {
    members: RwLock<HashMap<String, Member>>,
}

impl RosterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate and fully reload the index from an injected loader.
    ///
    /// Last write wins for duplicate handles. Safe to call repeatedly; on
    /// loader failure the previous contents are kept.
    pub fn reload_with<L>(&self, loader: L) -> Result<usize>
    where
        L: FnOnce() -> Result<Vec<Member>>,
    {
        let loaded = loader()?;
        let mut fresh = HashMap::with_capacity(loaded.len());
        for member in loaded {
            fresh.insert(member.handle.clone(), member);
        }
        let count = fresh.len();

        let mut members = self.members.write().expect("roster index lock poisoned");
        *members = fresh;
        tracing::info!(members = count, "roster index reloaded");
        Ok(count)
    }

    /// O(1) lookup by handle in any user-supplied form (`@Alice`, `ALICE`, …).
    /// Never touches durable storage.
    pub fn lookup(&self, handle: &str) -> Option<Member> {
        let key = normalize_handle(handle);
        self.members
            .read()
            .expect("roster index lock poisoned")
            .get(&key)
            .cloned()
    }

    /// Membership test — the authorization gate for every user-facing command.
    pub fn is_known(&self, handle: &str) -> bool {
        let key = normalize_handle(handle);
        self.members
            .read()
            .expect("roster index lock poisoned")
            .contains_key(&key)
    }

    /// Write-through of a successfully persisted member, so reads track
    /// durable state between reloads.
    pub fn apply(&self, member: Member) {
        self.members
            .write()
            .expect("roster index lock poisoned")
            .insert(member.handle.clone(), member);
    }

    /// Snapshot of every member. Directory queries iterate this.
    pub fn all(&self) -> Vec<Member> {
        self.members
            .read()
            .expect("roster index lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members
            .read()
            .expect("roster index lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::types::Crew;

    fn member(handle: &str) -> Member {
        Member::new(
            handle,
            Crew {
                boat: "Sun Dancer".into(),
                captain: "Maya".into(),
            },
        )
    }

    #[test]
    fn lookup_normalizes_handle_forms() {
        let index = RosterIndex::new();
        index.reload_with(|| Ok(vec![member("alice")])).unwrap();

        assert!(index.lookup("@Alice").is_some());
        assert!(index.lookup("ALICE").is_some());
        assert!(index.lookup("alice").is_some());
        assert!(index.lookup("bob").is_none());
    }

    #[test]
    fn is_known_gates_on_membership() {
        let index = RosterIndex::new();
        index.reload_with(|| Ok(vec![member("alice")])).unwrap();

        assert!(index.is_known("@alice"));
        assert!(!index.is_known("@mallory"));
    }

    #[test]
    fn reload_replaces_not_merges() {
        let index = RosterIndex::new();
        index.reload_with(|| Ok(vec![member("alice")])).unwrap();
        index.reload_with(|| Ok(vec![member("bob")])).unwrap();

        assert!(index.lookup("alice").is_none());
        assert!(index.lookup("bob").is_some());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn reload_last_write_wins_on_duplicates() {
        let index = RosterIndex::new();
        let mut first = member("alice");
        first.city = Some("Riga".into());
        let mut second = member("alice");
        second.city = Some("Porto".into());

        index.reload_with(|| Ok(vec![first, second])).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("alice").unwrap().city.as_deref(), Some("Porto"));
    }

    #[test]
    fn failed_reload_keeps_previous_contents() {
        let index = RosterIndex::new();
        index.reload_with(|| Ok(vec![member("alice")])).unwrap();

        let result = index.reload_with(|| anyhow::bail!("store unavailable"));
        assert!(result.is_err());
        assert!(index.lookup("alice").is_some());
    }

    #[test]
    fn apply_writes_through() {
        let index = RosterIndex::new();
        index.reload_with(|| Ok(vec![member("alice")])).unwrap();

        let mut updated = member("alice");
        updated.bio = Some("new bio".into());
        index.apply(updated);

        assert_eq!(index.lookup("alice").unwrap().bio.as_deref(), Some("new bio"));
    }
}
