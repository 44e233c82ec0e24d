//! Directory queries over the in-memory roster index.
//!
//! Search, boat/captain filtering, and grouped boat listings. All of these
//! read the index snapshot only — no durable-store access on the query path.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::roster::index::RosterIndex;
use crate::roster::types::{normalize_handle, Member};

/// One boat with its captain and crew size, for the boats listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BoatSummary {
    pub boat: String,
    pub captain: String,
    pub members: usize,
}

/// Find members by handle, display name, or city.
///
/// An exact handle match short-circuits to that single member; otherwise the
/// roster is scanned case-insensitively.
pub fn search(index: &RosterIndex, query: &str) -> Vec<Member> {
    let q = normalize_handle(query);
    if q.is_empty() {
        return Vec::new();
    }

    if let Some(member) = index.lookup(&q) {
        return vec![member];
    }

    let mut results: Vec<Member> = index
        .all()
        .into_iter()
        .filter(|m| {
            m.handle.contains(&q)
                || m.display_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&q))
                || m.city
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&q))
        })
        .collect();
    sort_by_name(&mut results);
    results
}

/// Members whose boat or captain name contains the query, ordered by boat
/// then display name.
pub fn by_boat_or_captain(index: &RosterIndex, query: &str) -> Vec<Member> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<Member> = index
        .all()
        .into_iter()
        .filter(|m| {
            m.crew.boat.to_lowercase().contains(&q) || m.crew.captain.to_lowercase().contains(&q)
        })
        .collect();
    results.sort_by(|a, b| {
        (a.crew.boat.as_str(), a.shown_name()).cmp(&(b.crew.boat.as_str(), b.shown_name()))
    });
    results
}

/// Every member, ordered by display name.
pub fn all_members(index: &RosterIndex) -> Vec<Member> {
    let mut members = index.all();
    sort_by_name(&mut members);
    members
}

/// All boats with crew counts, ordered by boat name.
pub fn boats(index: &RosterIndex) -> Vec<BoatSummary> {
    let mut groups: BTreeMap<(String, String), usize> = BTreeMap::new();
    for member in index.all() {
        *groups
            .entry((member.crew.boat.clone(), member.crew.captain.clone()))
            .or_default() += 1;
    }
    groups
        .into_iter()
        .map(|((boat, captain), members)| BoatSummary {
            boat,
            captain,
            members,
        })
        .collect()
}

fn sort_by_name(members: &mut [Member]) {
    members.sort_by(|a, b| a.shown_name().cmp(b.shown_name()));
}
