//! The facade consumed by the session/command layer.
//!
//! Everything the chat transport needs: identity resolution, like toggling
//! with match detection and an at-most-once match notification hook, profile
//! mutation with validation, lazy platform-id backfill, and roster reload.
//! The transport renders outcomes; nothing here performs transport I/O.

use anyhow::Result;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::likes::engine::{self, ToggleOutcome};
use crate::likes::store as like_store;
use crate::roster::index::RosterIndex;
use crate::roster::store::{self, UpdateError};
use crate::roster::types::{
    normalize_handle, Member, MAX_BIO_LEN, MAX_CITY_LEN, MAX_DISPLAY_NAME_LEN, MAX_INSTA_LEN,
};

/// Hook invoked when a like toggle produces a new mutual pair. Receives
/// (actor, counterpart). Fired at most once per mutual transition.
pub type MatchNotifier = Box<dyn Fn(&Member, &Member) + Send + Sync>;

/// Outcome of a like/unlike request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggleOutcome {
    /// Toggle applied; `mutual` reflects the match state after the toggle.
    Applied { mutual: bool },
    /// Liking yourself is a defined no-op, not an error.
    RejectedSelf,
    /// Either handle is not in the roster.
    TargetUnknown,
}

/// Profile field a member may edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    DisplayName,
    Bio,
    City,
    Insta,
    Photo,
}

/// Outcome of a profile mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// User-correctable validation failure; never logged as a system fault.
    Rejected(String),
    TargetUnknown,
    /// The conditional write conflicted twice; the edit was not persisted.
    ConflictExhausted,
}

/// Session-facing directory service.
///
/// Reads resolve against the in-memory roster index; mutations go to the
/// durable store and are written through to the index on success.
pub struct DirectoryService {
    db: Arc<Mutex<Connection>>,
    index: Arc<RosterIndex>,
    notifier: Option<MatchNotifier>,
}

impl DirectoryService {
    pub fn new(db: Arc<Mutex<Connection>>, index: Arc<RosterIndex>) -> Self {
        Self {
            db,
            index,
            notifier: None,
        }
    }

    /// Install the match notification hook.
    pub fn with_match_notifier(mut self, notifier: MatchNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn index(&self) -> &RosterIndex {
        &self.index
    }

    /// Resolve a raw handle (`@Alice`, `ALICE`, …) to a roster member.
    pub fn resolve_identity(&self, raw_handle: &str) -> Option<Member> {
        self.index.lookup(raw_handle)
    }

    /// Full refresh of the in-memory index from durable storage.
    pub fn reload_roster(&self) -> Result<usize> {
        let conn = self.lock_db();
        self.index
            .reload_with(|| store::load_all(&conn).map_err(Into::into))
    }

    /// Backfill missing platform identifiers on first interaction.
    ///
    /// Already-set identifiers are never overwritten. Returns the member as
    /// currently known, or `None` for handles outside the roster.
    pub fn register_interaction(
        &self,
        handle: &str,
        user_id: Option<i64>,
        chat_id: Option<i64>,
    ) -> Result<Option<Member>> {
        let Some(mut member) = self.index.lookup(handle) else {
            return Ok(None);
        };

        let mut changed = false;
        if member.user_id.is_none() && user_id.is_some() {
            member.user_id = user_id;
            changed = true;
        }
        if member.chat_id.is_none() && chat_id.is_some() {
            member.chat_id = chat_id;
            changed = true;
        }
        if !changed {
            return Ok(Some(member));
        }

        tracing::info!(handle = %member.handle, "backfilling platform identifiers");
        let conn = self.lock_db();
        let stored = store::update(&conn, &member)?;
        drop(conn);
        self.index.apply(stored.clone());
        Ok(Some(stored))
    }

    /// Toggle a like and report the resulting match state.
    ///
    /// The notifier fires only when a like newly created its edge and the
    /// pair is mutual afterwards — re-liking an existing edge stays silent.
    pub fn request_like_toggle(
        &self,
        from_handle: &str,
        to_handle: &str,
        desired: bool,
    ) -> Result<LikeToggleOutcome> {
        let Some(actor) = self.index.lookup(from_handle) else {
            return Ok(LikeToggleOutcome::TargetUnknown);
        };
        let Some(target) = self.index.lookup(to_handle) else {
            return Ok(LikeToggleOutcome::TargetUnknown);
        };

        let conn = self.lock_db();
        let outcome = engine::toggle_like(&conn, &actor.handle, &target.handle, desired)?;
        match outcome {
            ToggleOutcome::RejectedSelf => Ok(LikeToggleOutcome::RejectedSelf),
            ToggleOutcome::Applied { newly_liked } => {
                let mutual = engine::is_match(&conn, &actor.handle, &target.handle)?;
                drop(conn);

                if newly_liked && mutual {
                    if let Some(notifier) = &self.notifier {
                        notifier(&actor, &target);
                    }
                }
                Ok(LikeToggleOutcome::Applied { mutual })
            }
        }
    }

    /// Derived match check; symmetric in its arguments.
    pub fn request_match_check(&self, a: &str, b: &str) -> Result<bool> {
        let conn = self.lock_db();
        Ok(engine::is_match(
            &conn,
            &normalize_handle(a),
            &normalize_handle(b),
        )?)
    }

    /// Validate and persist a profile field edit.
    pub fn request_profile_mutation(
        &self,
        handle: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<MutationOutcome> {
        let Some(mut member) = self.index.lookup(handle) else {
            return Ok(MutationOutcome::TargetUnknown);
        };

        let value = value.trim();
        if let Err(reason) = validate_field(field, value) {
            return Ok(MutationOutcome::Rejected(reason));
        }

        match field {
            ProfileField::DisplayName => member.display_name = Some(value.to_string()),
            ProfileField::Bio => member.bio = Some(value.to_string()),
            ProfileField::City => member.city = Some(value.to_string()),
            ProfileField::Insta => {
                member.insta = Some(value.trim_start_matches('@').to_string())
            }
            ProfileField::Photo => member.photo = Some(value.to_string()),
        }

        let conn = self.lock_db();
        match store::update(&conn, &member) {
            Ok(stored) => {
                drop(conn);
                self.index.apply(stored);
                Ok(MutationOutcome::Applied)
            }
            Err(UpdateError::ConflictExhausted(handle)) => {
                tracing::warn!(%handle, "profile edit dropped after conflict retry");
                Ok(MutationOutcome::ConflictExhausted)
            }
            Err(UpdateError::NotFound(_)) => Ok(MutationOutcome::TargetUnknown),
            Err(UpdateError::Storage(e)) => Err(e.into()),
        }
    }

    /// Members this handle has liked, resolved against the roster.
    pub fn likes_given(&self, handle: &str) -> Result<Vec<Member>> {
        let conn = self.lock_db();
        let edges = like_store::edges_from(&conn, &normalize_handle(handle))?;
        drop(conn);
        Ok(self.resolve_all(&edges))
    }

    /// Members who have liked this handle.
    pub fn likers_of(&self, handle: &str) -> Result<Vec<Member>> {
        let conn = self.lock_db();
        let edges = like_store::edges_to(&conn, &normalize_handle(handle))?;
        drop(conn);
        Ok(self.resolve_all(&edges))
    }

    /// Members with a reciprocated like for this handle.
    pub fn matches_of(&self, handle: &str) -> Result<Vec<Member>> {
        let me = normalize_handle(handle);
        let conn = self.lock_db();
        let given: std::collections::HashSet<String> =
            like_store::edges_from(&conn, &me)?.into_iter().collect();
        let received = like_store::edges_to(&conn, &me)?;
        drop(conn);

        let mutual: Vec<String> = received
            .into_iter()
            .filter(|h| given.contains(h))
            .collect();
        Ok(self.resolve_all(&mutual))
    }

    fn resolve_all(&self, handles: &[String]) -> Vec<Member> {
        handles
            .iter()
            .filter_map(|h| self.index.lookup(h))
            .collect()
    }

    fn lock_db(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.db.lock().expect("db lock poisoned")
    }
}

/// Per-field max-length validation, performed before any store write.
fn validate_field(field: ProfileField, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("value must not be empty".to_string());
    }
    let limit = match field {
        ProfileField::DisplayName => MAX_DISPLAY_NAME_LEN,
        ProfileField::Bio => MAX_BIO_LEN,
        ProfileField::City => MAX_CITY_LEN,
        ProfileField::Insta => MAX_INSTA_LEN,
        ProfileField::Photo => return Ok(()),
    };
    if value.chars().count() > limit {
        return Err(format!("value exceeds {limit} characters"));
    }
    Ok(())
}
