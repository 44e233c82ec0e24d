//! Core roster type definitions.
//!
//! Defines [`Member`] (a roster record), [`Crew`] (the boat/captain pair a
//! member belongs to), handle normalization, and the profile field limits
//! enforced before any durable write.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a display name.
pub const MAX_DISPLAY_NAME_LEN: usize = 64;
/// Maximum length of a bio text.
pub const MAX_BIO_LEN: usize = 1024;
/// Maximum length of a city name.
pub const MAX_CITY_LEN: usize = 128;
/// Maximum length of an external-profile handle.
pub const MAX_INSTA_LEN: usize = 64;

/// Normalize a chat handle for use as a roster key: trim whitespace, strip
/// one leading `@`, lowercase.
pub fn normalize_handle(raw: &str) -> String {
    raw.trim().trim_start_matches('@').to_lowercase()
}

/// The boat/captain pair a member sails with.
///
/// Stored as two structured columns. The legacy `"<Boat> (<Captain>)"`
/// composite appears only at the import/export boundary and is validated
/// there — nothing downstream parses composites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub boat: String,
    pub captain: String,
}

/// Why a legacy composite crew key failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrewParseError {
    #[error("crew key must contain exactly one parenthesized captain segment: {0:?}")]
    MalformedParens(String),
    #[error("crew key has an empty boat name: {0:?}")]
    EmptyBoat(String),
    #[error("crew key has an empty captain name: {0:?}")]
    EmptyCaptain(String),
}

impl Crew {
    /// Parse the legacy composite key `"<Boat> (<Captain>)"`.
    ///
    /// Requires exactly one `(` and one `)`, the `)` terminating the string,
    /// and non-empty boat and captain parts after trimming. Anything else is
    /// an error, never a panic or a silent truncation.
    pub fn parse_legacy(composite: &str) -> Result<Self, CrewParseError> {
        let s = composite.trim();
        let open_count = s.matches('(').count();
        let close_count = s.matches(')').count();
        if open_count != 1 || close_count != 1 || !s.ends_with(')') {
            return Err(CrewParseError::MalformedParens(composite.to_string()));
        }

        let open = s.find('(').expect("counted above");
        let boat = s[..open].trim();
        let captain = s[open + 1..s.len() - 1].trim();

        if boat.is_empty() {
            return Err(CrewParseError::EmptyBoat(composite.to_string()));
        }
        if captain.is_empty() {
            return Err(CrewParseError::EmptyCaptain(composite.to_string()));
        }

        Ok(Self {
            boat: boat.to_string(),
            captain: captain.to_string(),
        })
    }

    /// Synthesize the legacy composite key, for exports that must preserve
    /// the old durable format.
    pub fn to_composite(&self) -> String {
        format!("{} ({})", self.boat, self.captain)
    }
}

impl std::fmt::Display for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.boat, self.captain)
    }
}

/// A roster record, matching the `members` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Normalized chat handle (no leading `@`, lowercase) — primary key.
    pub handle: String,
    /// Boat and captain this member sails with. Never part of an update payload.
    pub crew: Crew,
    /// Display name shown on profile cards.
    pub display_name: Option<String>,
    /// Free-form bio text.
    pub bio: Option<String>,
    /// Home city.
    pub city: Option<String>,
    /// External-profile handle (no leading `@`).
    pub insta: Option<String>,
    /// Photo reference: a durable platform reference or a raw URL.
    pub photo: Option<String>,
    /// Cached durable photo reference, filled in after the first upload.
    pub photo_file_id: Option<String>,
    /// Platform user id, backfilled lazily on first interaction.
    pub user_id: Option<i64>,
    /// Platform chat id, backfilled lazily on first interaction.
    pub chat_id: Option<i64>,
    /// Optimistic-concurrency token; bumped on every successful write.
    pub version: i64,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-modification timestamp.
    pub updated_at: String,
}

impl Member {
    /// A fresh record for roster seeding. Profile fields start empty and the
    /// version token at zero.
    pub fn new(handle: &str, crew: Crew) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            handle: normalize_handle(handle),
            crew,
            display_name: None,
            bio: None,
            city: None,
            insta: None,
            photo: None,
            photo_file_id: None,
            user_id: None,
            chat_id: None,
            version: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Name to render: display name if set, else the handle.
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.handle)
    }
}
