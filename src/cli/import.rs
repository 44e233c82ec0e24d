use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::config::FlotillaConfig;
use crate::roster::store;
use crate::roster::types::{Crew, Member};

/// One roster entry in the import file. Crew is given either structured
/// (`boat` + `captain`) or as the legacy composite `crew_key`
/// (`"<Boat> (<Captain>)"`).
#[derive(Debug, Deserialize)]
struct RosterEntry {
    handle: String,
    boat: Option<String>,
    captain: Option<String>,
    crew_key: Option<String>,
    display_name: Option<String>,
    city: Option<String>,
    photo: Option<String>,
}

/// Seed the roster from a JSON file.
///
/// Existing handles are upserted (crew refreshed, profile fields kept).
/// Entries with a malformed legacy crew key are rejected individually and
/// reported; the rest of the import proceeds.
pub fn import(config: &FlotillaConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read roster file: {}", file.display()))?;
    let entries: Vec<RosterEntry> =
        serde_json::from_str(&json).context("failed to parse roster JSON")?;

    let conn = crate::db::open_database(config.resolved_db_path())?;

    let mut imported = 0u64;
    let mut rejected = 0u64;

    println!("Importing {} roster entries...", entries.len());

    for entry in &entries {
        let crew = match resolve_crew(entry) {
            Ok(crew) => crew,
            Err(e) => {
                eprintln!("Warning: rejected entry for {:?}: {e}", entry.handle);
                rejected += 1;
                continue;
            }
        };

        let mut member = Member::new(&entry.handle, crew);
        member.display_name = entry.display_name.clone();
        member.city = entry.city.clone();
        member.photo = entry.photo.clone();
        store::insert(&conn, &member)?;
        imported += 1;
    }

    println!("Import complete:");
    println!("  Entries imported: {imported}");
    if rejected > 0 {
        println!("  Entries rejected: {rejected} (malformed crew key)");
    }

    Ok(())
}

fn resolve_crew(entry: &RosterEntry) -> Result<Crew> {
    if let (Some(boat), Some(captain)) = (&entry.boat, &entry.captain) {
        anyhow::ensure!(!boat.trim().is_empty(), "boat must not be empty");
        anyhow::ensure!(!captain.trim().is_empty(), "captain must not be empty");
        return Ok(Crew {
            boat: boat.trim().to_string(),
            captain: captain.trim().to_string(),
        });
    }
    let key = entry
        .crew_key
        .as_deref()
        .context("entry needs boat+captain or crew_key")?;
    Ok(Crew::parse_legacy(key)?)
}
