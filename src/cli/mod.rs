pub mod boats;
pub mod find;
pub mod import;
pub mod stats;

use anyhow::Result;
use std::sync::Arc;

use crate::config::FlotillaConfig;
use crate::roster::index::RosterIndex;
use crate::roster::store;
use crate::roster::types::Member;

/// Open the database and build a loaded roster index for a CLI command.
pub fn open_directory(config: &FlotillaConfig) -> Result<(rusqlite::Connection, Arc<RosterIndex>)> {
    let conn = crate::db::open_database(config.resolved_db_path())?;
    let index = Arc::new(RosterIndex::new());
    index.reload_with(|| store::load_all(&conn).map_err(Into::into))?;
    Ok((conn, index))
}

/// Render a member as a terminal profile card.
pub fn print_member(member: &Member) {
    println!("{} (@{})", member.shown_name(), member.handle);
    println!("  Boat:    {}", member.crew.boat);
    println!("  Captain: {}", member.crew.captain);
    if let Some(city) = &member.city {
        println!("  City:    {city}");
    }
    if let Some(insta) = &member.insta {
        println!("  Insta:   https://www.instagram.com/{insta}");
    }
    if let Some(bio) = &member.bio {
        println!("  Bio:     {bio}");
    }
}
