use anyhow::Result;

use crate::config::FlotillaConfig;
use crate::likes::stats::{directory_stats, member_stats};
use crate::roster::types::normalize_handle;

/// Display directory statistics, or one member's like activity.
pub fn stats(config: &FlotillaConfig, handle: Option<&str>) -> Result<()> {
    let conn = crate::db::open_database(config.resolved_db_path())?;

    if let Some(raw) = handle {
        let handle = normalize_handle(raw);
        let response = member_stats(&conn, &handle)?;
        println!("Stats for @{handle}");
        println!("{}", "=".repeat(40));
        println!("  Likes sent:     {}", response.likes_sent);
        println!("  Likes received: {}", response.likes_received);
        println!("  Matches:        {}", response.matches);
        return Ok(());
    }

    let response = directory_stats(&conn)?;
    println!("Directory Statistics");
    println!("{}", "=".repeat(40));
    println!("  Members:  {}", response.members);
    println!("  Boats:    {}", response.boats);
    println!("  Likes:    {}", response.likes);
    println!("  Matches:  {}", response.matches);

    Ok(())
}
