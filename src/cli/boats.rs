use anyhow::Result;

use crate::config::FlotillaConfig;
use crate::roster::query;

/// List the crew of boats matching a boat or captain name.
pub fn boat(config: &FlotillaConfig, query_str: &str) -> Result<()> {
    let (_conn, index) = super::open_directory(config)?;

    let members = query::by_boat_or_captain(&index, query_str);
    if members.is_empty() {
        println!("No crew found for {query_str:?}");
        return Ok(());
    }

    for member in &members {
        super::print_member(member);
        println!();
    }
    Ok(())
}

/// List every boat with its captain and crew size.
pub fn boats(config: &FlotillaConfig) -> Result<()> {
    let (_conn, index) = super::open_directory(config)?;

    let listing = query::boats(&index);
    if listing.is_empty() {
        println!("Roster is empty — run `flotilla import` first.");
        return Ok(());
    }

    println!("Boats:");
    for summary in &listing {
        println!(
            "  {} ({}) — {} aboard",
            summary.boat, summary.captain, summary.members
        );
    }
    Ok(())
}
