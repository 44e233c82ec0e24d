use anyhow::Result;

use crate::config::FlotillaConfig;
use crate::roster::query;

/// Look up a single member by exact handle.
pub fn lookup(config: &FlotillaConfig, handle: &str) -> Result<()> {
    let (_conn, index) = super::open_directory(config)?;

    match index.lookup(handle) {
        Some(member) => super::print_member(&member),
        None => println!("No member with handle {handle}"),
    }
    Ok(())
}

/// Search members by handle, name, or city.
pub fn find(config: &FlotillaConfig, query_str: &str) -> Result<()> {
    let (_conn, index) = super::open_directory(config)?;

    let results = query::search(&index, query_str);
    if results.is_empty() {
        println!("No members found for {query_str:?}");
        return Ok(());
    }

    let cap = config.directory.max_search_results;
    for member in results.iter().take(cap) {
        super::print_member(member);
        println!();
    }
    if results.len() > cap {
        println!("...and {} more.", results.len() - cap);
    }
    Ok(())
}
