use anyhow::Result;
use flotilla::{cli, config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flotilla", version, about = "Membership directory and like/match service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed the roster from a JSON file
    Import {
        /// Path to the roster JSON
        file: PathBuf,
    },
    /// Look up a member by handle
    Lookup {
        /// Handle in any form (@Alice, alice, ALICE)
        handle: String,
    },
    /// Search members by handle, name, or city
    Find {
        /// Search query
        query: String,
    },
    /// List a boat's crew by boat or captain name
    Boat {
        /// Boat or captain name (substring)
        query: String,
    },
    /// List all boats with crew counts
    Boats,
    /// Show directory statistics, or one member's like activity
    Stats {
        /// Member handle
        #[arg(long)]
        member: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for db path and log level)
    let config = config::FlotillaConfig::load()?;

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Import { file } => cli::import::import(&config, &file)?,
        Command::Lookup { handle } => cli::find::lookup(&config, &handle)?,
        Command::Find { query } => cli::find::find(&config, &query)?,
        Command::Boat { query } => cli::boats::boat(&config, &query)?,
        Command::Boats => cli::boats::boats(&config)?,
        Command::Stats { member } => cli::stats::stats(&config, member.as_deref())?,
    }

    Ok(())
}
