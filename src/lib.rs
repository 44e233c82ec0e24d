//! Membership directory and like/match core for a boat-crew community bot.
//!
//! Members belong to boats led by captains. Users browse the roster, search,
//! update their own profile fields, and exchange likes that become matches
//! when reciprocated. The chat transport itself lives outside this crate and
//! talks to [`service::DirectoryService`].
//!
//! # Architecture
//!
//! - **Storage**: SQLite. Members in one table with an optimistic-concurrency
//!   version column; likes in two independently indexed projections
//!   (by-source and by-destination).
//! - **Reads**: an in-memory roster index keyed by normalized handle serves
//!   every lookup; it is refreshed only by explicit reload.
//! - **Matches**: derived, never stored — a match exists iff directed likes
//!   exist in both directions.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, and migrations
//! - [`roster`] — Member records, durable store, in-memory index, and directory queries
//! - [`likes`] — Directed-like storage, toggle/match engine, and stats
//! - [`service`] — The facade consumed by the session/command layer
//! - [`cli`] — Administrative commands (import, lookup, find, boats, stats)

pub mod cli;
pub mod config;
pub mod db;
pub mod likes;
pub mod roster;
pub mod service;
