pub mod engine;
pub mod stats;
pub mod store;
