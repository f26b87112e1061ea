//! Subcommand implementations.

pub mod compose;
pub mod resolve;
pub mod store_url;
