//! Subcommand implementations.

pub mod records;
pub mod seed;
pub mod watch;
