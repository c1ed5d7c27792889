//! Subcommand implementations.

pub mod collect;
pub mod config;
pub mod scan;
