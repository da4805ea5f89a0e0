//! Subcommand implementations.

pub mod config;
