//! CLI, configuration and pipeline for villages-events
//!
//! This crate provides the `villages-events` command-line interface. The
//! binary parses flags, merges them with `config.yaml` into [`Settings`]
//! and hands those to [`run`] together with an
//! [`EventProvider`](villages_providers::EventProvider).

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;

pub use cli::Cli;
pub use config::{FileConfig, Settings};
pub use error::{ClientError, ClientResult};
pub use pipeline::{http_provider, run};
