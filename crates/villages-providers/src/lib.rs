//! Network collaborators for the Villages events pipeline.
//!
//! This crate talks to the calendar site on behalf of the orchestrator:
//!
//! - [`fetch_token`] - scrapes the API bearer token from the auth script
//! - [`Session`] - a cookie-carrying client warmed up on the calendar page
//! - [`fetch_events`] - calls the events API and validates the response
//! - [`EventProvider`] - the trait the orchestrator drives, with
//!   [`HttpProvider`] as the live implementation
//!
//! # Flow
//!
//! ```text
//!   auth script ──▶ fetch_token ──┐
//!                                 ▼
//!   calendar page ──▶ Session ──▶ fetch_events ──▶ serde_json::Value
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod provider;
pub mod session;
pub mod token;

/// User agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0";

pub use client::fetch_events;
pub use endpoints::{DEFAULT_API_BASE, DEFAULT_CALENDAR_BASE, DEFAULT_SCRIPT_URL, Endpoints};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use provider::{BoxFuture, DEFAULT_TIMEOUT_SECS, ErrorProvider, EventProvider, HttpProvider};
pub use session::Session;
pub use token::{extract_token, fetch_token};
