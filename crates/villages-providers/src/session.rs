//! Browser-like session with cookies.
//!
//! The events API only answers requests that carry the cookies the calendar
//! page sets. A [`Session`] owns a cookie-storing HTTP client that has
//! already loaded that page; dropping the session releases its connections.

use std::time::Duration;

use tracing::debug;

use crate::USER_AGENT;
use crate::error::{ProviderError, ProviderResult};

/// An HTTP client warmed up against the calendar page.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    calendar_url: String,
}

impl Session {
    /// Wraps an existing client without a warm-up request.
    pub fn from_client(client: reqwest::Client, calendar_url: impl Into<String>) -> Self {
        Self {
            client,
            calendar_url: calendar_url.into(),
        }
    }

    /// Builds a cookie-storing client and loads `calendar_url` with it.
    ///
    /// # Errors
    ///
    /// Returns a session error on transport failure, timeout or a
    /// non-success status.
    pub async fn establish(calendar_url: &str, timeout: Duration) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ProviderError::session(format!("failed to build HTTP client: {}", e)))?;

        debug!(url = calendar_url, "establishing session");
        let response = client.get(calendar_url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("session request timed out after {} seconds", timeout.as_secs())
            } else {
                format!("failed to establish session: {}", e)
            };
            ProviderError::session(message).with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::session(format!(
                "calendar page returned status code {}",
                status.as_u16()
            )));
        }

        Ok(Self::from_client(client, calendar_url))
    }

    /// The underlying HTTP client, carrying the session cookies.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The calendar page this session was established against.
    pub fn calendar_url(&self) -> &str {
        &self.calendar_url
    }

    /// The calendar page without its filter fragment, sent as `Referer`.
    pub fn referer(&self) -> &str {
        self.calendar_url
            .split_once('#')
            .map_or(self.calendar_url.as_str(), |(page, _)| page)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(url = %self.calendar_url, "closing session");
    }
}
