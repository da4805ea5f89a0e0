//! Bearer token scraping.
//!
//! The events API wants an `Authorization` header whose value is embedded
//! in the site's auth-forms JavaScript bundle as
//! `dp_AUTH_TOKEN = "Basic ..."`.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::USER_AGENT;
use crate::error::{ProviderError, ProviderResult};

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"dp_AUTH_TOKEN\s*=\s*["']([^"']+)["']"#).expect("Invalid token regex")
});

/// Pulls the auth token out of a script body.
pub fn extract_token(script: &str) -> Option<&str> {
    TOKEN_REGEX
        .captures(script)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Downloads the auth script at `url` and returns the embedded token.
///
/// # Errors
///
/// Returns a token-fetch error on transport failure, timeout, a non-success
/// status, or when the script has no token.
pub async fn fetch_token(url: &str, timeout: Duration) -> ProviderResult<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::token_fetch(format!("failed to build HTTP client: {}", e)))?;

    debug!(url, "fetching auth script");
    let response = client.get(url).send().await.map_err(|e| {
        let message = if e.is_timeout() {
            format!("token request timed out after {} seconds", timeout.as_secs())
        } else {
            format!("failed to fetch auth script: {}", e)
        };
        ProviderError::token_fetch(message).with_source(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::token_fetch(format!(
            "auth script request failed with status code {}",
            status.as_u16()
        )));
    }

    let body = response.text().await.map_err(|e| {
        ProviderError::token_fetch(format!("failed to read auth script: {}", e)).with_source(e)
    })?;

    let token = extract_token(&body).ok_or_else(|| {
        ProviderError::token_fetch("auth token pattern not found in script")
    })?;

    debug!(len = token.len(), "auth token extracted");
    Ok(token.to_string())
}
