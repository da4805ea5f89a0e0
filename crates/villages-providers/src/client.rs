//! Events API client.
//!
//! Sends the authenticated request over an established [`Session`] and
//! validates that the body is a JSON object. The shape of the object is
//! left to the projector.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, ORIGIN, REFERER};
use serde_json::Value;
use tracing::debug;

use villages_core::type_name;

use crate::endpoints::SITE_ORIGIN;
use crate::error::{ProviderError, ProviderResult};
use crate::session::Session;

/// How much of an error body is quoted back in the error message.
const ERROR_BODY_PREVIEW: usize = 200;

/// Fetches one page of events from `api_url`.
///
/// # Errors
///
/// Returns an API error when the request fails or times out, the status is
/// not 200, the body is not JSON, or the JSON is not an object.
pub async fn fetch_events(
    session: &Session,
    api_url: &str,
    auth_token: &str,
    timeout: Duration,
) -> ProviderResult<Value> {
    debug!(url = api_url, "fetching events");

    let response = session
        .client()
        .get(api_url)
        .timeout(timeout)
        .header(AUTHORIZATION, auth_token)
        .header(ACCEPT, "application/json, text/plain, */*")
        .header(ORIGIN, SITE_ORIGIN)
        .header(REFERER, session.referer())
        .send()
        .await
        .map_err(|e| {
            let message = if e.is_timeout() {
                format!("API request timed out after {} seconds", timeout.as_secs())
            } else {
                format!("API request failed: {}", e)
            };
            ProviderError::api(message).with_source(e)
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        ProviderError::api(format!("failed to read API response: {}", e)).with_source(e)
    })?;

    if status != StatusCode::OK {
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
        return Err(ProviderError::api(format!(
            "API request failed with status code {}: {}",
            status.as_u16(),
            preview
        )));
    }

    let data: Value = serde_json::from_str(&body).map_err(|e| {
        ProviderError::api(format!("Failed to parse JSON response: {}", e)).with_source(e)
    })?;

    if !data.is_object() {
        return Err(ProviderError::api(format!(
            "Invalid API response structure: expected object, got {}",
            type_name(&data)
        )));
    }

    Ok(data)
}
