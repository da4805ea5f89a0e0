//! The fetch, project and render pipeline.

use tracing::debug;

use villages_core::{EventProjector, OutputFormatter, to_string_pretty_ascii};
use villages_providers::{EventProvider, HttpProvider};

use crate::config::Settings;
use crate::error::ClientResult;

/// Builds the live provider for `settings`.
pub fn http_provider(settings: &Settings) -> HttpProvider {
    HttpProvider::new(settings.endpoints().clone(), settings.timeout())
}

/// Runs one fetch and returns what should be printed to stdout.
///
/// The session is closed before rendering starts. Nothing is returned
/// unless every step succeeded, so a failed run prints no partial output.
///
/// # Errors
///
/// Returns the first provider, processing or format error.
pub async fn run(settings: &Settings, provider: &dyn EventProvider) -> ClientResult<String> {
    let filters = settings.filters();

    debug!(provider = provider.name(), "fetching authentication token");
    let token = provider.fetch_token().await?;

    debug!("establishing session");
    let session = provider.open_session(filters).await?;
    debug!(
        date_range = %filters.date_range,
        category = %filters.category,
        location = %filters.location,
        "fetching events"
    );
    let response = provider.fetch_events(&session, &token, filters).await?;
    drop(session);

    if settings.raw() {
        let mut output = to_string_pretty_ascii(&response)?;
        output.push('\n');
        return Ok(output);
    }

    debug!("processing events");
    let projector = EventProjector::new(settings.venues().clone(), settings.fields().clone());
    let events = projector.process_events(&response)?;

    debug!(format = %settings.format(), count = events.len(), "formatting output");
    let output = OutputFormatter::new(settings.fields()).render(settings.format(), &events)?;
    Ok(output)
}
