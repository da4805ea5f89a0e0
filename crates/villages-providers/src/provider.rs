//! EventProvider trait definition.
//!
//! The pipeline needs three things from the outside world: an auth token,
//! a cookie-carrying session and the raw events response. [`EventProvider`]
//! bundles them so the orchestrator can run against the live site
//! ([`HttpProvider`]) or a stand-in.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use villages_core::QueryFilters;

use crate::client;
use crate::endpoints::Endpoints;
use crate::error::{ProviderError, ProviderResult};
use crate::session::Session;
use crate::token;

/// Default timeout for every request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so the orchestrator can take
/// `&dyn EventProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of raw events for the pipeline.
pub trait EventProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Obtains the bearer token for the events API.
    fn fetch_token(&self) -> BoxFuture<'_, ProviderResult<String>>;

    /// Establishes a session for the given filters.
    fn open_session<'a>(&'a self, filters: &'a QueryFilters)
    -> BoxFuture<'a, ProviderResult<Session>>;

    /// Fetches the raw events response over `session`.
    ///
    /// The returned value is always a JSON object.
    fn fetch_events<'a>(
        &'a self,
        session: &'a Session,
        token: &'a str,
        filters: &'a QueryFilters,
    ) -> BoxFuture<'a, ProviderResult<Value>>;
}

/// Provider that talks to the real site over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    endpoints: Endpoints,
    timeout: Duration,
}

impl HttpProvider {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Self {
        Self { endpoints, timeout }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpProvider {
    fn default() -> Self {
        Self::new(
            Endpoints::default(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

impl EventProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_token(&self) -> BoxFuture<'_, ProviderResult<String>> {
        Box::pin(async move { token::fetch_token(self.endpoints.script_url().as_str(), self.timeout).await })
    }

    fn open_session<'a>(
        &'a self,
        filters: &'a QueryFilters,
    ) -> BoxFuture<'a, ProviderResult<Session>> {
        Box::pin(async move {
            let url = self.endpoints.calendar_url(filters);
            Session::establish(&url, self.timeout).await
        })
    }

    fn fetch_events<'a>(
        &'a self,
        session: &'a Session,
        token: &'a str,
        filters: &'a QueryFilters,
    ) -> BoxFuture<'a, ProviderResult<Value>> {
        Box::pin(async move {
            let url = self.endpoints.api_url(filters);
            debug!(provider = self.name(), "requesting events");
            client::fetch_events(session, &url, token, self.timeout).await
        })
    }
}

/// A provider that fails every step with the same error.
///
/// Useful in tests and as a placeholder when endpoints fail to parse.
#[derive(Debug)]
pub struct ErrorProvider {
    error: ProviderError,
}

impl ErrorProvider {
    pub fn new(error: ProviderError) -> Self {
        Self { error }
    }

    fn error(&self) -> ProviderError {
        ProviderError::new(self.error.code(), self.error.message())
    }
}

impl EventProvider for ErrorProvider {
    fn name(&self) -> &str {
        "error"
    }

    fn fetch_token(&self) -> BoxFuture<'_, ProviderResult<String>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn open_session<'a>(
        &'a self,
        _filters: &'a QueryFilters,
    ) -> BoxFuture<'a, ProviderResult<Session>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }

    fn fetch_events<'a>(
        &'a self,
        _session: &'a Session,
        _token: &'a str,
        _filters: &'a QueryFilters,
    ) -> BoxFuture<'a, ProviderResult<Value>> {
        let error = self.error();
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn http_provider_defaults() {
        let provider = HttpProvider::default();
        assert_eq!(provider.timeout(), Duration::from_secs(10));
        assert_eq!(provider.endpoints(), &Endpoints::default());
        assert_eq!(provider.name(), "http");
    }

    #[tokio::test]
    async fn http_provider_full_exchange() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/web_components/myvillages-auth-forms/main.js");
            then.status(200).body(r#"dp_AUTH_TOKEN = "Basic xyz";"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/calendar/");
            then.status(200).header("set-cookie", "sid=1; Path=/");
        });
        let api = server.mock(|when, then| {
            when.method(GET)
                .path("/events/")
                .query_param("dateRange", "today")
                .query_param("subcategoriesQueryType", "and")
                .header("authorization", "Basic xyz")
                .header("cookie", "sid=1");
            then.status(200).json_body(json!({"events": []}));
        });

        let provider = HttpProvider::new(
            Endpoints::with_base(&server.base_url()).unwrap(),
            Duration::from_secs(5),
        );
        let filters = QueryFilters::default();

        let token = provider.fetch_token().await.unwrap();
        assert_eq!(token, "Basic xyz");
        let session = provider.open_session(&filters).await.unwrap();
        let data = provider
            .fetch_events(&session, &token, &filters)
            .await
            .unwrap();
        api.assert();
        assert_eq!(data, json!({"events": []}));
    }

    #[tokio::test]
    async fn error_provider_fails_every_step() {
        let provider = ErrorProvider::new(ProviderError::session("offline"));
        let filters = QueryFilters::default();

        let err = provider.fetch_token().await.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::Session);
        assert_eq!(err.message(), "offline");
        assert!(provider.open_session(&filters).await.is_err());

        let session = Session::from_client(reqwest::Client::new(), "http://localhost/");
        assert!(
            provider
                .fetch_events(&session, "t", &filters)
                .await
                .is_err()
        );
    }
}
