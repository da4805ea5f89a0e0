//! Error types for the network collaborators.
//!
//! Every failure on the way to a raw API response (scraping the token,
//! warming up the session, calling the events API) is a [`ProviderError`].
//! The [`ProviderErrorCode`] says which step failed.

use std::fmt;
use thiserror::Error;

/// The step that produced a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The auth script could not be fetched or carried no token.
    TokenFetch,
    /// The warm-up request that establishes session cookies failed.
    Session,
    /// The events API call failed or returned an unusable body.
    Api,
    /// An endpoint URL could not be parsed.
    Configuration,
}

impl ProviderErrorCode {
    /// Returns a stable machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenFetch => "token_fetch",
            Self::Session => "session",
            Self::Api => "api",
            Self::Configuration => "configuration",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::TokenFetch => "token fetch error",
            Self::Session => "session error",
            Self::Api => "API error",
            Self::Configuration => "configuration error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error raised by a token, session or events collaborator.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn token_fetch(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::TokenFetch, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Session, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Api, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Configuration, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.label(), self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
