//! Endpoint URLs for the calendar site and the events API.

use url::Url;

use villages_core::QueryFilters;

use crate::error::{ProviderError, ProviderResult};

/// Script that embeds the API bearer token.
pub const DEFAULT_SCRIPT_URL: &str =
    "https://cdn.thevillages.com/web_components/myvillages-auth-forms/main.js";

/// Calendar page that hands out session cookies.
pub const DEFAULT_CALENDAR_BASE: &str = "https://www.thevillages.com/calendar/";

/// Events API collection.
pub const DEFAULT_API_BASE: &str = "https://api.v2.thevillages.com/events/";

/// Origin sent with API requests.
pub const SITE_ORIGIN: &str = "https://www.thevillages.com";

/// The API always returns the first page of this many rows.
const PAGE_PARAMS: [(&str, &str); 3] = [("cancelled", "false"), ("startRow", "0"), ("endRow", "24")];

/// The three URLs the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    script_url: Url,
    calendar_base: Url,
    api_base: Url,
}

impl Endpoints {
    /// Creates endpoints from explicit URLs.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any URL does not parse.
    pub fn new(script_url: &str, calendar_base: &str, api_base: &str) -> ProviderResult<Self> {
        Ok(Self {
            script_url: parse("script", script_url)?,
            calendar_base: parse("calendar", calendar_base)?,
            api_base: parse("API", api_base)?,
        })
    }

    /// Points every endpoint at `base`, keeping the production path layout.
    ///
    /// Used to run the pipeline against a local server.
    pub fn with_base(base: &str) -> ProviderResult<Self> {
        let base = base.trim_end_matches('/');
        Self::new(
            &format!("{}/web_components/myvillages-auth-forms/main.js", base),
            &format!("{}/calendar/", base),
            &format!("{}/events/", base),
        )
    }

    pub fn script_url(&self) -> &Url {
        &self.script_url
    }

    pub fn calendar_base(&self) -> &Url {
        &self.calendar_base
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Calendar page URL for the given filters.
    ///
    /// Filters live in the page fragment (`#/?dateRange=...`). With every
    /// filter set to `all` the fragment is just `#/`.
    pub fn calendar_url(&self, filters: &QueryFilters) -> String {
        let params = join_params(filters.query_params());
        if params.is_empty() {
            format!("{}#/", self.calendar_base)
        } else {
            format!("{}#/?{}", self.calendar_base, params)
        }
    }

    /// Events API URL for the given filters.
    ///
    /// Location identifiers already use `+` for spaces and are sent
    /// verbatim rather than percent-encoded.
    pub fn api_url(&self, filters: &QueryFilters) -> String {
        let mut params: Vec<(&str, &str)> = PAGE_PARAMS.to_vec();
        params.extend(filters.query_params());
        params.push(("subcategoriesQueryType", "and"));
        format!("{}?{}", self.api_base, join_params(params))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            script_url: Url::parse(DEFAULT_SCRIPT_URL).expect("default script URL is valid"),
            calendar_base: Url::parse(DEFAULT_CALENDAR_BASE).expect("default calendar URL is valid"),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API URL is valid"),
        }
    }
}

fn parse(which: &str, raw: &str) -> ProviderResult<Url> {
    Url::parse(raw).map_err(|e| {
        ProviderError::configuration(format!("invalid {} URL '{}': {}", which, raw, e)).with_source(e)
    })
}

fn join_params(params: Vec<(&str, &str)>) -> String {
    params
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}
