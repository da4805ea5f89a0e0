//! Client configuration.
//!
//! Defaults live in an optional `config.yaml` in the working directory.
//! Every key is optional; anything missing falls back to the built-in
//! default. A file that cannot be read or parsed is reported with a
//! warning and ignored as a whole.
//!
//! ```yaml
//! format: csv
//! date_range: this-week
//! category: entertainment
//! location: town-squares
//! timeout: 10
//! venue_mappings:
//!   Brownwood: Brownwood
//!   Spanish Springs: Spanish Springs
//! output_fields:
//!   - location.title
//!   - title
//!   - start.date
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use villages_core::{
    Category, DateRange, FieldSet, Location, OutputFormat, QueryFilters, VenueMapping,
};
use villages_providers::{DEFAULT_TIMEOUT_SECS, Endpoints};

use crate::cli::Cli;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// FileConfig (config.yaml)
// ---------------------------------------------------------------------------

/// Contents of the YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default output format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Default date range filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,

    /// Default category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Default location filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// Request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Keyword to abbreviation table, checked in file order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_mappings: Option<VenueMapping>,

    /// Field paths to output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_fields: Option<Vec<String>>,
}

impl FileConfig {
    /// Loads the config file at `path`.
    ///
    /// A missing file yields the empty config. An unreadable or invalid
    /// file is logged and also yields the empty config, so a broken file
    /// never stops a run.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                warn!("Invalid YAML in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses YAML config text. An empty document is the empty config.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Renders the config back to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Returns the config path: the explicit one, or `config.yaml`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}

// ---------------------------------------------------------------------------
// Settings (merged, immutable)
// ---------------------------------------------------------------------------

/// Everything one run needs, merged from flags, file and built-in defaults.
///
/// Built once in `main` and passed by reference; nothing reads configuration
/// from global state.
#[derive(Debug, Clone)]
pub struct Settings {
    format: OutputFormat,
    filters: QueryFilters,
    timeout: Duration,
    venues: VenueMapping,
    fields: FieldSet,
    raw: bool,
    endpoints: Endpoints,
}

impl Settings {
    /// Merges flags over the file config over built-in defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let fields = match cli.fields.as_deref() {
            Some(list) => FieldSet::from_cli(list),
            None => file
                .output_fields
                .map(FieldSet::from_config)
                .unwrap_or_default(),
        };

        let filters = QueryFilters::new(
            cli.date_range.or(file.date_range).unwrap_or_default(),
            cli.category.or(file.category).unwrap_or_default(),
            cli.location.or(file.location).unwrap_or_default(),
        );

        let timeout_secs = cli
            .timeout
            .or(file.timeout)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            format: cli.format.or(file.format).unwrap_or_default(),
            filters,
            timeout: Duration::from_secs(timeout_secs),
            venues: file.venue_mappings.unwrap_or_default(),
            fields,
            raw: cli.raw,
            endpoints: Endpoints::default(),
        }
    }

    /// Points the run at other endpoints, e.g. a local test server.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn filters(&self) -> &QueryFilters {
        &self.filters
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn venues(&self) -> &VenueMapping {
        &self.venues
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            filters: QueryFilters::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            venues: VenueMapping::default(),
            fields: FieldSet::default(),
            raw: false,
            endpoints: Endpoints::default(),
        }
    }
}
