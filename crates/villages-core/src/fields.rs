//! Caller-selected output fields.

use tracing::warn;

use crate::path::FieldPath;

/// Field paths known to exist on events returned by the API.
///
/// Only `--fields` overrides from the command line are checked against
/// this list.
pub const AVAILABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "excerpt",
    "category",
    "subcategories",
    "start.date",
    "end.date",
    "allDay",
    "cancelled",
    "featured",
    "location.title",
    "location.category",
    "location.id",
    "address.streetAddress",
    "address.locality",
    "address.region",
    "address.postalCode",
    "address.country",
    "image",
    "url",
    "otherInfo",
    "id",
];

/// Fields used when nothing else is configured.
pub const DEFAULT_FIELDS: &[&str] = &["location.title", "title"];

/// The only field that goes through venue abbreviation.
pub const VENUE_FIELD: &str = "location.title";

/// An ordered, non-empty list of field paths.
///
/// Order drives CSV column order, plain-text key order and which two fields
/// the compact format picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    paths: Vec<FieldPath>,
}

impl FieldSet {
    /// Builds a field set from configuration entries.
    ///
    /// Entries are trimmed and empty ones (zero-segment paths) are dropped.
    /// Falls back to the default set when nothing is left.
    pub fn from_config<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths: Vec<FieldPath> = entries
            .into_iter()
            .filter_map(|entry| {
                let trimmed = entry.as_ref().trim();
                (!trimmed.is_empty()).then(|| FieldPath::parse(trimmed))
            })
            .collect();

        if paths.is_empty() {
            Self::default()
        } else {
            Self { paths }
        }
    }

    /// Builds a field set from a comma-separated `--fields` override.
    ///
    /// Unknown names are dropped with a warning. If no valid name remains
    /// the default set is used.
    pub fn from_cli(list: &str) -> Self {
        let requested: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();

        let (valid, invalid): (Vec<&str>, Vec<&str>) = requested
            .into_iter()
            .partition(|field| AVAILABLE_FIELDS.contains(field));

        if !invalid.is_empty() {
            warn!(
                "Invalid field names will be ignored: {}. Valid fields are: {}",
                invalid.join(", "),
                AVAILABLE_FIELDS.join(", ")
            );
        }

        if valid.is_empty() {
            warn!(
                "No valid fields specified, using defaults: {}",
                DEFAULT_FIELDS.join(", ")
            );
            return Self::default();
        }

        Self {
            paths: valid.into_iter().map(FieldPath::parse).collect(),
        }
    }

    /// Returns the paths in order.
    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }

    /// Returns the path strings in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(FieldPath::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self {
            paths: DEFAULT_FIELDS.iter().copied().map(FieldPath::parse).collect(),
        }
    }
}
