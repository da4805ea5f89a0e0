//! Output rendering for projected events.
//!
//! This module serializes a list of [`ProjectedEvent`]s in one of four formats:
//! - **Meshtastic**: compact `value1,value2#` records for mesh radio broadcast
//! - **JSON**: pretty-printed array of objects
//! - **CSV**: header row plus one row per event
//! - **Plain**: one `field: value, ...` line per event
//!
//! # Example
//!
//! ```rust
//! use villages_core::format::{OutputFormat, OutputFormatter};
//! use villages_core::{EventProjector, FieldSet, VenueMapping};
//! use serde_json::json;
//!
//! let projector = EventProjector::new(VenueMapping::default(), FieldSet::default());
//! let events = projector
//!     .process_events(&json!({"events": [
//!         {"location": {"title": "Brownwood Paddock Square"}, "title": "Jazz Band"}
//!     ]}))
//!     .unwrap();
//!
//! let formatter = OutputFormatter::new(projector.fields());
//! let output = formatter.render(OutputFormat::Meshtastic, &events).unwrap();
//! assert_eq!(output, "Brownwood,Jazz Band#");
//! ```

mod json;

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::str::FromStr;

use csv::{Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::choice::{Choice, UnknownChoice};
use crate::event::ProjectedEvent;
use crate::fields::FieldSet;
use crate::path::display_value;

pub use self::json::{AsciiPrettyFormatter, to_string_pretty_ascii};

/// The output format for rendered events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Compact `value1,value2#` records.
    #[default]
    Meshtastic,
    /// Pretty-printed JSON array.
    Json,
    /// CSV with a header row.
    Csv,
    /// One `field: value` line per event.
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meshtastic => "meshtastic",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Plain => "plain",
        }
    }
}

impl Choice for OutputFormat {
    const KIND: &'static str = "format type";
    const ALL: &'static [Self] = &[Self::Meshtastic, Self::Json, Self::Csv, Self::Plain];

    fn as_str(&self) -> &'static str {
        OutputFormat::as_str(self)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

/// Errors raised while rendering.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The format identifier is not one of the supported formats.
    #[error(transparent)]
    UnknownFormat(#[from] UnknownChoice),

    /// JSON serialization failed.
    #[error("failed to serialize events as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("failed to write events as CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Separator between compact records; also terminates the last one.
const RECORD_SEPARATOR: char = '#';

/// Renders projected events in field-set order.
#[derive(Debug, Clone)]
pub struct OutputFormatter<'a> {
    fields: &'a FieldSet,
}

impl<'a> OutputFormatter<'a> {
    /// Creates a formatter that orders output by `fields`.
    pub fn new(fields: &'a FieldSet) -> Self {
        Self { fields }
    }

    /// Renders `events` in the given format.
    pub fn render(&self, format: OutputFormat, events: &[ProjectedEvent]) -> Result<String, FormatError> {
        match format {
            OutputFormat::Meshtastic => Ok(self.format_meshtastic(events)),
            OutputFormat::Json => self.format_json(events),
            OutputFormat::Csv => self.format_csv(events),
            OutputFormat::Plain => Ok(self.format_plain(events)),
        }
    }

    /// Formats events as `value1,value2#value1,value2#`.
    ///
    /// Only the first two fields of the field set are used. An empty list
    /// renders as a lone `#`.
    pub fn format_meshtastic(&self, events: &[ProjectedEvent]) -> String {
        if events.is_empty() {
            return RECORD_SEPARATOR.to_string();
        }

        let columns: Vec<&str> = self.fields.names().take(2).collect();
        let mut out = String::new();
        for event in events {
            let values: Vec<Cow<'_, str>> = columns.iter().map(|c| field_text(event, c)).collect();
            out.push_str(&values.join(","));
            out.push(RECORD_SEPARATOR);
        }
        out
    }

    /// Formats events as a pretty-printed JSON array.
    ///
    /// Each object carries the keys its event was projected with; the field
    /// set is not re-applied here. Non-ASCII text is written as `\uXXXX`
    /// escapes.
    pub fn format_json(&self, events: &[ProjectedEvent]) -> Result<String, FormatError> {
        Ok(to_string_pretty_ascii(events)?)
    }

    /// Formats events as CSV with a header row of field paths.
    ///
    /// Rows end in CRLF and fields are quoted only when needed. An empty
    /// list renders as the header row alone.
    pub fn format_csv(&self, events: &[ProjectedEvent]) -> Result<String, FormatError> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(self.fields.names())?;
        for event in events {
            let row: Vec<Cow<'_, str>> = self.fields.names().map(|f| field_text(event, f)).collect();
            writer.write_record(row.iter().map(|v| v.as_bytes()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| FormatError::Csv(io::Error::new(io::ErrorKind::InvalidData, e).into()))
    }

    /// Formats events as `field1: value1, field2: value2` lines.
    ///
    /// Every line ends with a newline; an empty list renders as nothing.
    pub fn format_plain(&self, events: &[ProjectedEvent]) -> String {
        let mut out = String::new();
        for event in events {
            let pairs: Vec<String> = self
                .fields
                .names()
                .map(|f| format!("{}: {}", f, field_text(event, f)))
                .collect();
            out.push_str(&pairs.join(", "));
            out.push('\n');
        }
        out
    }
}

/// Renders `events` in the format named by `format_id`.
///
/// The identifier is validated before anything is rendered.
pub fn format_events(
    events: &[ProjectedEvent],
    fields: &FieldSet,
    format_id: &str,
) -> Result<String, FormatError> {
    let format: OutputFormat = format_id.parse()?;
    OutputFormatter::new(fields).render(format, events)
}

fn field_text<'e>(event: &'e ProjectedEvent, field: &str) -> Cow<'e, str> {
    event.get(field).map(display_value).unwrap_or(Cow::Borrowed(""))
}
