//! Core types: field paths, venues, projection, filters, output rendering

pub mod choice;
pub mod event;
pub mod fields;
pub mod filters;
pub mod format;
pub mod path;
pub mod tracing;
pub mod venue;

pub use choice::{Choice, UnknownChoice};
pub use event::{EventProjector, ProcessingError, ProjectedEvent, ProjectionError};
pub use fields::{AVAILABLE_FIELDS, DEFAULT_FIELDS, FieldSet, VENUE_FIELD};
pub use filters::{Category, DateRange, Location, QueryFilters};
pub use format::{FormatError, OutputFormat, OutputFormatter, format_events, to_string_pretty_ascii};
pub use path::{FieldPath, display_value, extract, type_name};
pub use self::tracing::{TracingConfig, TracingError, init_tracing};
pub use venue::VenueMapping;
