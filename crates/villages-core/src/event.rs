//! Event projection.
//!
//! This module turns raw API event records into flat, caller-selected
//! views:
//! - [`ProjectedEvent`]: field path → value, keyed exactly by the [`FieldSet`]
//! - [`EventProjector`]: applies a [`FieldSet`] and [`VenueMapping`] to raw events
//! - [`ProcessingError`]: the API response does not carry an `events` list

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::fields::{FieldSet, VENUE_FIELD};
use crate::path::{extract, type_name};
use crate::venue::VenueMapping;

/// The API response is structurally unusable as a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("Missing 'events' key in API response")]
    MissingEvents,

    #[error("'events' field is not a list (found {found})")]
    NotAList { found: &'static str },
}

/// A single event could not be projected.
///
/// The batch logs and skips such events instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// `location.title` resolved to a non-zero number or `true`.
    #[error("venue field '{field}' holds {found}, expected a string, list or object")]
    VenueNotText { field: String, found: &'static str },
}

/// A flat projection of one raw event.
///
/// Keys are the field path strings of the [`FieldSet`] in order; values are
/// never `null` (missing data is the empty string).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedEvent {
    fields: Vec<(String, Value)>,
}

impl ProjectedEvent {
    fn insert(&mut self, key: &str, value: Value) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(key, value)` pairs in projection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ProjectedEvent {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut event = Self::default();
        for (key, value) in iter {
            let key: String = key.into();
            let value = if value.is_null() {
                Value::String(String::new())
            } else {
                value
            };
            event.insert(&key, value);
        }
        event
    }
}

impl Serialize for ProjectedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Projects raw events onto a [`FieldSet`].
#[derive(Debug, Clone)]
pub struct EventProjector {
    venues: VenueMapping,
    fields: FieldSet,
}

impl EventProjector {
    pub fn new(venues: VenueMapping, fields: FieldSet) -> Self {
        Self { venues, fields }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn venues(&self) -> &VenueMapping {
        &self.venues
    }

    /// Projects a single raw event.
    ///
    /// Every path of the field set ends up as a key. Only the literal
    /// `location.title` path is abbreviated.
    pub fn project(&self, event: &Value) -> Result<ProjectedEvent, ProjectionError> {
        let mut projected = ProjectedEvent::default();

        for path in self.fields.paths() {
            let mut value = extract(event, path);

            if path.as_str() == VENUE_FIELD {
                value = self.normalize_venue(value)?;
            }

            projected.insert(path.as_str(), value);
        }

        Ok(projected)
    }

    /// Abbreviates the venue value.
    ///
    /// Text is matched by substring. A list matches a keyword it holds as
    /// an element and an object matches a keyword it holds as a key; either
    /// becomes the abbreviation, otherwise it is kept unchanged.
    fn normalize_venue(&self, value: Value) -> Result<Value, ProjectionError> {
        let matched = match &value {
            Value::String(venue) if !venue.is_empty() => {
                return Ok(Value::String(self.venues.abbreviate(venue).into_owned()));
            }
            Value::Array(items) => self.venue_abbreviation(|keyword| {
                items.iter().any(|item| item.as_str() == Some(keyword))
            }),
            Value::Object(map) => self.venue_abbreviation(|keyword| map.contains_key(keyword)),
            Value::Number(_) | Value::Bool(_) if is_truthy(&value) => {
                return Err(ProjectionError::VenueNotText {
                    field: VENUE_FIELD.to_string(),
                    found: type_name(&value),
                });
            }
            _ => None,
        };

        Ok(matched.map_or(value, |abbreviation| Value::String(abbreviation.to_string())))
    }

    fn venue_abbreviation(&self, holds: impl Fn(&str) -> bool) -> Option<&str> {
        self.venues
            .entries()
            .iter()
            .find(|(keyword, _)| holds(keyword))
            .map(|(_, abbreviation)| abbreviation.as_str())
    }

    /// Projects the `events` list of an API response.
    ///
    /// Output order follows input order. Events that fail projection are
    /// logged and skipped; a missing or non-list `events` entry fails the
    /// whole batch.
    pub fn process_events(&self, response: &Value) -> Result<Vec<ProjectedEvent>, ProcessingError> {
        let events = response
            .get("events")
            .ok_or(ProcessingError::MissingEvents)?;

        let events = events.as_array().ok_or(ProcessingError::NotAList {
            found: type_name(events),
        })?;

        let mut projected = Vec::with_capacity(events.len());
        for (idx, event) in events.iter().enumerate() {
            match self.project(event) {
                Ok(p) => projected.push(p),
                Err(e) => warn!("Error processing event at index {}: {}, skipping", idx, e),
            }
        }

        debug!(
            "projected {} of {} events onto {} fields",
            projected.len(),
            events.len(),
            self.fields.len()
        );
        Ok(projected)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projector() -> EventProjector {
        EventProjector::new(VenueMapping::default(), FieldSet::default())
    }

    fn keys(event: &ProjectedEvent) -> Vec<&str> {
        event.keys().collect()
    }

    #[test]
    fn project_abbreviates_venue() {
        let event = json!({
            "location": {"title": "Brownwood Paddock Square"},
            "title": "Jazz Band"
        });
        let projected = projector().project(&event).unwrap();
        assert_eq!(projected.get("location.title"), Some(&json!("Brownwood")));
        assert_eq!(projected.get("title"), Some(&json!("Jazz Band")));
        assert_eq!(keys(&projected), vec!["location.title", "title"]);
    }

    #[test]
    fn project_missing_location() {
        let event = json!({"title": "Solo Act"});
        let projected = projector().project(&event).unwrap();
        assert_eq!(projected.get("location.title"), Some(&json!("")));
        assert_eq!(projected.get("title"), Some(&json!("Solo Act")));
    }

    #[test]
    fn project_empty_record_has_every_key() {
        let fields = FieldSet::from_config(["title", "start.date", "address.locality", "id"]);
        let projector = EventProjector::new(VenueMapping::default(), fields);
        let projected = projector.project(&json!({})).unwrap();
        assert_eq!(projected.len(), 4);
        assert!(projected.iter().all(|(_, v)| v == &json!("")));
    }

    #[test]
    fn venue_mapping_only_touches_location_title() {
        let fields = FieldSet::from_config(["title", "location.title"]);
        let projector = EventProjector::new(VenueMapping::default(), fields);
        let event = json!({
            "title": "Brownwood Paddock Square",
            "location": {"title": "Brownwood Paddock Square"}
        });
        let projected = projector.project(&event).unwrap();
        assert_eq!(projected.get("title"), Some(&json!("Brownwood Paddock Square")));
        assert_eq!(projected.get("location.title"), Some(&json!("Brownwood")));
        assert_eq!(keys(&projected), vec!["title", "location.title"]);
    }

    #[test]
    fn non_string_leaves_are_kept() {
        let fields = FieldSet::from_config(["allDay", "location.id"]);
        let projector = EventProjector::new(VenueMapping::default(), fields);
        let event = json!({"allDay": true, "location": {"id": 7}});
        let projected = projector.project(&event).unwrap();
        assert_eq!(projected.get("allDay"), Some(&json!(true)));
        assert_eq!(projected.get("location.id"), Some(&json!(7)));
    }

    #[test]
    fn numeric_venue_fails_single_event() {
        let event = json!({"location": {"title": 12}, "title": "x"});
        let err = projector().project(&event).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::VenueNotText {
                field: "location.title".to_string(),
                found: "number"
            }
        );
    }

    #[test]
    fn true_venue_fails_single_event() {
        let event = json!({"location": {"title": true}});
        let err = projector().project(&event).unwrap_err();
        assert!(matches!(err, ProjectionError::VenueNotText { found: "boolean", .. }));
    }

    #[test]
    fn list_venue_matches_whole_elements() {
        let hit = json!({"location": {"title": ["Stage", "Brownwood"]}});
        let projected = projector().project(&hit).unwrap();
        assert_eq!(projected.get("location.title"), Some(&json!("Brownwood")));

        let miss = json!({"location": {"title": ["Brownwood Paddock Square"]}});
        let projected = projector().project(&miss).unwrap();
        assert_eq!(
            projected.get("location.title"),
            Some(&json!(["Brownwood Paddock Square"]))
        );
    }

    #[test]
    fn object_venue_matches_keys() {
        let hit = json!({"location": {"title": {"Sawgrass": 1}}});
        let projected = projector().project(&hit).unwrap();
        assert_eq!(projected.get("location.title"), Some(&json!("Sawgrass")));

        let miss = json!({"location": {"title": {"name": "Sawgrass Grove"}}});
        let projected = projector().project(&miss).unwrap();
        assert_eq!(
            projected.get("location.title"),
            Some(&json!({"name": "Sawgrass Grove"}))
        );
    }

    #[test]
    fn falsy_venue_is_stored_as_is() {
        let event = json!({"location": {"title": false}, "title": "x"});
        let projected = projector().project(&event).unwrap();
        assert_eq!(projected.get("location.title"), Some(&json!(false)));
    }

    #[test]
    fn process_events_in_order() {
        let response = json!({
            "events": [
                {"location": {"title": "Brownwood Paddock Square"}, "title": "Jazz Band"},
                {"location": {"title": "Spanish Springs Town Square"}, "title": "Rock Group"},
                {"location": {"title": "Sawgrass Grove"}, "title": "Country Singer"}
            ]
        });
        let events = projector().process_events(&response).unwrap();
        let titles: Vec<_> = events.iter().map(|e| e.get("title").unwrap().clone()).collect();
        assert_eq!(
            titles,
            vec![json!("Jazz Band"), json!("Rock Group"), json!("Country Singer")]
        );
        assert_eq!(events[1].get("location.title"), Some(&json!("Spanish Springs")));
    }

    #[test]
    fn process_events_keeps_list_venue() {
        let response = json!({
            "events": [{"title": "Jazz", "location": {"title": ["Brownwood Paddock Square"]}}]
        });
        let events = projector().process_events(&response).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].get("location.title"),
            Some(&json!(["Brownwood Paddock Square"]))
        );
        assert_eq!(events[0].get("title"), Some(&json!("Jazz")));
    }

    #[test]
    fn process_events_skips_bad_event() {
        let response = json!({
            "events": [
                {"location": {"title": 42}, "title": "Broken"},
                {"location": {"title": "Brownwood Paddock Square"}, "title": "Valid Event"}
            ]
        });
        let events = projector().process_events(&response).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].get("title"), Some(&json!("Valid Event")));
    }

    #[test]
    fn process_events_non_object_event_degrades() {
        let response = json!({"events": ["oops", null]});
        let events = projector().process_events(&response).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].get("title"), Some(&json!("")));
    }

    #[test]
    fn process_events_empty_list() {
        let events = projector().process_events(&json!({"events": []})).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn process_events_missing_key() {
        let err = projector().process_events(&json!({"total": 0})).unwrap_err();
        assert_eq!(err, ProcessingError::MissingEvents);
    }

    #[test]
    fn process_events_not_a_list() {
        let err = projector()
            .process_events(&json!({"events": "not a list"}))
            .unwrap_err();
        assert_eq!(err, ProcessingError::NotAList { found: "string" });
        assert!(err.to_string().contains("not a list"));
    }

    #[test]
    fn projected_event_serializes_in_order() {
        let event: ProjectedEvent = [("title", json!("A")), ("location.title", json!(null))]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"title":"A","location.title":""}"#
        );
    }
}
