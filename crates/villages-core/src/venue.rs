//! Venue abbreviation.
//!
//! Venue strings coming back from the events API are long
//! (`"Brownwood Paddock Square"`). A [`VenueMapping`] shortens them by
//! keyword containment: the first keyword, in mapping order, that occurs
//! anywhere in the venue string selects the abbreviation.

use std::borrow::Cow;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered keyword → abbreviation table.
///
/// Order matters: matching is first-hit, not longest-match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueMapping {
    entries: Vec<(String, String)>,
}

impl VenueMapping {
    /// Creates an empty mapping. Every venue passes through unchanged.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a mapping from `(keyword, abbreviation)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Appends a keyword. Later keywords only win when no earlier one matches.
    pub fn with_entry(mut self, keyword: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        self.entries.push((keyword.into(), abbreviation.into()));
        self
    }

    /// Returns the entries in match order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Abbreviates `venue`.
    ///
    /// Matching is case-sensitive substring containment. An empty venue, or
    /// one that contains no keyword, is returned unchanged.
    pub fn abbreviate<'a>(&'a self, venue: &'a str) -> Cow<'a, str> {
        if venue.is_empty() {
            return Cow::Borrowed(venue);
        }

        self.entries
            .iter()
            .find(|(keyword, _)| venue.contains(keyword.as_str()))
            .map(|(_, abbreviation)| Cow::Borrowed(abbreviation.as_str()))
            .unwrap_or(Cow::Borrowed(venue))
    }
}

impl Default for VenueMapping {
    /// The town squares and Sawgrass Grove, each abbreviated to its short name.
    fn default() -> Self {
        Self::from_pairs([
            ("Brownwood", "Brownwood"),
            ("Sawgrass", "Sawgrass"),
            ("Spanish Springs", "Spanish Springs"),
            ("Lake Sumter", "Lake Sumter"),
        ])
    }
}

impl Serialize for VenueMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (keyword, abbreviation) in &self.entries {
            map.serialize_entry(keyword, abbreviation)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VenueMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = VenueMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of venue keywords to abbreviations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((keyword, abbreviation)) = access.next_entry::<String, String>()? {
                    entries.push((keyword, abbreviation));
                }
                Ok(VenueMapping { entries })
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
