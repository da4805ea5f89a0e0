//! Query filters for the events calendar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::choice::{Choice, UnknownChoice};

/// Which days to list events for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum DateRange {
    #[default]
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    ThisMonth,
    NextMonth,
    /// No date filter.
    All,
}

impl Choice for DateRange {
    const KIND: &'static str = "date range";
    const ALL: &'static [Self] = &[
        Self::Today,
        Self::Tomorrow,
        Self::ThisWeek,
        Self::NextWeek,
        Self::ThisMonth,
        Self::NextMonth,
        Self::All,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::ThisWeek => "this-week",
            Self::NextWeek => "next-week",
            Self::ThisMonth => "this-month",
            Self::NextMonth => "next-month",
            Self::All => "all",
        }
    }
}

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Entertainment,
    ArtsAndCrafts,
    HealthAndWellness,
    Recreation,
    SocialClubs,
    SpecialEvents,
    Sports,
    /// No category filter.
    All,
}

impl Choice for Category {
    const KIND: &'static str = "category";
    const ALL: &'static [Self] = &[
        Self::Entertainment,
        Self::ArtsAndCrafts,
        Self::HealthAndWellness,
        Self::Recreation,
        Self::SocialClubs,
        Self::SpecialEvents,
        Self::Sports,
        Self::All,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Entertainment => "entertainment",
            Self::ArtsAndCrafts => "arts-and-crafts",
            Self::HealthAndWellness => "health-and-wellness",
            Self::Recreation => "recreation",
            Self::SocialClubs => "social-clubs",
            Self::SpecialEvents => "special-events",
            Self::Sports => "sports",
            Self::All => "all",
        }
    }
}

/// Venue group or single venue.
///
/// Identifiers are sent to the API verbatim, which is why they carry
/// `+` for spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Location {
    #[default]
    #[serde(rename = "town-squares")]
    #[cfg_attr(feature = "clap", value(name = "town-squares"))]
    TownSquares,
    #[serde(rename = "Lake+Sumter+Landing+Market+Square")]
    #[cfg_attr(feature = "clap", value(name = "Lake+Sumter+Landing+Market+Square"))]
    LakeSumterLanding,
    #[serde(rename = "Spanish+Springs+Town+Square")]
    #[cfg_attr(feature = "clap", value(name = "Spanish+Springs+Town+Square"))]
    SpanishSprings,
    #[serde(rename = "Brownwood+Paddock+Square")]
    #[cfg_attr(feature = "clap", value(name = "Brownwood+Paddock+Square"))]
    Brownwood,
    #[serde(rename = "Sawgrass+Grove")]
    #[cfg_attr(feature = "clap", value(name = "Sawgrass+Grove"))]
    SawgrassGrove,
    #[serde(rename = "The+Show+Kitchen+at+Sawgrass+Grove")]
    #[cfg_attr(feature = "clap", value(name = "The+Show+Kitchen+at+Sawgrass+Grove"))]
    ShowKitchen,
    #[serde(rename = "entertainment")]
    #[cfg_attr(feature = "clap", value(name = "entertainment"))]
    Entertainment,
    #[serde(rename = "The+Sharon")]
    #[cfg_attr(feature = "clap", value(name = "The+Sharon"))]
    TheSharon,
    #[serde(rename = "The+Studio+Theatre+at+Tierra+Del+Sol")]
    #[cfg_attr(feature = "clap", value(name = "The+Studio+Theatre+at+Tierra+Del+Sol"))]
    StudioTheatre,
    #[serde(rename = "sports-recreation")]
    #[cfg_attr(feature = "clap", value(name = "sports-recreation"))]
    SportsRecreation,
    #[serde(rename = "Savannah+Recreation")]
    #[cfg_attr(feature = "clap", value(name = "Savannah+Recreation"))]
    SavannahRecreation,
    #[serde(rename = "sports")]
    #[cfg_attr(feature = "clap", value(name = "sports"))]
    Sports,
    #[serde(rename = "executive-golf")]
    #[cfg_attr(feature = "clap", value(name = "executive-golf"))]
    ExecutiveGolf,
    #[serde(rename = "Polo+Club")]
    #[cfg_attr(feature = "clap", value(name = "Polo+Club"))]
    PoloClub,
    /// No location filter.
    #[serde(rename = "all")]
    #[cfg_attr(feature = "clap", value(name = "all"))]
    All,
}

impl Choice for Location {
    const KIND: &'static str = "location";
    const ALL: &'static [Self] = &[
        Self::TownSquares,
        Self::LakeSumterLanding,
        Self::SpanishSprings,
        Self::Brownwood,
        Self::SawgrassGrove,
        Self::ShowKitchen,
        Self::Entertainment,
        Self::TheSharon,
        Self::StudioTheatre,
        Self::SportsRecreation,
        Self::SavannahRecreation,
        Self::Sports,
        Self::ExecutiveGolf,
        Self::PoloClub,
        Self::All,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::TownSquares => "town-squares",
            Self::LakeSumterLanding => "Lake+Sumter+Landing+Market+Square",
            Self::SpanishSprings => "Spanish+Springs+Town+Square",
            Self::Brownwood => "Brownwood+Paddock+Square",
            Self::SawgrassGrove => "Sawgrass+Grove",
            Self::ShowKitchen => "The+Show+Kitchen+at+Sawgrass+Grove",
            Self::Entertainment => "entertainment",
            Self::TheSharon => "The+Sharon",
            Self::StudioTheatre => "The+Studio+Theatre+at+Tierra+Del+Sol",
            Self::SportsRecreation => "sports-recreation",
            Self::SavannahRecreation => "Savannah+Recreation",
            Self::Sports => "sports",
            Self::ExecutiveGolf => "executive-golf",
            Self::PoloClub => "Polo+Club",
            Self::All => "all",
        }
    }
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        Choice::as_str(self)
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        Choice::as_str(self)
    }
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        Choice::as_str(self)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

impl FromStr for Category {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

impl FromStr for Location {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

/// The three filter dimensions of a calendar query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pub date_range: DateRange,
    pub category: Category,
    pub location: Location,
}

impl QueryFilters {
    pub fn new(date_range: DateRange, category: Category, location: Location) -> Self {
        Self {
            date_range,
            category,
            location,
        }
    }

    /// Returns the query parameters for these filters.
    ///
    /// A dimension set to `all` contributes no parameter.
    pub fn query_params(&self) -> Vec<(&'static str, &'static str)> {
        let mut params = Vec::with_capacity(3);
        if self.date_range != DateRange::All {
            params.push(("dateRange", self.date_range.as_str()));
        }
        if self.category != Category::All {
            params.push(("categories", self.category.as_str()));
        }
        if self.location != Location::All {
            params.push(("locationCategories", self.location.as_str()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let filters = QueryFilters::default();
        assert_eq!(filters.date_range, DateRange::Today);
        assert_eq!(filters.category, Category::Entertainment);
        assert_eq!(filters.location, Location::TownSquares);
    }

    #[test]
    fn default_params() {
        assert_eq!(
            QueryFilters::default().query_params(),
            vec![
                ("dateRange", "today"),
                ("categories", "entertainment"),
                ("locationCategories", "town-squares"),
            ]
        );
    }

    #[test]
    fn all_dimensions_are_omitted() {
        let filters = QueryFilters::new(DateRange::All, Category::Sports, Location::All);
        assert_eq!(filters.query_params(), vec![("categories", "sports")]);

        let everything = QueryFilters::new(DateRange::All, Category::All, Location::All);
        assert!(everything.query_params().is_empty());
    }

    #[test]
    fn location_identifiers_keep_plus_signs() {
        let location: Location = "Brownwood+Paddock+Square".parse().unwrap();
        assert_eq!(location, Location::Brownwood);
        assert_eq!(Location::StudioTheatre.as_str(), "The+Studio+Theatre+at+Tierra+Del+Sol");
    }

    #[test]
    fn invalid_date_range() {
        let err = "yesterday".parse::<DateRange>().unwrap_err();
        assert!(err.to_string().starts_with("Invalid date range: yesterday."));
        assert!(err.to_string().contains("this-week"));
    }

    #[test]
    fn identifier_counts() {
        assert_eq!(DateRange::identifiers().len(), 7);
        assert_eq!(Category::identifiers().len(), 8);
        assert_eq!(Location::identifiers().len(), 15);
    }

    fn assert_serde_matches<T>(all: &[T])
    where
        T: Choice + serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        for choice in all {
            let encoded = serde_json::to_value(choice).unwrap();
            assert_eq!(encoded, serde_json::json!(choice.as_str()));
            let decoded: T = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, *choice);
        }
    }

    #[test]
    fn serde_names_match_identifiers() {
        assert_serde_matches(DateRange::ALL);
        assert_serde_matches(Category::ALL);
        assert_serde_matches(Location::ALL);
    }

    #[test]
    fn deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<Location>(r#""moon""#).is_err());
        assert!(serde_json::from_str::<DateRange>(r#""yesterday""#).is_err());
    }
}
