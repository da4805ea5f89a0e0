//! Closed sets of string identifiers.
//!
//! Output formats and query filters are each a small fixed set of
//! identifiers shared by the command line, the config file and URL
//! building. Each enum implements [`Choice`] so parsing reports the same
//! [`UnknownChoice`] error everywhere.

use std::fmt;

use thiserror::Error;

/// An identifier outside a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct UnknownChoice {
    /// What was being parsed, e.g. `"format type"`.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
    /// Every accepted identifier, in declaration order.
    pub valid: Vec<&'static str>,
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {}: {}. Valid options are: {}",
            self.kind,
            self.value,
            self.valid.join(", ")
        )
    }
}

/// An enum whose variants map one-to-one onto string identifiers.
pub trait Choice: Copy + 'static {
    /// Human name of the set, used in error messages.
    const KIND: &'static str;

    /// All variants, in declaration order.
    const ALL: &'static [Self];

    /// The identifier used on the command line, in config and in URLs.
    fn as_str(&self) -> &'static str;

    /// Every accepted identifier, in declaration order.
    fn identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }

    /// Looks up the variant for `s`.
    fn parse_choice(s: &str) -> Result<Self, UnknownChoice> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| UnknownChoice {
                kind: Self::KIND,
                value: s.to_string(),
                valid: Self::identifiers(),
            })
    }
}
