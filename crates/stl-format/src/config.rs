//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Which decoder to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormatHint {
    /// Run the format detector.
    #[default]
    Auto,
    /// Decode as binary without detection.
    Binary,
    /// Decode as ASCII without detection.
    Ascii,
}

/// How the ASCII decoder treats a `facet ... endfacet` span that lacks a
/// normal or does not hold exactly three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacetPolicy {
    /// A span without a normal or without vertices contributes nothing; a span
    /// with a normal keeps every vertex it holds.
    #[default]
    Lenient,
    /// Any incomplete span fails the parse.
    Strict,
}

/// Options for [`crate::parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub format: FormatHint,
    pub facet_policy: FacetPolicy,
}

impl ParseConfig {
    /// Autodetect, reject incomplete ASCII facets.
    pub fn strict() -> Self {
        Self {
            facet_policy: FacetPolicy::Strict,
            ..Self::default()
        }
    }

    /// Force the binary decoder.
    pub fn binary() -> Self {
        Self {
            format: FormatHint::Binary,
            ..Self::default()
        }
    }

    /// Force the ASCII decoder.
    pub fn ascii() -> Self {
        Self {
            format: FormatHint::Ascii,
            ..Self::default()
        }
    }
}
