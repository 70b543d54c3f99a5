//! Core types for dexter-core.
//!
//! This module defines the catalog record ([`Pokemon`]) shared by every layer,
//! the on-demand [`AbilityDetail`], and the user-facing ordering and filter
//! selections ([`SortKey`], [`TypeFilter`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fallback description used when no English flavor text exists.
pub const NO_DESCRIPTION: &str = "No description available.";

/// A single catalog record, as assembled from the list, detail and species
/// endpoints. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National dex number. Always positive.
    pub id: u32,
    pub name: String,
    /// Type tags in slot order (one or two).
    pub types: Vec<String>,
    /// Ability names in slot order.
    pub abilities: Vec<String>,
    /// English flavor text with form-feeds replaced by spaces.
    #[serde(default = "default_description")]
    pub description: String,
    /// Official artwork URL, falling back to the default sprite.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stats: Vec<BaseStat>,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
}

fn default_description() -> String {
    NO_DESCRIPTION.to_string()
}

impl Pokemon {
    /// The id zero-padded to width 3 (`1` → `"001"`, `1025` → `"1025"`).
    pub fn padded_id(&self) -> String {
        format!("{:03}", self.id)
    }

    /// Height in metres.
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// One base stat line (`hp`, `attack`, `special-defense`, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub base: u32,
}

impl BaseStat {
    /// Display label with the first hyphen turned into a space.
    pub fn label(&self) -> String {
        self.name.replacen('-', " ", 1)
    }
}

/// Ability description fetched lazily for tooltips and the detail modal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityDetail {
    pub name: String,
    pub effect: Option<String>,
    pub short_effect: Option<String>,
}

impl AbilityDetail {
    /// Degraded-but-present record used when a fetch fails.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: None,
            short_effect: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.effect.is_none() && self.short_effect.is_none()
    }

    /// The short effect if present, else the long one.
    pub fn summary(&self) -> Option<&str> {
        self.short_effect.as_deref().or(self.effect.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Explicit sort order
// ---------------------------------------------------------------------------

/// User-selected ordering applied after fuzzy relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name A → Z.
    #[default]
    Alphabetic,
    /// Name Z → A.
    AlphabeticReverse,
    /// Most abilities first.
    Abilities,
    /// Fewest abilities first.
    AbilitiesReverse,
    /// Lowest id first.
    Oldest,
    /// Highest id first.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Alphabetic,
        SortKey::AlphabeticReverse,
        SortKey::Abilities,
        SortKey::AbilitiesReverse,
        SortKey::Oldest,
        SortKey::Newest,
    ];

    /// The next key in [`SortKey::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Alphabetic => "alphabetic",
            SortKey::AlphabeticReverse => "alphabetic-reverse",
            SortKey::Abilities => "abilities",
            SortKey::AbilitiesReverse => "abilities-reverse",
            SortKey::Oldest => "oldest",
            SortKey::Newest => "newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key {0:?} (expected alphabetic, alphabetic-reverse, abilities, abilities-reverse, oldest or newest)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Type filter
// ---------------------------------------------------------------------------

/// Type pre-filter applied before the fuzzy matcher runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeFilter {
    #[default]
    All,
    /// Keep only records carrying exactly this type tag.
    Only(String),
}

impl TypeFilter {
    pub fn admits(&self, pokemon: &Pokemon) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => pokemon.types.iter().any(|ty| ty == t),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => f.write_str(t),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = std::convert::Infallible;

    /// `"all"` (any case) or an empty string is [`TypeFilter::All`]; anything
    /// else is lowercased into [`TypeFilter::Only`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() || s == "all" {
            Ok(TypeFilter::All)
        } else {
            Ok(TypeFilter::Only(s))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
