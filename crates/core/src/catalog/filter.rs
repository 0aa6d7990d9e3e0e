//! Sort and filter pipeline for the fragrance table.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fragrance::{Fragrance, Provenance};
use crate::types::SizeTier;

/// Error returned when a sort or filter value is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFilterError {
    #[error("unknown sort key: {0}")]
    SortKey(String),
    #[error("unknown category filter: {0}")]
    Category(String),
}

/// Table sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name, A to Z.
    #[default]
    Name,
    /// Smallest-tier price, low to high.
    PriceLow,
    /// Largest-tier price, high to low.
    PriceHigh,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Name, Self::PriceLow, Self::PriceHigh];

    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    /// Label shown in the sort select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name (A-Z)",
            Self::PriceLow => "Price (Low to High)",
            Self::PriceHigh => "Price (High to Low)",
        }
    }

    fn compare(self, a: &Fragrance, b: &Fragrance) -> Ordering {
        match self {
            Self::Name => compare_names(&a.name, &b.name),
            Self::PriceLow => a
                .prices
                .get_or_zero(SizeTier::SMALLEST)
                .cmp(&b.prices.get_or_zero(SizeTier::SMALLEST)),
            Self::PriceHigh => b
                .prices
                .get_or_zero(SizeTier::LARGEST)
                .cmp(&a.prices.get_or_zero(SizeTier::LARGEST)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseFilterError::SortKey(s.to_string()))
    }
}

/// Which part of the catalog to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Official,
    Collection,
}

impl CategoryFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Official, Self::Collection];

    /// Wire name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Official => "official",
            Self::Collection => "collection",
        }
    }

    /// Label shown in the filter select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Fragrances",
            Self::Official => "Official Vials Only",
            Self::Collection => "My Collection Only",
        }
    }

    /// Whether an item passes this filter.
    #[must_use]
    pub fn matches(self, item: &Fragrance) -> bool {
        match self {
            Self::All => true,
            Self::Official => item.provenance == Provenance::Official,
            Self::Collection => item.provenance == Provenance::Collection,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .ok_or_else(|| ParseFilterError::Category(s.to_string()))
    }
}

/// Current sort key and category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub sort: SortKey,
    pub filter: CategoryFilter,
}

impl FilterState {
    #[must_use]
    pub const fn new(sort: SortKey, filter: CategoryFilter) -> Self {
        Self { sort, filter }
    }

    /// Derive the displayed rows from the catalog.
    ///
    /// The catalog itself is left untouched. Sorting is stable, so items that
    /// compare equal keep their catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a [Fragrance]) -> Vec<&'a Fragrance> {
        let mut rows: Vec<&Fragrance> = catalog
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        rows
    }
}

/// Case-insensitive comparison with the raw string as tie-breaker.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
