//! Fragrances offered as decants, and the records they are loaded from.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::price::available;
use crate::types::{FragranceId, SizeTier};

/// Where a catalog item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Decanted from the seller's own bottles.
    #[default]
    Collection,
    /// Resold official manufacturer vials.
    Official,
}

impl Provenance {
    /// Wire name used in forms and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Official => "official",
        }
    }
}

/// A fragrance record as it appears in a catalog document.
///
/// Price tiers are sparse: a missing field, `null` or a non-positive number
/// all mean the tier is not offered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FragranceRecord {
    pub id: FragranceId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ml_30: Option<Decimal>,
    #[serde(default)]
    pub ml_20: Option<Decimal>,
    #[serde(default)]
    pub ml_10: Option<Decimal>,
    #[serde(default)]
    pub ml_5: Option<Decimal>,
}

/// Prices keyed by size tier. Only offered tiers are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriceTiers(BTreeMap<SizeTier, Decimal>);

impl PriceTiers {
    /// Price for a tier, if it is offered.
    #[must_use]
    pub fn get(&self, tier: SizeTier) -> Option<Decimal> {
        self.0.get(&tier).copied()
    }

    /// Price for a tier, with unavailable tiers counting as zero.
    #[must_use]
    pub fn get_or_zero(&self, tier: SizeTier) -> Decimal {
        self.get(tier).unwrap_or(Decimal::ZERO)
    }

    /// Iterate offered tiers in table order.
    pub fn iter(&self) -> impl Iterator<Item = (SizeTier, Decimal)> + '_ {
        self.0.iter().map(|(tier, price)| (*tier, *price))
    }

    /// Returns `true` if no tier is offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SizeTier, Option<Decimal>)> for PriceTiers {
    fn from_iter<I: IntoIterator<Item = (SizeTier, Option<Decimal>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter_map(|(tier, price)| available(price).map(|p| (tier, p)))
                .collect(),
        )
    }
}

/// A catalog item, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragrance {
    pub id: FragranceId,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub prices: PriceTiers,
    pub provenance: Provenance,
}

impl Fragrance {
    /// Build a catalog item from a document record.
    #[must_use]
    pub fn from_record(record: FragranceRecord, provenance: Provenance) -> Self {
        let prices = [
            (SizeTier::Ml30, record.ml_30),
            (SizeTier::Ml20, record.ml_20),
            (SizeTier::Ml10, record.ml_10),
            (SizeTier::Ml5, record.ml_5),
        ]
        .into_iter()
        .collect();

        Self {
            id: record.id,
            name: record.name,
            category: record.category,
            description: record.description,
            prices,
            provenance,
        }
    }

    /// Whether this item is a resold official vial.
    #[must_use]
    pub fn is_official_vial(&self) -> bool {
        self.provenance == Provenance::Official
    }

    /// Price of a tier, if offered.
    #[must_use]
    pub fn price(&self, tier: SizeTier) -> Option<Decimal> {
        self.prices.get(tier)
    }
}

/// Merge the personal collection and the resale dataset into one catalog.
///
/// Collection items come first, then resale items, each in document order.
#[must_use]
pub fn merge_sources(
    collection: Vec<FragranceRecord>,
    resale: Vec<FragranceRecord>,
) -> Vec<Fragrance> {
    collection
        .into_iter()
        .map(|record| Fragrance::from_record(record, Provenance::Collection))
        .chain(
            resale
                .into_iter()
                .map(|record| Fragrance::from_record(record, Provenance::Official)),
        )
        .collect()
}

/// Find a catalog item by provenance and id.
#[must_use]
pub fn find(catalog: &[Fragrance], provenance: Provenance, id: FragranceId) -> Option<&Fragrance> {
    catalog
        .iter()
        .find(|item| item.provenance == provenance && item.id == id)
}

/// Ids that appear more than once within the same source.
#[must_use]
pub fn duplicate_ids(catalog: &[Fragrance]) -> Vec<(Provenance, FragranceId)> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for item in catalog {
        let key = (item.provenance, item.id);
        if !seen.insert(key) && !duplicates.contains(&key) {
            duplicates.push(key);
        }
    }
    duplicates
}
