//! Decant size tiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a size label cannot be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size tier: {0}")]
pub struct ParseSizeTierError(pub String);

/// One of the fixed volumes a decant can be ordered in.
///
/// Variants are declared largest first, which is also the column order of the
/// price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    #[serde(rename = "30ml")]
    Ml30,
    #[serde(rename = "20ml")]
    Ml20,
    #[serde(rename = "10ml")]
    Ml10,
    #[serde(rename = "5ml")]
    Ml5,
}

impl SizeTier {
    /// All tiers in table order.
    pub const ALL: [Self; 4] = [Self::Ml30, Self::Ml20, Self::Ml10, Self::Ml5];

    /// The largest volume on offer.
    pub const LARGEST: Self = Self::Ml30;

    /// The smallest volume on offer.
    pub const SMALLEST: Self = Self::Ml5;

    /// Human-readable label, e.g. `30ml`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ml30 => "30ml",
            Self::Ml20 => "20ml",
            Self::Ml10 => "10ml",
            Self::Ml5 => "5ml",
        }
    }

    /// Field name used by the catalog documents, e.g. `ml_30`.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Ml30 => "ml_30",
            Self::Ml20 => "ml_20",
            Self::Ml10 => "ml_10",
            Self::Ml5 => "ml_5",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SizeTier {
    type Err = ParseSizeTierError;

    /// Accepts either the label (`5ml`) or the field name (`ml_5`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tier| s.eq_ignore_ascii_case(tier.label()) || s == tier.field_name())
            .ok_or_else(|| ParseSizeTierError(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_field_name() {
        assert_eq!("5ml".parse::<SizeTier>().unwrap(), SizeTier::Ml5);
        assert_eq!("30ML".parse::<SizeTier>().unwrap(), SizeTier::Ml30);
        assert_eq!("ml_20".parse::<SizeTier>().unwrap(), SizeTier::Ml20);
        assert_eq!(
            "50ml".parse::<SizeTier>(),
            Err(ParseSizeTierError("50ml".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_label() {
        assert_eq!(serde_json::to_string(&SizeTier::Ml10).unwrap(), "\"10ml\"");
        let tier: SizeTier = serde_json::from_str("\"5ml\"").unwrap();
        assert_eq!(tier, SizeTier::Ml5);
    }

    #[test]
    fn test_largest_sorts_first() {
        let mut tiers = vec![SizeTier::Ml5, SizeTier::Ml30, SizeTier::Ml10];
        tiers.sort();
        assert_eq!(tiers, vec![SizeTier::Ml30, SizeTier::Ml10, SizeTier::Ml5]);
    }
}
