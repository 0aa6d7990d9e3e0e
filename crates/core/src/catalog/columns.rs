//! Which price-tier columns the table shows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SizeTier;

/// Per-tier column toggles. Every tier is visible unless switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnVisibility(BTreeMap<SizeTier, bool>);

impl Default for ColumnVisibility {
    fn default() -> Self {
        Self(SizeTier::ALL.into_iter().map(|tier| (tier, true)).collect())
    }
}

impl ColumnVisibility {
    #[must_use]
    pub fn is_visible(&self, tier: SizeTier) -> bool {
        self.0.get(&tier).copied().unwrap_or(true)
    }

    /// Flip one column, leaving the others alone. Returns the new state.
    pub fn toggle(&mut self, tier: SizeTier) -> bool {
        let visible = self.0.entry(tier).or_insert(true);
        *visible = !*visible;
        *visible
    }

    /// Visible tiers in table order.
    pub fn visible_tiers(&self) -> impl Iterator<Item = SizeTier> + '_ {
        SizeTier::ALL
            .into_iter()
            .filter(|tier| self.is_visible(*tier))
    }
}
