//! In-memory shopping cart.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s. It is the only way lines
//! are created, changed or removed:
//!
//! - at most one line per (item, size)
//! - quantities are always at least 1; dropping to 0 removes the line
//! - unit prices are captured when the line is created and never re-read
//!   from the catalog

pub mod checkout;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Fragrance, Provenance};
use crate::types::price::available;
use crate::types::{FragranceId, SizeTier};

/// Errors from index-based cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cart line {index} does not exist (cart has {len} lines)")]
    LineNotFound { index: usize, len: usize },
}

/// One (item, size) entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: FragranceId,
    pub provenance: Provenance,
    pub name: String,
    pub size: SizeTier,
    /// Unit price at the time the line was added.
    pub price: Decimal,
    pub quantity: u32,
    pub official_vial: bool,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn is_for(&self, item: &Fragrance, size: SizeTier) -> bool {
        self.id == item.id && self.provenance == item.provenance && self.size == size
    }
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `item` in `size` at `price`.
    ///
    /// Does nothing when the price is missing or not positive, which is how an
    /// unavailable tier shows up. Returns whether the cart changed.
    pub fn add(&mut self, item: &Fragrance, size: SizeTier, price: Option<Decimal>) -> bool {
        let Some(price) = available(price) else {
            return false;
        };

        if let Some(line) = self.lines.iter_mut().find(|line| line.is_for(item, size)) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                id: item.id,
                provenance: item.provenance,
                name: item.name.clone(),
                size,
                price,
                quantity: 1,
                official_vial: item.is_official_vial(),
            });
        }
        true
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A quantity of zero or less removes the line. There is no upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if there is no line at `index`.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(index).map(|_| ());
        }
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound { index, len })?;
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Ok(())
    }

    /// Remove the line at `index`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if there is no line at `index`.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over every line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{FragranceRecord, merge_sources};

    fn catalog() -> Vec<Fragrance> {
        let collection: Vec<FragranceRecord> = serde_json::from_str(
            r#"[{"id":1,"name":"Rose","ml_30":1000,"ml_5":200},{"id":2,"name":"Oud","ml_30":1500}]"#,
        )
        .unwrap();
        let resale: Vec<FragranceRecord> =
            serde_json::from_str(r#"[{"id":1,"name":"Amber","ml_5":350}]"#).unwrap();
        merge_sources(collection, resale)
    }

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let catalog = catalog();
        let rose = &catalog[0];
        let mut cart = Cart::new();

        assert!(cart.add(rose, SizeTier::Ml5, Some(dec(200))));
        assert!(cart.add(rose, SizeTier::Ml5, Some(dec(200))));

        assert_eq!(cart.len(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.id, FragranceId::new(1));
        assert_eq!(line.size, SizeTier::Ml5);
        assert_eq!(line.price, dec(200));
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.total(), dec(400));
    }

    #[test]
    fn test_add_without_price_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();

        assert!(!cart.add(&catalog[0], SizeTier::Ml30, None));
        assert!(!cart.add(&catalog[0], SizeTier::Ml30, Some(Decimal::ZERO)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_sizes_and_sources_get_separate_lines() {
        let catalog = catalog();
        let mut cart = Cart::new();

        cart.add(&catalog[0], SizeTier::Ml5, Some(dec(200)));
        cart.add(&catalog[0], SizeTier::Ml30, Some(dec(1000)));
        cart.add(&catalog[2], SizeTier::Ml5, Some(dec(350)));

        assert_eq!(cart.len(), 3);
        assert!(!cart.lines()[0].official_vial);
        assert!(cart.lines()[2].official_vial);
        assert_eq!(cart.total(), dec(1550));
    }

    #[test]
    fn test_price_captured_at_add_time() {
        let mut catalog = catalog();
        let mut cart = Cart::new();
        let price = catalog[0].price(SizeTier::Ml5);
        cart.add(&catalog[0], SizeTier::Ml5, price);

        catalog[0].name = "Renamed".to_string();
        cart.add(&catalog[0], SizeTier::Ml5, Some(dec(999)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].price, dec(200));
        assert_eq!(cart.lines()[0].name, "Rose");
        assert_eq!(cart.total(), dec(400));
    }

    #[test]
    fn test_update_quantity_zero_removes_exactly_that_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog[0], SizeTier::Ml5, Some(dec(200)));
        cart.add(&catalog[1], SizeTier::Ml30, Some(dec(1500)));
        cart.add(&catalog[2], SizeTier::Ml5, Some(dec(350)));

        cart.update_quantity(1, 0).unwrap();

        assert_eq!(cart.len(), 2);
        let names: Vec<_> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Rose", "Amber"]);
    }

    #[test]
    fn test_update_quantity_sets_value_unbounded() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog[1], SizeTier::Ml30, Some(dec(1500)));

        cart.update_quantity(0, 250).unwrap();

        assert_eq!(cart.lines()[0].quantity, 250);
        assert_eq!(cart.total(), dec(375_000));
    }

    #[test]
    fn test_negative_quantity_removes_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog[1], SizeTier::Ml30, Some(dec(1500)));

        cart.update_quantity(0, -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.remove(0),
            Err(CartError::LineNotFound { index: 0, len: 0 })
        );
        assert_eq!(
            cart.update_quantity(3, 2),
            Err(CartError::LineNotFound { index: 3, len: 0 })
        );
    }

    #[test]
    fn test_clear_and_empty_total() {
        let catalog = catalog();
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add(&catalog[0], SizeTier::Ml30, Some(dec(1000)));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_cart_survives_session_serialization() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog[2], SizeTier::Ml5, Some(Decimal::new(3505, 1)));

        let json = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
