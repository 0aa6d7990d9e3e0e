//! Flat product listing: search, category filter and detail lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Number of description characters shown on a product card.
pub const EXCERPT_CHARS: usize = 60;

/// A product from the listing document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Shortened description for cards, with a trailing ellipsis.
    #[must_use]
    pub fn excerpt(&self) -> String {
        let short: String = self.description.chars().take(EXCERPT_CHARS).collect();
        format!("{short}...")
    }
}

/// Category options: `All` followed by each distinct category in the order it
/// first appears.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// Search term and category selection for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub search: String,
    pub category: String,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl ListingFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let in_category = self.category == ALL_CATEGORIES || product.category == self.category;
        if !in_category {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    /// Products passing both the category and the search filter, in
    /// document order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Result count text, e.g. "Showing 1 product".
#[must_use]
pub fn showing_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Showing {count} product{plural}")
}

/// Find a product by id.
#[must_use]
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}
