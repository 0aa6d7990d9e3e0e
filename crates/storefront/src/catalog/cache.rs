//! Cache types for loaded catalog documents.

use std::sync::Arc;

use fraghead_core::catalog::{Fragrance, Product};

/// Cache key for catalog documents.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Fragrances,
    Products,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Fragrances(Arc<Vec<Fragrance>>),
    Products(Arc<Vec<Product>>),
}
