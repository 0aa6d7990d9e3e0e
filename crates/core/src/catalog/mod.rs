//! Catalog data and the derivations rendered from it.
//!
//! - [`fragrance`] - decant catalog items and the two-source merge
//! - [`filter`] - sort/filter pipeline for the price table
//! - [`columns`] - price-tier column visibility
//! - [`listing`] - flat product listing with search

pub mod columns;
pub mod filter;
pub mod fragrance;
pub mod listing;

pub use columns::ColumnVisibility;
pub use filter::{CategoryFilter, FilterState, ParseFilterError, SortKey};
pub use fragrance::{Fragrance, FragranceRecord, PriceTiers, Provenance, merge_sources};
pub use listing::{ListingFilter, Product};
