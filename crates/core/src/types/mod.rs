//! Core value types for the decant storefront.
//!
//! This module provides type-safe wrappers for ids, prices and size tiers.

pub mod id;
pub mod price;
pub mod size;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use size::{ParseSizeTierError, SizeTier};
