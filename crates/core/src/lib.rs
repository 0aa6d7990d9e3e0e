//! Fraghead Core - Shared domain library for the decant storefront.
//!
//! This crate provides the types and pure logic used by every Fraghead
//! component:
//! - `storefront` - Public-facing catalog and cart site
//! - `cli` - Command-line tools for inspecting and validating catalog data
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. Loading data and holding per-visitor state is the
//! storefront's job.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and size tiers
//! - [`catalog`] - Catalog items, the sort/filter pipeline and column toggles
//! - [`cart`] - The cart store and the checkout order message

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use types::*;
