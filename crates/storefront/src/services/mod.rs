//! Business logic services for storefront.
//!
//! # Services
//!
//! - `checkout` - Builds the messaging deep link an order is handed off to

pub mod checkout;
