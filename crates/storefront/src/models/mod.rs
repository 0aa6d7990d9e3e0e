//! Storefront-side models.
//!
//! Domain types live in `fraghead-core`; this module only holds what the
//! HTTP layer keeps per visitor.

pub mod session;
