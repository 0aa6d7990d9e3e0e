//! Visitor state kept in the session.
//!
//! The cart, the column toggles and the catalog sort/filter all live in the
//! visitor's session record. Handlers load a value, change it through its own
//! methods, and write it back within the same request.

use fraghead_core::Cart;
use fraghead_core::catalog::{ColumnVisibility, FilterState};
use serde::{Serialize, de::DeserializeOwned};
use tower_sessions::Session;

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the price-column toggles.
    pub const COLUMNS: &str = "columns";

    /// Key for the catalog sort key and category filter.
    pub const FILTERS: &str = "filters";
}

/// Load a value, falling back to its default when absent.
async fn load<T: DeserializeOwned + Default>(
    session: &Session,
    key: &str,
) -> Result<T, tower_sessions::session::Error> {
    Ok(session.get::<T>(key).await?.unwrap_or_default())
}

async fn save<T: Serialize + Sync>(
    session: &Session,
    key: &str,
    value: &T,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(key, value).await
}

/// Get the visitor's cart (empty when none has been stored yet).
///
/// # Errors
///
/// Returns an error if the session record cannot be read or decoded.
pub async fn cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    load(session, keys::CART).await
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session record cannot be written.
pub async fn set_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    save(session, keys::CART, cart).await
}

/// Get the visitor's column toggles.
///
/// # Errors
///
/// Returns an error if the session record cannot be read or decoded.
pub async fn columns(
    session: &Session,
) -> Result<ColumnVisibility, tower_sessions::session::Error> {
    load(session, keys::COLUMNS).await
}

/// Store the visitor's column toggles.
///
/// # Errors
///
/// Returns an error if the session record cannot be written.
pub async fn set_columns(
    session: &Session,
    columns: &ColumnVisibility,
) -> Result<(), tower_sessions::session::Error> {
    save(session, keys::COLUMNS, columns).await
}

/// Get the visitor's last sort/filter selection.
///
/// # Errors
///
/// Returns an error if the session record cannot be read or decoded.
pub async fn filters(session: &Session) -> Result<FilterState, tower_sessions::session::Error> {
    load(session, keys::FILTERS).await
}

/// Store the visitor's sort/filter selection.
///
/// # Errors
///
/// Returns an error if the session record cannot be written.
pub async fn set_filters(
    session: &Session,
    filters: &FilterState,
) -> Result<(), tower_sessions::session::Error> {
    save(session, keys::FILTERS, filters).await
}
