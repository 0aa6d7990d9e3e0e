//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Decant price table (?sort=&filter=)
//! GET  /about                  - About page (markdown)
//!
//! # Products
//! GET  /products               - Product listing (?q=&category=)
//! GET  /product/{id}           - Product detail, or not-found view
//!
//! # Cart (HTMX fragments, redirect for plain forms)
//! GET  /cart                   - Cart panel fragment
//! POST /cart/add               - Add one unit of an item in a size
//! POST /cart/update            - Set a line's quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Columns
//! POST /columns/toggle         - Show/hide one price column
//!
//! # Checkout
//! GET  /checkout               - Redirect to the messaging deep link
//! ```

pub mod cart;
pub mod columns;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/columns/toggle", post(columns::toggle))
        .route("/checkout", get(cart::checkout))
}
