//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation loads it, changes
//! it through [`Cart`]'s own methods and stores it back before responding.
//!
//! HTMX requests get the cart panel fragment back together with an
//! `HX-Trigger: cart-updated` header; plain form posts are redirected to `/`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use fraghead_core::catalog::{Provenance, fragrance};
use fraghead_core::{Cart, CartLine, FragranceId, Price, SizeTier};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::models::session;
use crate::services::checkout::checkout_url;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    /// Position in the cart; the handle for update and remove.
    pub index: usize,
    pub name: String,
    pub official_vial: bool,
    pub size: &'static str,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub count: usize,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .enumerate()
                .map(|(index, line)| CartLineView::new(index, line))
                .collect(),
            total: Price::inr(cart.total()).to_string(),
            count: cart.len(),
        }
    }
}

impl CartLineView {
    fn new(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            name: line.name.clone(),
            official_vial: line.official_vial,
            size: line.size.label(),
            price: Price::inr(line.price).to_string(),
            quantity: line.quantity,
            subtotal: Price::inr(line.subtotal()).to_string(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
///
/// Only identifies the item; the price is always read from the catalog.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: FragranceId,
    pub provenance: Provenance,
    pub size: SizeTier,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

// =============================================================================
// Helpers
// =============================================================================

/// Whether the request was issued by htmx.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Respond to a cart mutation.
fn respond(headers: &HeaderMap, cart: &Cart) -> Response {
    if is_htmx(headers) {
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartPanelTemplate {
                cart: CartView::from(cart),
            },
        )
            .into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart panel.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartPanelTemplate> {
    let cart = session::cart(&session).await?;
    Ok(CartPanelTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add one unit of an item in a size.
///
/// Unknown items and unavailable sizes leave the cart unchanged.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let mut cart = session::cart(&session).await?;

    let catalog = match state.catalog().fragrances().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to load catalog for add to cart: {e}");
            return Ok(respond(&headers, &cart));
        }
    };

    match fragrance::find(&catalog, form.provenance, form.id) {
        Some(item) => {
            if cart.add(item, form.size, item.price(form.size)) {
                add_breadcrumb(
                    "cart",
                    "Added to cart",
                    Some(&[("name", item.name.as_str()), ("size", form.size.label())]),
                );
                session::set_cart(&session, &cart).await?;
            } else {
                tracing::debug!(
                    id = %form.id,
                    size = %form.size,
                    "Size not offered, cart unchanged"
                );
            }
        }
        None => {
            tracing::warn!(
                id = %form.id,
                provenance = form.provenance.as_str(),
                "Add to cart for unknown item"
            );
        }
    }

    Ok(respond(&headers, &cart))
}

/// Set the quantity of a line; zero or less removes it.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = session::cart(&session).await?;

    match cart.update_quantity(form.index, form.quantity) {
        Ok(()) => session::set_cart(&session, &cart).await?,
        Err(e) => tracing::warn!("Failed to update cart: {e}"),
    }

    Ok(respond(&headers, &cart))
}

/// Remove a line.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = session::cart(&session).await?;

    match cart.remove(form.index) {
        Ok(line) => {
            add_breadcrumb("cart", "Removed from cart", Some(&[("name", line.name.as_str())]));
            session::set_cart(&session, &cart).await?;
        }
        Err(e) => tracing::warn!("Failed to remove from cart: {e}"),
    }

    Ok(respond(&headers, &cart))
}

/// Empty the cart.
#[instrument(skip(session, headers))]
pub async fn clear(session: Session, headers: HeaderMap) -> Result<Response> {
    let mut cart = session::cart(&session).await?;
    cart.clear();
    session::set_cart(&session, &cart).await?;

    Ok(respond(&headers, &cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = session::cart(&session).await?;
    Ok(CartCountTemplate { count: cart.len() })
}

/// Hand the order off to the seller's messaging app.
///
/// An empty cart goes back to the catalog.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let cart = session::cart(&session).await?;

    let Some(url) = checkout_url(&state.config().checkout, &cart) else {
        return Ok(Redirect::to("/"));
    };

    add_breadcrumb("checkout", "Checkout handed off", None);
    tracing::info!(lines = cart.len(), "Checkout handed off");
    Ok(Redirect::to(&url))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use fraghead_core::catalog::{Fragrance, FragranceRecord};
    use rust_decimal::Decimal;

    use super::*;

    fn oud() -> Fragrance {
        Fragrance::from_record(
            FragranceRecord {
                id: FragranceId::new(2),
                name: "Oud".to_string(),
                category: None,
                description: None,
                ml_30: Some(Decimal::from(900)),
                ml_20: None,
                ml_10: Some(Decimal::new(3495, 1)),
                ml_5: None,
            },
            Provenance::Official,
        )
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let item = oud();
        let mut cart = Cart::new();
        cart.add(&item, SizeTier::Ml10, item.price(SizeTier::Ml10));
        cart.update_quantity(0, 2).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.count, 1);
        let line = &view.lines[0];
        assert_eq!(line.size, "10ml");
        assert_eq!(line.price, "₹349.5");
        assert_eq!(line.subtotal, "₹699");
        assert!(line.official_vial);
        assert_eq!(view.total, "₹699");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.total, "₹0");
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }

    #[test]
    fn test_plain_post_redirects_home() {
        let response = respond(&HeaderMap::new(), &Cart::new());
        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/");
    }
}
