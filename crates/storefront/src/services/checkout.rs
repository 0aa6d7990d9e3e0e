//! Checkout hand-off.
//!
//! There is no payment flow: checking out opens a chat with the seller with
//! the order pre-filled. The link has the form
//! `<messaging base><destination>?text=<url-encoded order message>`.

use fraghead_core::Cart;
use fraghead_core::cart::checkout::order_message;

use crate::config::CheckoutConfig;

/// Build the deep link for the current cart.
///
/// Returns `None` for an empty cart or when the destination cannot be joined
/// onto the messaging base.
#[must_use]
pub fn checkout_url(config: &CheckoutConfig, cart: &Cart) -> Option<String> {
    let message = order_message(cart)?;

    let mut url = match config.messaging_base.join(&config.destination) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(
                destination = %config.destination,
                "Failed to build checkout URL: {e}"
            );
            return None;
        }
    };
    url.set_query(Some(&format!("text={}", urlencoding::encode(&message))));

    Some(url.into())
}
