//! Order summary text sent to the seller at checkout.

use core::fmt::Write as _;

use super::Cart;
use crate::types::Price;

/// Opening line of every order message.
pub const ORDER_GREETING: &str = "Hi, I would like to order these fragrances:";

/// Closing request appended after the total.
pub const CONFIRMATION_REQUEST: &str = "Please confirm availability and shipping details.";

/// Suffix appended to names of resold official vials.
pub const OFFICIAL_VIAL_SUFFIX: &str = " (Official Vial)";

/// Render the cart as a plain-text order.
///
/// Returns `None` for an empty cart, since there is nothing to order.
#[must_use]
pub fn order_message(cart: &Cart) -> Option<String> {
    if cart.is_empty() {
        return None;
    }

    let blocks: Vec<String> = cart
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let mut block = String::new();
            let suffix = if line.official_vial {
                OFFICIAL_VIAL_SUFFIX
            } else {
                ""
            };
            // Writing to a String cannot fail.
            let _ = write!(
                block,
                "{}. {}{suffix}\n   Size: {}\n   Price: {}\n   Quantity: {}\n   Subtotal: {}",
                index + 1,
                line.name,
                line.size,
                Price::inr(line.price),
                line.quantity,
                Price::inr(line.subtotal()),
            );
            block
        })
        .collect();

    Some(format!(
        "{ORDER_GREETING}\n\n{}\n\n*Total: {}*\n\n{CONFIRMATION_REQUEST}",
        blocks.join("\n\n"),
        Price::inr(cart.total()),
    ))
}
