//! Pricing

use rust_decimal::Decimal;
use thiserror::Error;

use crate::items::{CartItem, ItemCategory};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The cart has no items.
    #[error("No items in the cart")]
    InvalidRequest,

    /// An amount left the representable decimal range.
    #[error("amount overflowed while {0}")]
    Overflow(&'static str),
}

/// Calculates the total price of a list of items (`Σ price × quantity`).
///
/// An empty slice totals zero; rejecting empty carts is the caller's concern.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total or the running sum overflowed.
pub fn total_price(items: &[CartItem]) -> Result<Decimal, PricingError> {
    sum_lines(items.iter())
}

/// Calculates the total price of the items in one category, at their original prices.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total or the running sum overflowed.
pub fn category_subtotal(
    items: &[CartItem],
    category: ItemCategory,
) -> Result<Decimal, PricingError> {
    sum_lines(items.iter().filter(|item| item.category() == category))
}

fn sum_lines<'a>(mut items: impl Iterator<Item = &'a CartItem>) -> Result<Decimal, PricingError> {
    items.try_fold(Decimal::ZERO, |acc, item| {
        item.line_total()
            .and_then(|line| acc.checked_add(line))
            .ok_or(PricingError::Overflow("summing item totals"))
    })
}
