//! Basket
//!
//! A cart is the validated, non-empty set of items being priced, plus the loyalty points the
//! customer can redeem against it.

use rust_decimal::Decimal;

use crate::{
    items::CartItem,
    pricing::{PricingError, total_price},
};

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    loyalty_points: u64,
}

impl Cart {
    /// Create a cart from the given items with no loyalty points.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidRequest`] if `items` is empty.
    pub fn new(items: impl Into<Vec<CartItem>>) -> Result<Self, PricingError> {
        Self::with_points(items, 0)
    }

    /// Create a cart from the given items and loyalty points.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidRequest`] if `items` is empty.
    pub fn with_points(
        items: impl Into<Vec<CartItem>>,
        loyalty_points: u64,
    ) -> Result<Self, PricingError> {
        let items = items.into();

        if items.is_empty() {
            return Err(PricingError::InvalidRequest);
        }

        Ok(Cart {
            items,
            loyalty_points,
        })
    }

    /// Calculate the undiscounted total of the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total cannot be represented.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        total_price(&self.items)
    }

    /// The items in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; carts cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Loyalty points available for redemption.
    #[must_use]
    pub fn loyalty_points(&self) -> u64 {
        self.loyalty_points
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::ItemCategory;

    use super::*;

    fn test_items() -> [CartItem; 2] {
        [
            CartItem::new("1", "T-Shirt", Decimal::from(350), ItemCategory::Clothing, 1),
            CartItem::new("2", "Hat", Decimal::from(250), ItemCategory::Accessories, 1),
        ]
    }

    #[test]
    fn empty_cart_is_invalid_request() {
        let result = Cart::with_points(Vec::new(), 100);

        assert_eq!(result, Err(PricingError::InvalidRequest));
    }

    #[test]
    fn subtotal_with_items() -> TestResult {
        let cart = Cart::new(test_items())?;

        assert_eq!(cart.subtotal()?, Decimal::from(600));
        assert_eq!(cart.len(), 2);
        assert!(!cart.is_empty());
        assert_eq!(cart.loyalty_points(), 0);

        Ok(())
    }

    #[test]
    fn zero_price_items_are_valid() -> TestResult {
        let cart = Cart::with_points(
            [CartItem::new("1", "Sticker", Decimal::ZERO, ItemCategory::Accessories, 4)],
            10,
        )?;

        assert_eq!(cart.subtotal()?, Decimal::ZERO);
        assert_eq!(cart.loyalty_points(), 10);

        Ok(())
    }
}
