//! Items

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Item classification, used both on cart items and as a campaign target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// Clothing
    #[serde(alias = "Clothing")]
    Clothing,

    /// Accessories
    #[serde(alias = "Accessories")]
    Accessories,

    /// Electronics
    #[serde(alias = "Electronics")]
    Electronics,
}

impl ItemCategory {
    /// Every known category, in declaration order.
    pub const ALL: [ItemCategory; 3] = [
        ItemCategory::Clothing,
        ItemCategory::Accessories,
        ItemCategory::Electronics,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Clothing => "CLOTHING",
            ItemCategory::Accessories => "ACCESSORIES",
            ItemCategory::Electronics => "ELECTRONICS",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known [`ItemCategory`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown item category: {0}")]
pub struct UnknownItemCategory(pub String);

impl FromStr for ItemCategory {
    type Err = UnknownItemCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownItemCategory(s.to_string()))
    }
}

/// A priced line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    id: String,
    name: String,
    price: Decimal,
    category: ItemCategory,
    quantity: Decimal,
}

impl CartItem {
    /// Creates a new cart item. Quantities may be fractional, e.g. 1.5 kg.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: ItemCategory,
        quantity: impl Into<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category,
            quantity: quantity.into(),
        }
    }

    /// Returns the item id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the item
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the item category
    pub fn category(&self) -> ItemCategory {
        self.category
    }

    /// Returns the quantity
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Price multiplied by quantity, or `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartItem::new("1", "Socks", Decimal::new(4550, 2), ItemCategory::Clothing, 3);

        assert_eq!(item.line_total(), Some(Decimal::new(13650, 2)));
    }

    #[test]
    fn line_total_accepts_fractional_quantity() {
        let quantity = Decimal::new(15, 1);
        let item = CartItem::new("1", "Fabric", Decimal::from(100), ItemCategory::Clothing, quantity);

        assert_eq!(item.line_total(), Some(Decimal::from(150)));
    }

    #[test]
    fn category_parses_wire_and_catalogue_spellings() -> TestResult {
        assert_eq!("CLOTHING".parse::<ItemCategory>()?, ItemCategory::Clothing);
        assert_eq!("Accessories".parse::<ItemCategory>()?, ItemCategory::Accessories);
        assert_eq!(
            "shoes".parse::<ItemCategory>(),
            Err(UnknownItemCategory("shoes".to_string()))
        );

        Ok(())
    }

    #[test]
    fn category_deserializes_alias() -> TestResult {
        let category: ItemCategory = serde_json::from_str("\"Clothing\"")?;

        assert_eq!(category, ItemCategory::Clothing);
        assert_eq!(serde_json::to_string(&category)?, "\"CLOTHING\"");

        Ok(())
    }
}
