//! Product Fixtures

use std::str::FromStr;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, THB, USD};
use serde::Deserialize;

use crate::{fixtures::FixtureError, items::ItemCategory};

/// Wrapper for the product catalogue in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Price with currency code, e.g. "350.00 THB"
    pub price: String,

    /// Item category
    pub category: ItemCategory,
}

/// A catalogue entry with its price parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Unit price in major units
    pub price: Decimal,

    /// Item category
    pub category: ItemCategory,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (price, currency) = parse_price(&fixture.price)?;

        // Receipts and requests are priced in baht only.
        if currency != THB {
            return Err(FixtureError::CurrencyMismatch(
                THB.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        Ok(Product {
            name: fixture.name,
            price,
            category: fixture.category,
        })
    }
}

/// Parse a price string of the form `"<amount> <ISO code>"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] for a malformed or negative amount, or
/// [`FixtureError::UnknownCurrency`] for an unrecognised currency code.
pub fn parse_price(price: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let mut parts = price.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(price.to_string()));
    };

    let amount = Decimal::from_str(amount)
        .map_err(|_err| FixtureError::InvalidPrice(price.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(price.to_string()));
    }

    let currency = match code {
        "THB" => THB,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}
