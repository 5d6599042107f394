//! Fixtures
//!
//! Named sets of YAML files describing a product catalogue, a cart built from it, and the
//! campaigns to price it with. A set called `demo` lives at `products/demo.yml`,
//! `carts/demo.yml` and `campaigns/demo.yml` under the base path.

use std::{fs, path::PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    basket::Cart,
    campaigns::{CampaignSet, DiscountCampaign},
    fixtures::{campaigns::CampaignsFixture, products::ProductsFixture},
    items::CartItem,
    pricing::PricingError,
};

pub mod campaigns;
pub mod products;

pub use products::Product;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency other than the one prices are shown in
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid campaign data
    #[error("Invalid campaign data: {0}")]
    InvalidCampaignData(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] PricingError),
}

/// Cart fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CartFixture {
    /// Lines referencing catalogue keys
    pub items: Vec<CartLineFixture>,

    /// Loyalty points held by the customer
    #[serde(default)]
    pub customer_points: u64,
}

/// One cart line from YAML
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Catalogue key
    pub product: String,

    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalogue keyed by product key
    products: FxHashMap<String, Product>,

    /// Cart lines built from the catalogue
    items: Vec<CartItem>,

    /// Loyalty points for the cart
    customer_points: u64,

    /// Campaigns, filed by category
    campaigns: CampaignSet,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            items: Vec::new(),
            customer_points: 0,
            campaigns: CampaignSet::new(),
        }
    }

    /// Load the product catalogue from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a price is not in baht.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("products", name)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            self.products.insert(key, product_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Load a cart from a YAML fixture file. Products must already be loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a line references an unknown
    /// product.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("carts", name)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for line in fixture.items {
            let product = self.product(&line.product)?;

            let item = CartItem::new(
                format!("{}", self.items.len() + 1),
                product.name.clone(),
                product.price,
                product.category,
                line.quantity,
            );

            self.items.push(item);
        }

        self.customer_points = fixture.customer_points;

        Ok(self)
    }

    /// Load campaigns from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a campaign has a blank id or
    /// name, reuses an id already loaded, or has invalid parameters.
    pub fn load_campaigns(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("campaigns", name)?;
        let fixture: CampaignsFixture = serde_norway::from_str(&contents)?;

        let mut seen_ids: FxHashSet<String> = self
            .campaigns
            .iter()
            .map(|campaign| campaign.id().to_string())
            .collect();

        for campaign_fixture in fixture.campaigns {
            let campaign = DiscountCampaign::try_from(campaign_fixture)?;

            if !seen_ids.insert(campaign.id().to_string()) {
                return Err(FixtureError::InvalidCampaignData(format!(
                    "{}: id is already in use",
                    campaign.id()
                )));
            }

            self.campaigns.push(campaign);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, cart, and campaigns with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_at("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_at(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_cart(name)?
            .load_campaigns(name)?;

        Ok(fixture)
    }

    /// Get a product by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get all cart lines
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get the loaded campaigns
    pub fn campaigns(&self) -> &CampaignSet {
        &self.campaigns
    }

    /// Create a cart from the loaded lines
    ///
    /// # Errors
    ///
    /// Returns an error if no lines are loaded.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        Ok(Cart::with_points(self.items.clone(), self.customer_points)?)
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
