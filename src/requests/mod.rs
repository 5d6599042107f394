//! Pricing requests
//!
//! The JSON shape a client submits, its validation, and its conversion into a [`Cart`] and a
//! [`CampaignSet`]. Validation reports every problem it finds rather than stopping at the first.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    basket::Cart,
    campaigns::{CampaignCategory, CampaignSet, DiscountCampaign},
    config::PricingConfig,
    items::{CartItem, ItemCategory},
    pipeline::DiscountPipeline,
    pricing::PricingError,
    receipt::DiscountResult,
};

pub(crate) mod parameters;

/// A request failed validation. Holds one message per problem found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request validation failed: {}", messages.join("; "))]
pub struct ValidationFailure {
    /// Human-readable problems, in the order they were found
    pub messages: Vec<String>,
}

/// Errors that can occur when handling a pricing request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The body is not JSON, or has the wrong shape.
    #[error("malformed request body: {0}")]
    Json(#[from] serde_json::Error),

    /// The body parsed but its values are not acceptable.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Pricing rejected the request.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Top-level request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    /// Items and loyalty points
    pub cart: CartPayload,

    /// Campaigns, listed by category
    #[serde(default)]
    pub discounts: DiscountsPayload,
}

/// Cart part of a request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    /// Items in the cart
    #[serde(default)]
    pub items: Vec<ItemPayload>,

    /// Loyalty points the customer holds
    #[serde(default)]
    pub customer_points: Option<Number>,
}

/// One cart item as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    /// Item id
    #[serde(default)]
    pub id: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Unit price
    #[serde(default)]
    pub price: Option<Number>,

    /// Item category
    #[serde(default)]
    pub category: Option<String>,

    /// Quantity
    #[serde(default)]
    pub quantity: Option<Number>,
}

/// Campaign lists of a request. Absent lists are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountsPayload {
    /// Coupon campaigns
    #[serde(default)]
    pub coupon: Vec<CampaignPayload>,

    /// On-top campaigns
    #[serde(default)]
    pub on_top: Vec<CampaignPayload>,

    /// Seasonal campaigns
    #[serde(default)]
    pub seasonal: Vec<CampaignPayload>,
}

impl DiscountsPayload {
    fn list(&self, category: CampaignCategory) -> &[CampaignPayload] {
        match category {
            CampaignCategory::Coupon => &self.coupon,
            CampaignCategory::OnTop => &self.on_top,
            CampaignCategory::Seasonal => &self.seasonal,
        }
    }
}

/// One campaign as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    /// Campaign id
    #[serde(default)]
    pub id: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Category tag
    #[serde(default)]
    pub category: Option<String>,

    /// Campaign type tag
    #[serde(default, rename = "type")]
    pub type_tag: Option<String>,

    /// Type-specific parameters
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl DiscountRequest {
    /// Parse a request body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Json`] if the body is not JSON of the expected shape.
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate the request and convert it into a cart and its campaigns.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Validation`] listing every invalid value, or
    /// [`RequestError::Pricing`] with [`PricingError::InvalidRequest`] if the cart has no items.
    pub fn into_parts(self, config: &PricingConfig) -> Result<(Cart, CampaignSet), RequestError> {
        let mut messages = Vec::new();

        let items = self
            .cart
            .items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| validate_item(idx, item, &mut messages))
            .collect::<Vec<_>>();

        let points = validate_points(self.cart.customer_points.as_ref(), &mut messages);
        let campaigns = validate_campaigns(&self.discounts, config, &mut messages);

        if !messages.is_empty() {
            return Err(ValidationFailure { messages }.into());
        }

        let cart = Cart::with_points(items, points)?;

        Ok((cart, campaigns))
    }
}

/// Parse, validate and price a JSON request body.
///
/// # Errors
///
/// Returns a [`RequestError`] if the body is malformed, fails validation, or cannot be priced.
pub fn price_json(body: &str, pipeline: &DiscountPipeline) -> Result<DiscountResult, RequestError> {
    let request = DiscountRequest::from_json(body)?;

    let (cart, campaigns) = match request.into_parts(pipeline.config()) {
        Ok(parts) => parts,
        Err(RequestError::Validation(failure)) => {
            warn!(messages = ?failure.messages, "rejected pricing request");

            return Err(failure.into());
        }
        Err(err) => return Err(err),
    };

    debug!(
        items = cart.len(),
        campaigns = campaigns.len(),
        "pricing request accepted"
    );

    Ok(pipeline.calculate(&cart, &campaigns)?)
}

fn validate_item(idx: usize, item: &ItemPayload, messages: &mut Vec<String>) -> Option<CartItem> {
    let path = format!("cart.items.{idx}");
    let before = messages.len();

    let id = required_text(item.id.as_deref(), &path, "id", messages);
    let name = required_text(item.name.as_deref(), &path, "name", messages);

    let price = item
        .price
        .as_ref()
        .and_then(parameters::decimal_from_number)
        .filter(|price| *price >= Decimal::ZERO);

    if price.is_none() {
        messages.push(format!("{path}.price must be a non-negative number"));
    }

    let category = match item.category.as_deref() {
        Some(category) => match category.parse::<ItemCategory>() {
            Ok(category) => Some(category),
            Err(err) => {
                messages.push(format!("{path}.category: {err}"));
                None
            }
        },
        None => {
            messages.push(format!("{path}.category should not be empty"));
            None
        }
    };

    let quantity = item
        .quantity
        .as_ref()
        .and_then(parameters::decimal_from_number)
        .filter(|quantity| *quantity > Decimal::ZERO);

    if quantity.is_none() {
        messages.push(format!("{path}.quantity must be a positive number"));
    }

    if messages.len() > before {
        return None;
    }

    Some(CartItem::new(id?, name?, price?, category?, quantity?))
}

fn validate_points(points: Option<&Number>, messages: &mut Vec<String>) -> u64 {
    let Some(points) = points else {
        return 0;
    };

    let parsed = parameters::decimal_from_number(points)
        .filter(|points| points.fract().is_zero())
        .and_then(|points| points.to_u64());

    parsed.unwrap_or_else(|| {
        messages.push("cart.customerPoints must be a non-negative integer".to_string());
        0
    })
}

fn validate_campaigns(
    discounts: &DiscountsPayload,
    config: &PricingConfig,
    messages: &mut Vec<String>,
) -> CampaignSet {
    let mut campaigns = CampaignSet::new();
    let mut seen_ids = FxHashSet::default();

    for category in CampaignCategory::ORDER {
        let list = discounts.list(category);
        let list_path = format!("discounts.{}", list_key(category));

        if let Some(max) = config.max_campaigns_per_category
            && list.len() > max
        {
            messages.push(format!("{list_path} must contain no more than {max} elements"));
        }

        for (idx, payload) in list.iter().enumerate() {
            let path = format!("{list_path}.{idx}");

            if let Some(campaign) = validate_campaign(&path, category, payload, messages) {
                if !seen_ids.insert(campaign.id().to_string()) {
                    messages.push(format!("{path}.id \"{}\" is already in use", campaign.id()));
                    continue;
                }

                campaigns.push(campaign);
            }
        }
    }

    campaigns
}

fn validate_campaign(
    path: &str,
    list_category: CampaignCategory,
    payload: &CampaignPayload,
    messages: &mut Vec<String>,
) -> Option<DiscountCampaign> {
    let before = messages.len();

    let id = required_text(payload.id.as_deref(), path, "id", messages);
    let name = required_text(payload.name.as_deref(), path, "name", messages);
    let type_tag = required_text(payload.type_tag.as_deref(), path, "type", messages);

    match payload.category.as_deref() {
        Some(category) if category == list_category.as_str() => {}
        Some(category) => messages.push(format!(
            "{path}.category must be {list_category} to appear in this list, got \"{category}\""
        )),
        None => messages.push(format!("{path}.category should not be empty")),
    }

    let kind = match type_tag.as_deref().map(|tag| parameters::parse_kind(tag, &payload.parameters)) {
        Some(Ok(kind)) => Some(kind),
        Some(Err(message)) => {
            messages.push(format!("{path}.parameters: {message}"));
            None
        }
        None => None,
    };

    if messages.len() > before {
        return None;
    }

    Some(DiscountCampaign::new(id?, name?, list_category, kind?))
}

fn required_text(
    value: Option<&str>,
    path: &str,
    field: &str,
    messages: &mut Vec<String>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            messages.push(format!("{path}.{field} should not be empty"));
            None
        }
    }
}

fn list_key(category: CampaignCategory) -> &'static str {
    match category {
        CampaignCategory::Coupon => "coupon",
        CampaignCategory::OnTop => "onTop",
        CampaignCategory::Seasonal => "seasonal",
    }
}
