//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::Cart,
    campaigns::{CampaignCategory, CampaignKind, CampaignSet, DiscountCampaign},
    config::{ConfigError, PricingConfig, ZeroAmountLines},
    discounts::{EvaluationContext, discount_for},
    fixtures::{Fixture, FixtureError},
    items::{CartItem, ItemCategory},
    pipeline::{DiscountPipeline, calculate},
    pricing::{PricingError, total_price},
    receipt::{DiscountLine, DiscountResult, ReceiptError},
    requests::{DiscountRequest, RequestError, ValidationFailure, price_json},
    responses::Envelope,
};
