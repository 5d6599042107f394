//! Discounts
//!
//! Evaluates what a single campaign is worth against the current running total. The category
//! fixes which discount kinds are eligible; any other pairing is worth nothing.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{
    campaigns::{
        CampaignCategory, CampaignKind, DiscountCampaign,
        types::{CategoryPercentageOff, EveryXGetY, FixedAmount, PercentageOff},
    },
    items::CartItem,
    pricing::{PricingError, category_subtotal},
};

/// Everything a campaign may look at while computing its discount.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Items in the cart, at their original prices.
    pub items: &'a [CartItem],

    /// Running total after earlier categories were applied.
    pub current_total: Decimal,

    /// Loyalty points the customer can redeem.
    pub loyalty_points: u64,

    /// Maximum share of the running total that points may cover.
    pub points_cap: Percentage,
}

/// Calculates the discount a campaign yields in the given context.
///
/// The result always lies within `0..=current_total`, so applying it can never push the running
/// total below zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if an intermediate amount cannot be represented.
pub fn discount_for(
    campaign: &DiscountCampaign,
    ctx: &EvaluationContext<'_>,
) -> Result<Decimal, PricingError> {
    let amount = match (campaign.category(), campaign.kind()) {
        (CampaignCategory::Coupon, CampaignKind::FixedAmount(fixed)) => {
            fixed_amount(fixed, ctx.current_total)
        }
        (CampaignCategory::Coupon, CampaignKind::PercentageDiscount(percent)) => {
            percentage_off(percent, ctx.current_total)?
        }
        (CampaignCategory::OnTop, CampaignKind::PercentageDiscountByItemCategory(target)) => {
            category_percentage_off(target, ctx.items)?
        }
        (CampaignCategory::OnTop, CampaignKind::DiscountByPoints) => {
            points_discount(ctx.loyalty_points, ctx.current_total, ctx.points_cap)?
        }
        (CampaignCategory::Seasonal, CampaignKind::SpecialCampaigns(reward)) => {
            every_x_get_y(reward, ctx.current_total)?
        }
        _ => Decimal::ZERO,
    };

    Ok(amount.clamp(Decimal::ZERO, ctx.current_total.max(Decimal::ZERO)))
}

fn fixed_amount(fixed: &FixedAmount, current_total: Decimal) -> Decimal {
    fixed.amount.min(current_total)
}

fn percentage_off(percent: &PercentageOff, current_total: Decimal) -> Result<Decimal, PricingError> {
    percent_of(percent.percentage, current_total)
}

fn category_percentage_off(
    target: &CategoryPercentageOff,
    items: &[CartItem],
) -> Result<Decimal, PricingError> {
    let subtotal = category_subtotal(items, target.category)?;

    percent_of(target.percentage, subtotal)
}

fn points_discount(
    loyalty_points: u64,
    current_total: Decimal,
    cap: Percentage,
) -> Result<Decimal, PricingError> {
    let cap_amount = percent_of(cap, current_total)?;

    Ok(Decimal::from(loyalty_points).min(cap_amount))
}

fn every_x_get_y(reward: &EveryXGetY, current_total: Decimal) -> Result<Decimal, PricingError> {
    if reward.every <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let times = current_total
        .checked_div(reward.every)
        .ok_or(PricingError::Overflow("dividing by the reward threshold"))?
        .floor();

    times
        .checked_mul(reward.discount)
        .ok_or(PricingError::Overflow("multiplying the seasonal reward"))
}

/// Apply a fractional percentage to an amount.
fn percent_of(percent: Percentage, amount: Decimal) -> Result<Decimal, PricingError> {
    (percent * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(amount)
        .ok_or(PricingError::Overflow("applying a percentage"))
}
