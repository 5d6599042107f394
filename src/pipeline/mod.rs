//! Discount pipeline
//!
//! Visits the campaign categories in their fixed order. Each category's winner is evaluated
//! against the running total left by the categories before it, and its discount is taken off
//! before the next category is considered.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    basket::Cart,
    campaigns::{CampaignCategory, CampaignSet},
    config::{PricingConfig, ZeroAmountLines},
    discounts::EvaluationContext,
    pricing::PricingError,
    receipt::{DiscountLine, DiscountResult},
};

pub mod selector;

/// Stateless pricing engine; holds nothing but its configuration.
#[derive(Debug, Clone, Default)]
pub struct DiscountPipeline {
    config: PricingConfig,
}

impl DiscountPipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price `cart` against `campaigns`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if an amount leaves the decimal range.
    pub fn calculate(
        &self,
        cart: &Cart,
        campaigns: &CampaignSet,
    ) -> Result<DiscountResult, PricingError> {
        let original_total = cart.subtotal()?;
        let mut running_total = original_total;
        let mut breakdown: SmallVec<[DiscountLine; 3]> = SmallVec::new();

        for category in CampaignCategory::ORDER {
            let ctx = EvaluationContext {
                items: cart.items(),
                current_total: running_total,
                loyalty_points: cart.loyalty_points(),
                points_cap: self.config.points_cap_percentage(),
            };

            let Some(winner) = selector::best_of(campaigns.get(category), &ctx)? else {
                debug!(%category, "no candidates, skipping category");

                continue;
            };

            if winner.amount.is_zero() && self.config.zero_amount_lines == ZeroAmountLines::Suppress
            {
                debug!(%category, campaign = winner.campaign.id(), "suppressing zero-amount winner");

                continue;
            }

            running_total = running_total
                .checked_sub(winner.amount)
                .ok_or(PricingError::Overflow("subtracting a discount"))?;

            debug!(
                %category,
                campaign = winner.campaign.id(),
                amount = %winner.amount,
                %running_total,
                "applied category winner"
            );

            breakdown.push(DiscountLine {
                id: winner.campaign.id().to_string(),
                campaign_name: winner.campaign.name().to_string(),
                category,
                amount: winner.amount,
            });
        }

        let result = DiscountResult::new(original_total, breakdown)?;

        debug_assert_eq!(
            result.final_price(),
            running_total,
            "final price must equal the running total"
        );

        Ok(result)
    }
}

/// Price `cart` against `campaigns` with the default configuration.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if an amount leaves the decimal range.
pub fn calculate(cart: &Cart, campaigns: &CampaignSet) -> Result<DiscountResult, PricingError> {
    DiscountPipeline::default().calculate(cart, campaigns)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        campaigns::{CampaignKind, DiscountCampaign},
        items::{CartItem, ItemCategory},
    };

    use super::*;

    fn test_cart(points: u64) -> Result<Cart, PricingError> {
        Cart::with_points(
            [
                CartItem::new("1", "T-Shirt", Decimal::from(350), ItemCategory::Clothing, 1),
                CartItem::new("2", "Hat", Decimal::from(250), ItemCategory::Accessories, 1),
            ],
            points,
        )
    }

    #[test]
    fn no_campaigns_is_identity() -> TestResult {
        let result = calculate(&test_cart(0)?, &CampaignSet::new())?;

        assert_eq!(result.original_total(), Decimal::from(600));
        assert_eq!(result.final_price(), Decimal::from(600));
        assert!(result.breakdown().is_empty());
        assert!(result.applied_campaign_ids().is_empty());

        Ok(())
    }

    #[test]
    fn later_categories_see_the_reduced_total() -> TestResult {
        let campaigns = CampaignSet::with_campaigns([
            DiscountCampaign::new(
                "percent1",
                "10% off",
                CampaignCategory::Coupon,
                CampaignKind::percentage_discount(Decimal::from(10)),
            ),
            DiscountCampaign::new(
                "points",
                "Points",
                CampaignCategory::OnTop,
                CampaignKind::DiscountByPoints,
            ),
        ]);

        let result = calculate(&test_cart(500)?, &campaigns)?;

        // 20% of 540, not of 600.
        let points_line = result.breakdown().get(1).ok_or("expected an on-top line")?;

        assert_eq!(points_line.amount, Decimal::from(108));
        assert_eq!(result.final_price(), Decimal::from(432));

        Ok(())
    }

    #[test]
    fn zero_amount_winner_is_reported_by_default() -> TestResult {
        let campaigns = CampaignSet::with_campaigns([DiscountCampaign::new(
            "points",
            "Points",
            CampaignCategory::OnTop,
            CampaignKind::DiscountByPoints,
        )]);

        let result = calculate(&test_cart(0)?, &campaigns)?;

        assert_eq!(result.applied_campaign_ids(), ["points"]);
        assert_eq!(
            result.breakdown().first().map(|line| line.amount),
            Some(Decimal::ZERO)
        );

        Ok(())
    }

    #[test]
    fn zero_amount_winner_can_be_suppressed() -> TestResult {
        let pipeline = DiscountPipeline::new(PricingConfig {
            zero_amount_lines: ZeroAmountLines::Suppress,
            ..PricingConfig::default()
        });

        let campaigns = CampaignSet::with_campaigns([DiscountCampaign::new(
            "points",
            "Points",
            CampaignCategory::OnTop,
            CampaignKind::DiscountByPoints,
        )]);

        let result = pipeline.calculate(&test_cart(0)?, &campaigns)?;

        assert!(result.breakdown().is_empty());
        assert_eq!(result.final_price(), Decimal::from(600));

        Ok(())
    }

    #[test]
    fn points_cap_is_configurable() -> TestResult {
        let pipeline = DiscountPipeline::new(PricingConfig {
            points_cap: Decimal::from(50),
            ..PricingConfig::default()
        });

        let campaigns = CampaignSet::with_campaigns([DiscountCampaign::new(
            "points",
            "Points",
            CampaignCategory::OnTop,
            CampaignKind::DiscountByPoints,
        )]);

        let result = pipeline.calculate(&test_cart(1_000)?, &campaigns)?;

        assert_eq!(result.final_price(), Decimal::from(300));

        Ok(())
    }
}
