//! Category selection
//!
//! Picks the single best campaign out of one category's candidates.

use rust_decimal::Decimal;

use crate::{
    campaigns::DiscountCampaign,
    discounts::{EvaluationContext, discount_for},
    pricing::PricingError,
};

/// A category winner and the discount it yields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'c> {
    /// Winning campaign
    pub campaign: &'c DiscountCampaign,

    /// Discount it yields against the running total it was evaluated at
    pub amount: Decimal,
}

/// Returns the candidate with the strictly greatest discount, or `None` when there are no
/// candidates. Ties keep the earliest candidate.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if evaluating a candidate overflows.
pub fn best_of<'c>(
    candidates: &'c [DiscountCampaign],
    ctx: &EvaluationContext<'_>,
) -> Result<Option<Selection<'c>>, PricingError> {
    let mut best: Option<Selection<'c>> = None;

    for campaign in candidates {
        let amount = discount_for(campaign, ctx)?;

        if best.is_none_or(|current| amount > current.amount) {
            best = Some(Selection { campaign, amount });
        }
    }

    Ok(best)
}
