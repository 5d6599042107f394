//! Campaign Types
//!
//! Each discount kind carries its own strongly typed parameters. The untyped parameter maps
//! received on the wire are converted into these once, at the request boundary.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::items::ItemCategory;

/// Wire tag for [`CampaignKind::FixedAmount`].
pub const FIXED_AMOUNT: &str = "FixedAmount";

/// Wire tag for [`CampaignKind::PercentageDiscount`].
pub const PERCENTAGE_DISCOUNT: &str = "PercentageDiscount";

/// Wire tag for [`CampaignKind::PercentageDiscountByItemCategory`].
pub const PERCENTAGE_DISCOUNT_BY_ITEM_CATEGORY: &str = "PercentageDiscountByItemCategory";

/// Wire tag for [`CampaignKind::DiscountByPoints`].
pub const DISCOUNT_BY_POINTS: &str = "DiscountByPoints";

/// Wire tag for [`CampaignKind::SpecialCampaigns`].
pub const SPECIAL_CAMPAIGNS: &str = "SpecialCampaigns";

/// A fixed amount off the running total (e.g. "50 THB off").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAmount {
    /// Amount to take off; never negative.
    pub amount: Decimal,
}

/// A percentage off the running total (e.g. "10% off").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageOff {
    /// Fractional percentage (0.10 for 10%).
    pub percentage: Percentage,
}

/// A percentage off the original subtotal of one item category (e.g. "15% off clothing").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryPercentageOff {
    /// Targeted item category.
    pub category: ItemCategory,

    /// Fractional percentage (0.15 for 15%).
    pub percentage: Percentage,
}

/// "Every X THB spent, take Y THB off".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EveryXGetY {
    /// Spend threshold that triggers one reward; always positive.
    pub every: Decimal,

    /// Reward per threshold reached; always positive.
    pub discount: Decimal,
}

/// How a campaign computes its discount.
#[derive(Debug, Clone, PartialEq)]
pub enum CampaignKind {
    /// Fixed amount coupon
    FixedAmount(FixedAmount),

    /// Percentage coupon
    PercentageDiscount(PercentageOff),

    /// Percentage off one item category
    PercentageDiscountByItemCategory(CategoryPercentageOff),

    /// Redeem loyalty points, capped at a share of the running total
    DiscountByPoints,

    /// Seasonal "every X get Y" reward
    SpecialCampaigns(EveryXGetY),

    /// A type tag this engine does not know; never discounts.
    Unrecognized(String),
}

impl CampaignKind {
    /// Percentage coupon from percent points (10 for 10%).
    pub fn percentage_discount(points: Decimal) -> Self {
        CampaignKind::PercentageDiscount(PercentageOff {
            percentage: percent_from_points(points),
        })
    }

    /// Category percentage from percent points (15 for 15%).
    pub fn category_percentage(category: ItemCategory, points: Decimal) -> Self {
        CampaignKind::PercentageDiscountByItemCategory(CategoryPercentageOff {
            category,
            percentage: percent_from_points(points),
        })
    }

    /// Fixed amount coupon.
    pub fn fixed_amount(amount: Decimal) -> Self {
        CampaignKind::FixedAmount(FixedAmount { amount })
    }

    /// Seasonal "every X get Y" reward.
    pub fn every_x_get_y(every: Decimal, discount: Decimal) -> Self {
        CampaignKind::SpecialCampaigns(EveryXGetY { every, discount })
    }

    /// The wire tag for this kind.
    pub fn type_tag(&self) -> &str {
        match self {
            CampaignKind::FixedAmount(_) => FIXED_AMOUNT,
            CampaignKind::PercentageDiscount(_) => PERCENTAGE_DISCOUNT,
            CampaignKind::PercentageDiscountByItemCategory(_) => {
                PERCENTAGE_DISCOUNT_BY_ITEM_CATEGORY
            }
            CampaignKind::DiscountByPoints => DISCOUNT_BY_POINTS,
            CampaignKind::SpecialCampaigns(_) => SPECIAL_CAMPAIGNS,
            CampaignKind::Unrecognized(tag) => tag,
        }
    }
}

/// Converts percent points (15) to a fractional [`Percentage`] (0.15).
pub fn percent_from_points(points: Decimal) -> Percentage {
    Percentage::from(points / Decimal::ONE_HUNDRED)
}
