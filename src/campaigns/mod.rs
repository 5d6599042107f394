//! Campaigns

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod types;

pub use types::CampaignKind;

/// Campaign category. Categories are always evaluated in [`CampaignCategory::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignCategory {
    /// Coupons, applied first
    Coupon,

    /// On-top discounts, applied to the total left after coupons
    OnTop,

    /// Seasonal rewards, applied last
    Seasonal,
}

impl CampaignCategory {
    /// Fixed evaluation order.
    pub const ORDER: [CampaignCategory; 3] = [
        CampaignCategory::Coupon,
        CampaignCategory::OnTop,
        CampaignCategory::Seasonal,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignCategory::Coupon => "COUPON",
            CampaignCategory::OnTop => "ON_TOP",
            CampaignCategory::Seasonal => "SEASONAL",
        }
    }
}

impl fmt::Display for CampaignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named discount rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCampaign {
    id: String,
    name: String,
    category: CampaignCategory,
    kind: CampaignKind,
}

impl DiscountCampaign {
    /// Create a new campaign.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: CampaignCategory,
        kind: CampaignKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            kind,
        }
    }

    /// Return the campaign id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the campaign name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the campaign category
    pub fn category(&self) -> CampaignCategory {
        self.category
    }

    /// Return the discount kind and its parameters
    pub fn kind(&self) -> &CampaignKind {
        &self.kind
    }
}

/// Candidate campaigns for one pricing request, grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignSet {
    coupon: Vec<DiscountCampaign>,
    on_top: Vec<DiscountCampaign>,
    seasonal: Vec<DiscountCampaign>,
}

impl CampaignSet {
    /// An empty set; pricing with it is the identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, filing each campaign under its own category in input order.
    pub fn with_campaigns(campaigns: impl IntoIterator<Item = DiscountCampaign>) -> Self {
        let mut set = Self::new();

        for campaign in campaigns {
            set.push(campaign);
        }

        set
    }

    /// Append a campaign to the list for its category.
    pub fn push(&mut self, campaign: DiscountCampaign) {
        self.list_mut(campaign.category()).push(campaign);
    }

    /// Candidates for one category, in input order.
    pub fn get(&self, category: CampaignCategory) -> &[DiscountCampaign] {
        match category {
            CampaignCategory::Coupon => &self.coupon,
            CampaignCategory::OnTop => &self.on_top,
            CampaignCategory::Seasonal => &self.seasonal,
        }
    }

    /// Iterate over every campaign in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscountCampaign> {
        CampaignCategory::ORDER
            .into_iter()
            .flat_map(|category| self.get(category).iter())
    }

    /// Total number of campaigns across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coupon.len() + self.on_top.len() + self.seasonal.len()
    }

    /// Check if no category has any campaigns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_mut(&mut self, category: CampaignCategory) -> &mut Vec<DiscountCampaign> {
        match category {
            CampaignCategory::Coupon => &mut self.coupon,
            CampaignCategory::OnTop => &mut self.on_top,
            CampaignCategory::Seasonal => &mut self.seasonal,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn with_campaigns_files_by_category_and_iterates_in_order() {
        let set = CampaignSet::with_campaigns([
            DiscountCampaign::new(
                "s1",
                "Seasonal",
                CampaignCategory::Seasonal,
                CampaignKind::every_x_get_y(Decimal::from(300), Decimal::from(40)),
            ),
            DiscountCampaign::new(
                "c1",
                "Coupon",
                CampaignCategory::Coupon,
                CampaignKind::fixed_amount(Decimal::from(50)),
            ),
            DiscountCampaign::new(
                "c2",
                "Coupon 2",
                CampaignCategory::Coupon,
                CampaignKind::percentage_discount(Decimal::from(10)),
            ),
        ]);

        let ids: Vec<&str> = set.iter().map(DiscountCampaign::id).collect();

        assert_eq!(ids, ["c1", "c2", "s1"]);
        assert_eq!(set.get(CampaignCategory::Coupon).len(), 2);
        assert!(set.get(CampaignCategory::OnTop).is_empty());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn category_order_is_coupon_on_top_seasonal() {
        let names: Vec<&str> = CampaignCategory::ORDER
            .iter()
            .map(|category| category.as_str())
            .collect();

        assert_eq!(names, ["COUPON", "ON_TOP", "SEASONAL"]);
    }
}
