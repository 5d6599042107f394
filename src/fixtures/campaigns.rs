//! Campaign Fixtures

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    campaigns::{CampaignCategory, DiscountCampaign},
    fixtures::FixtureError,
    requests::parameters::parse_kind,
};

/// Wrapper for campaigns in YAML. Order within a category is kept.
#[derive(Debug, Deserialize)]
pub struct CampaignsFixture {
    /// Campaign definitions
    pub campaigns: Vec<CampaignFixture>,
}

/// Campaign fixture from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignFixture {
    /// Campaign id
    pub id: String,

    /// Campaign name
    pub name: String,

    /// Campaign category
    pub category: CampaignCategory,

    /// Campaign type tag, e.g. `PercentageDiscount`
    #[serde(rename = "type")]
    pub type_tag: String,

    /// Type-specific parameters
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl TryFrom<CampaignFixture> for DiscountCampaign {
    type Error = FixtureError;

    fn try_from(fixture: CampaignFixture) -> Result<Self, Self::Error> {
        let id = fixture.id.trim();
        let name = fixture.name.trim();

        if id.is_empty() {
            return Err(FixtureError::InvalidCampaignData(format!(
                "campaign \"{name}\" has an empty id"
            )));
        }

        if name.is_empty() {
            return Err(FixtureError::InvalidCampaignData(format!(
                "{id}: name should not be empty"
            )));
        }

        let kind = parse_kind(&fixture.type_tag, &fixture.parameters).map_err(|message| {
            FixtureError::InvalidCampaignData(format!("{id}: {message}"))
        })?;

        Ok(DiscountCampaign::new(id, name, fixture.category, kind))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{campaigns::CampaignKind, items::ItemCategory};

    use super::*;

    #[test]
    fn campaign_fixture_converts_parameters() -> TestResult {
        let fixture: CampaignsFixture = serde_norway::from_str(
            r"
campaigns:
  - id: clothing15
    name: 15% off clothing
    category: ON_TOP
    type: PercentageDiscountByItemCategory
    parameters:
      category: Clothing
      percentage: 15
",
        )?;

        let campaign = fixture
            .campaigns
            .into_iter()
            .next()
            .map(DiscountCampaign::try_from)
            .ok_or("expected a campaign")??;

        assert_eq!(campaign.category(), CampaignCategory::OnTop);
        assert_eq!(
            campaign.kind(),
            &CampaignKind::category_percentage(ItemCategory::Clothing, Decimal::from(15))
        );

        Ok(())
    }

    #[test]
    fn campaign_fixture_rejects_bad_parameters() -> TestResult {
        let fixture: CampaignFixture = serde_norway::from_str(
            r"
id: broken
name: Broken
category: SEASONAL
type: SpecialCampaigns
parameters:
  everyXTHB: 300
",
        )?;

        assert!(matches!(
            DiscountCampaign::try_from(fixture),
            Err(FixtureError::InvalidCampaignData(_))
        ));

        Ok(())
    }

    #[test]
    fn campaign_fixture_rejects_blank_id_or_name() -> TestResult {
        let blank_id: CampaignFixture = serde_norway::from_str(
            "id: \"  \"\nname: Points\ncategory: ON_TOP\ntype: DiscountByPoints\n",
        )?;
        let blank_name: CampaignFixture = serde_norway::from_str(
            "id: points\nname: \"\"\ncategory: ON_TOP\ntype: DiscountByPoints\n",
        )?;

        assert!(matches!(
            DiscountCampaign::try_from(blank_id),
            Err(FixtureError::InvalidCampaignData(_))
        ));
        assert!(matches!(
            DiscountCampaign::try_from(blank_name),
            Err(FixtureError::InvalidCampaignData(_))
        ));

        Ok(())
    }
}
