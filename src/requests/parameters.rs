//! Campaign parameter parsing
//!
//! Turns the untyped `parameters` object of a campaign payload into a [`CampaignKind`],
//! according to the campaign's `type` tag.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
    campaigns::{
        CampaignKind,
        types::{
            DISCOUNT_BY_POINTS, FIXED_AMOUNT, PERCENTAGE_DISCOUNT,
            PERCENTAGE_DISCOUNT_BY_ITEM_CATEGORY, SPECIAL_CAMPAIGNS,
        },
    },
    items::ItemCategory,
};

/// Build the typed kind for `type_tag`, or explain what is wrong with `parameters`.
///
/// Unknown tags are accepted with any parameters and become [`CampaignKind::Unrecognized`].
pub(crate) fn parse_kind(type_tag: &str, parameters: &Map<String, Value>) -> Result<CampaignKind, String> {
    match type_tag {
        FIXED_AMOUNT => non_negative(parameters, "amount")
            .map(CampaignKind::fixed_amount)
            .ok_or_else(|| invalid(FIXED_AMOUNT, &["amount"])),

        PERCENTAGE_DISCOUNT => positive(parameters, "percentage")
            .map(CampaignKind::percentage_discount)
            .ok_or_else(|| invalid(PERCENTAGE_DISCOUNT, &["percentage"])),

        PERCENTAGE_DISCOUNT_BY_ITEM_CATEGORY => {
            let percentage = positive(parameters, "percentage");
            let category = parameters
                .get("category")
                .and_then(Value::as_str)
                .filter(|category| !category.trim().is_empty())
                .and_then(|category| category.parse::<ItemCategory>().ok());

            match (category, percentage) {
                (Some(category), Some(percentage)) => {
                    Ok(CampaignKind::category_percentage(category, percentage))
                }
                _ => Err(invalid(
                    PERCENTAGE_DISCOUNT_BY_ITEM_CATEGORY,
                    &["percentage", "category"],
                )),
            }
        }

        DISCOUNT_BY_POINTS => Ok(CampaignKind::DiscountByPoints),

        SPECIAL_CAMPAIGNS => {
            match (
                positive(parameters, "everyXTHB"),
                positive(parameters, "discountYTHB"),
            ) {
                (Some(every), Some(discount)) => Ok(CampaignKind::every_x_get_y(every, discount)),
                _ => Err(invalid(SPECIAL_CAMPAIGNS, &["everyXTHB", "discountYTHB"])),
            }
        }

        other => Ok(CampaignKind::Unrecognized(other.to_string())),
    }
}

fn invalid(type_tag: &str, keys: &[&str]) -> String {
    let keys = keys
        .iter()
        .map(|key| format!("\"{key}\""))
        .collect::<Vec<_>>()
        .join(" and ");

    let noun = if keys.contains(" and ") {
        "properties"
    } else {
        "property"
    };

    format!("Parameters must include valid {keys} {noun} for {type_tag} type")
}

fn positive(parameters: &Map<String, Value>, key: &str) -> Option<Decimal> {
    number(parameters, key).filter(|value| *value > Decimal::ZERO)
}

fn non_negative(parameters: &Map<String, Value>, key: &str) -> Option<Decimal> {
    number(parameters, key).filter(|value| *value >= Decimal::ZERO)
}

/// Reads a JSON number as an exact decimal. Strings and other types are rejected.
pub(crate) fn number(parameters: &Map<String, Value>, key: &str) -> Option<Decimal> {
    match parameters.get(key)? {
        Value::Number(number) => decimal_from_number(number),
        _ => None,
    }
}

pub(crate) fn decimal_from_number(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();

    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
