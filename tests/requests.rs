//! Integration tests for JSON requests and their response envelopes.
//!
//! Bodies under `fixtures/requests/` are priced end to end, from raw JSON to the serialized
//! envelope a client would receive.

use std::fs;

use serde_json::{Value, json};
use testresult::TestResult;

use checkout::{
    config::PricingConfig, pipeline::DiscountPipeline, requests::price_json, responses::Envelope,
};

fn envelope_for(name: &str, pipeline: &DiscountPipeline) -> Result<Value, Box<dyn std::error::Error>> {
    let body = fs::read_to_string(format!("./fixtures/requests/{name}.json"))?;
    let envelope = Envelope::from(price_json(&body, pipeline));

    Ok(serde_json::to_value(envelope)?)
}

#[test]
fn priced_request_returns_created_envelope() -> TestResult {
    let value = envelope_for("order-sensitivity", &DiscountPipeline::default())?;

    assert_eq!(
        value,
        json!({
            "status": true,
            "statusCode": 201,
            "message": "",
            "data": {
                "originalTotal": 600.0,
                "finalPrice": 487.5,
                "breakdown": [
                    { "id": "percent10", "campaignName": "10% off", "category": "COUPON", "amount": 60.0 },
                    { "id": "clothing15", "campaignName": "15% off clothing", "category": "ON_TOP", "amount": 52.5 }
                ],
                "appliedCampaignIds": ["percent10", "clothing15"]
            }
        })
    );

    Ok(())
}

#[test]
fn invalid_request_lists_every_problem() -> TestResult {
    let value = envelope_for("invalid", &DiscountPipeline::default())?;

    assert_eq!(value.get("status"), Some(&json!(false)));
    assert_eq!(value.get("statusCode"), Some(&json!(400)));
    assert_eq!(
        value.get("message"),
        Some(&json!([
            "cart.items.0.price must be a non-negative number",
            "discounts.seasonal.0.parameters: Parameters must include valid \"everyXTHB\" and \"discountYTHB\" properties for SpecialCampaigns type"
        ]))
    );
    assert!(value.get("data").is_none(), "data must be omitted: {value}");

    Ok(())
}

#[test]
fn empty_cart_returns_no_items_message() -> TestResult {
    let value = envelope_for("empty-cart", &DiscountPipeline::default())?;

    assert_eq!(value.get("statusCode"), Some(&json!(400)));
    assert_eq!(value.get("message"), Some(&json!("No items in the cart")));

    Ok(())
}

#[test]
fn single_candidate_cap_rejects_longer_lists() -> TestResult {
    let body = json!({
        "cart": {
            "items": [ { "id": "1", "name": "Bag", "price": 640, "category": "ACCESSORIES", "quantity": 1 } ]
        },
        "discounts": {
            "onTop": [
                { "id": "a", "name": "Points", "category": "ON_TOP", "type": "DiscountByPoints", "parameters": {} },
                { "id": "b", "name": "Accessories", "category": "ON_TOP", "type": "PercentageDiscountByItemCategory", "parameters": { "category": "ACCESSORIES", "percentage": 5 } }
            ]
        }
    });

    let pipeline = DiscountPipeline::new(PricingConfig {
        max_campaigns_per_category: Some(1),
        ..PricingConfig::default()
    });

    let envelope = Envelope::from(price_json(&body.to_string(), &pipeline));

    assert_eq!(envelope.status_code, 400);
    assert!(!envelope.is_success());

    Ok(())
}

#[test]
fn malformed_body_is_a_bad_request() {
    let envelope = Envelope::from(price_json("[1, 2, 3]", &DiscountPipeline::default()));

    assert_eq!(envelope.status_code, 400);
    assert!(envelope.data.is_none());
}
