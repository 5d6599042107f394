//! Integration test for the bundled `demo` fixture set.
//!
//! Cart: T-Shirt 350, Hoodie 700, Watch 850, Hat 250 (2,150 THB) with 68 loyalty points.
//!
//! 1. Coupon: 10% off (215) beats 50 off. Running total 1,935.
//! 2. On top: 15% off clothing (15% of 1,050 = 157.5) beats 68 points. Running total 1,777.5.
//! 3. Seasonal: 40 off every 300, five times (200). Final price 1,577.5.

use rust_decimal::Decimal;
use testresult::TestResult;

use checkout::{fixtures::Fixture, pipeline::calculate};

#[test]
fn demo_fixture_prices_through_every_category() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let cart = fixture.cart()?;

    let result = calculate(&cart, fixture.campaigns())?;

    assert_eq!(result.original_total(), Decimal::from(2_150));
    assert_eq!(
        result.applied_campaign_ids(),
        ["percent10", "clothing15", "every300"]
    );
    assert_eq!(result.final_price(), Decimal::new(15775, 1));

    Ok(())
}

#[test]
fn demo_fixture_receipt_renders() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let cart = fixture.cart()?;
    let result = calculate(&cart, fixture.campaigns())?;

    let mut out = Vec::new();
    result.write_to(&mut out, &cart)?;
    let rendered = String::from_utf8(out)?;

    assert!(rendered.contains("Hoodie"), "missing item row: {rendered}");
    assert!(rendered.contains("15% off clothing"), "missing discount row: {rendered}");
    assert!(rendered.contains("577.50"), "missing final price: {rendered}");

    Ok(())
}
