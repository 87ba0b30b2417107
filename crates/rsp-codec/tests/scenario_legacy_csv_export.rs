//! Scenario: rows exported by the older tool still load.
//!
//! The older export uses `date` for the intake date and `monthlyCoeffs` for
//! the coefficient row, has no `purchaseDate` column, and quotes cells with
//! `""` escaping.
//!
//! # Invariants under test
//!
//! 1. Legacy headers map onto `recycleDate` / `monthlyCoefficients`.
//! 2. Quoted cells (commas, escaped quotes) decode intact.
//! 3. Short coefficient rows pad with their last value.
//! 4. `repair` is true only for a case-insensitive `true`.
//! 5. Decoded items price like hand-built ones.

use chrono::{TimeZone, Utc};
use rsp_codec::read_items_csv;
use rsp_pricing::{compute_price, GlobalPricingConfig, ItemPricingInput, TailMode};

const LEGACY: &str = "name,category,date,cost,margin,market,marketAdj,repair,repairNote,monthlyCoeffs
\"Acer Swift 3, 14\"\"\",NB,2024-02-05,10000,0.2,,,TRUE,\"fan \"\"noisy\"\"\",\"1,1,1,0.9\"
Desk PC,PC,2024-05-01,3000,,8000,0,yes,,
";

#[test]
fn legacy_headers_and_quoting_decode() {
    let items = read_items_csv(LEGACY).unwrap();
    assert_eq!(items.len(), 2);

    let a = &items[0];
    assert_eq!(a.name, "Acer Swift 3, 14\"");
    assert_eq!(a.category, "NB");
    assert!(a.repair);
    assert_eq!(a.repair_note, "fan \"noisy\"");
    assert_eq!(a.pricing.recycle_date.as_deref(), Some("2024-02-05"));
    assert_eq!(a.pricing.purchase_date, None);

    let coeffs = a.pricing.monthly_coefficients.expect("coefficient row should parse");
    assert_eq!(coeffs.month(3), 1.0);
    assert_eq!(coeffs.month(4), 0.9);
    assert_eq!(coeffs.month(18), 0.9);

    let b = &items[1];
    assert!(!b.repair, "'yes' is not a repair flag");
    assert_eq!(b.pricing.margin, None);
    assert_eq!(b.pricing.market, Some(8_000.0));
    assert_eq!(b.pricing.market_adj, Some(0.0));
    assert_eq!(b.pricing.monthly_coefficients, None);
}

#[test]
fn decoded_row_prices_like_typed_input() {
    let items = read_items_csv(LEGACY).unwrap();
    let as_of = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
    let cfg = GlobalPricingConfig {
        tail_mode: TailMode::None,
        ..Default::default()
    };

    let typed = ItemPricingInput {
        cost: 3_000.0,
        market: Some(8_000.0),
        market_adj: Some(0.0),
        recycle_date: Some("2024-05-01".to_string()),
        ..Default::default()
    };
    assert_eq!(
        compute_price(&items[1].pricing, &cfg, as_of),
        compute_price(&typed, &cfg, as_of)
    );

    // Market floor 8000 * 0.95 lifts the 3000 cost item.
    assert_eq!(compute_price(&typed, &cfg, as_of).price, 7_600);
}
