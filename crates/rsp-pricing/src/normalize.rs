//! Input normalization (stage 1).
//!
//! Coerces raw numeric-ish item and config fields into finite numbers with
//! defined defaults. Never fails:
//!
//! | Field                  | Malformed / absent value becomes     |
//! |------------------------|--------------------------------------|
//! | `cost`                 | `0` (negative cost is clamped to 0)  |
//! | `margin`               | `0`                                  |
//! | `market`               | absent (no market signal)            |
//! | `marketAdj`            | config `defaultMarketAdj`            |
//! | config fractions       | `0`                                  |
//! | `roundUnit`            | `1` when below 1                     |
//! | coefficient override   | global table when absent             |

use crate::coefficients::CoefficientTable;
use crate::types::{GlobalPricingConfig, ItemPricingInput};

/// Item + config values after coercion, ready for the numeric stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedInput<'a> {
    pub cost: f64,
    pub margin: f64,
    pub market: Option<f64>,
    pub market_adj: f64,
    pub min_margin_floor: f64,
    pub not_below_market_pct: f64,
    pub round_unit: f64,
    pub coefficients: &'a CoefficientTable,
}

pub fn normalize<'a>(
    item: &'a ItemPricingInput,
    cfg: &'a GlobalPricingConfig,
) -> NormalizedInput<'a> {
    let default_market_adj = finite_or(cfg.default_market_adj, 0.0);

    NormalizedInput {
        cost: finite_or(item.cost, 0.0).max(0.0),
        margin: item.margin.map_or(0.0, |m| finite_or(m, 0.0)),
        market: item.market.filter(|m| m.is_finite()),
        market_adj: item
            .market_adj
            .filter(|a| a.is_finite())
            .unwrap_or(default_market_adj),
        min_margin_floor: finite_or(cfg.min_margin_floor, 0.0),
        not_below_market_pct: finite_or(cfg.not_below_market_pct, 0.0),
        round_unit: cfg.round_unit.max(1) as f64,
        coefficients: item
            .monthly_coefficients
            .as_ref()
            .unwrap_or(&cfg.monthly_coefficients),
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

/// Parse a human-entered number. Empty, non-numeric and non-finite text
/// yields `None`.
pub fn parse_numberish(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Serde helpers for numeric-ish fields (numbers, numeric strings, empty
/// strings, `null`, booleans).
pub(crate) mod lenient {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    use super::parse_numberish;

    struct NumberishVisitor;

    impl<'de> Visitor<'de> for NumberishVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v).filter(|v| v.is_finite()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(parse_numberish(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(NumberishVisitor)
        }
    }

    pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        d.deserialize_any(NumberishVisitor)
    }

    pub fn required<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(optional(d)?.unwrap_or(0.0))
    }

    pub fn round_unit<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        Ok(optional(d)?
            .map(|v| v.trunc() as i64)
            .filter(|v| *v >= 1)
            .unwrap_or(1))
    }

    /// Optional text: `null` and blank strings are unset.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = serde::Deserialize::deserialize(d)?;
        Ok(raw
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    /// A single lenient number, usable inside sequences.
    pub struct Numberish(pub Option<f64>);

    impl<'de> serde::Deserialize<'de> for Numberish {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            optional(d).map(Numberish)
        }
    }
}
