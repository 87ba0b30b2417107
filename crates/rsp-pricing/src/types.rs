use serde::{Deserialize, Serialize};

use crate::coefficients::{self, CoefficientTable};
use crate::ladder::{Ladder, LadderStep};
use crate::normalize::lenient;

// ---------------------------------------------------------------------------
// Policy enums
// ---------------------------------------------------------------------------

/// Quantization policy for the rounding stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundMode {
    #[default]
    Nearest,
    #[serde(alias = "ceil")]
    Ceiling,
    Floor,
}

impl RoundMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundMode::Nearest => "nearest",
            RoundMode::Ceiling => "ceiling",
            RoundMode::Floor => "floor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Some(RoundMode::Nearest),
            "ceiling" | "ceil" => Some(RoundMode::Ceiling),
            "floor" => Some(RoundMode::Floor),
            _ => None,
        }
    }
}

/// Preferred cosmetic ending for the rounded price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TailMode {
    #[default]
    #[serde(rename = "none")]
    None,
    /// Replace the ones digit with 9.
    #[serde(rename = "last-digit-9", alias = "9")]
    LastDigit9,
    /// Replace the tens and ones digits with 99.
    #[serde(rename = "last-two-digits-99", alias = "99")]
    LastTwoDigits99,
}

impl TailMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TailMode::None => "none",
            TailMode::LastDigit9 => "last-digit-9",
            TailMode::LastTwoDigits99 => "last-two-digits-99",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(TailMode::None),
            "last-digit-9" | "9" => Some(TailMode::LastDigit9),
            "last-two-digits-99" | "99" => Some(TailMode::LastTwoDigits99),
            _ => None,
        }
    }
}

/// Which date drives the month index used for coefficient lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientBasis {
    /// Days since the intake (recycle) date, bucketed by 30.
    #[default]
    Intake,
    /// Calendar months since the original purchase date.
    Purchase,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Global pricing configuration.
///
/// Callers own the mutable copy; the pipeline only borrows a snapshot for the
/// duration of one computation. Missing fields deserialize to the seed values
/// of [`GlobalPricingConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalPricingConfig {
    /// Quantization granularity. Values below 1 are treated as 1.
    #[serde(deserialize_with = "lenient::round_unit")]
    pub round_unit: i64,
    pub round_mode: RoundMode,
    pub tail_mode: TailMode,
    /// Market adjustment applied when the item has no override.
    #[serde(deserialize_with = "lenient::required")]
    pub default_market_adj: f64,
    /// Minimum margin over cost, as a fraction.
    #[serde(deserialize_with = "lenient::required")]
    pub min_margin_floor: f64,
    /// Signed fraction relative to adjusted market (e.g. -0.05).
    #[serde(deserialize_with = "lenient::required")]
    pub not_below_market_pct: f64,
    pub ladder: Ladder,
    #[serde(alias = "monthlyCoeffs")]
    pub monthly_coefficients: CoefficientTable,
    pub cumulative_mode: bool,
    pub coefficient_basis: CoefficientBasis,
}

impl Default for GlobalPricingConfig {
    fn default() -> Self {
        Self {
            round_unit: 10,
            round_mode: RoundMode::Nearest,
            tail_mode: TailMode::LastDigit9,
            default_market_adj: 0.05,
            min_margin_floor: 0.10,
            not_below_market_pct: -0.05,
            ladder: Ladder::new([
                LadderStep::new(30.0, -0.05),
                LadderStep::new(60.0, -0.10),
                LadderStep::new(90.0, -0.15),
            ]),
            monthly_coefficients: CoefficientTable::default(),
            cumulative_mode: false,
            coefficient_basis: CoefficientBasis::Intake,
        }
    }
}

/// Pricing-relevant fields of one inventory item.
///
/// Numeric fields accept numbers, numeric strings, empty strings and `null`
/// on deserialization: required fields fall back to 0, optional overrides to
/// unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPricingInput {
    #[serde(deserialize_with = "lenient::required")]
    pub cost: f64,
    #[serde(deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub market: Option<f64>,
    #[serde(deserialize_with = "lenient::optional", skip_serializing_if = "Option::is_none")]
    pub market_adj: Option<f64>,
    /// Intake date (`YYYY-MM-DD` or RFC 3339).
    #[serde(
        alias = "date",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub recycle_date: Option<String>,
    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    /// Per-item override of the global table. `None` means "use global".
    #[serde(
        alias = "monthlyCoeffs",
        deserialize_with = "coefficients::lenient_override",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_coefficients: Option<CoefficientTable>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Every intermediate value the pipeline produces, in causal order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTrace {
    pub days_in_stock: i64,
    pub month_index_by_purchase: u32,
    pub month_index_by_intake: u32,
    pub adjusted_market: Option<f64>,
    pub initial_margin_price: f64,
    pub ladder_adjustment_pct: f64,
    pub price_after_ladder: f64,
    pub coefficient_month_index_used: u32,
    pub coefficient_applied: f64,
    pub price_after_coefficient: f64,
    pub price_after_min_margin_floor: f64,
    pub market_floor_value: Option<f64>,
    pub price_after_market_floor: f64,
    pub price_after_rounding: f64,
    pub price_after_tail: f64,
    pub price_after_market_ceiling: f64,
    pub market_conflict: Option<String>,
}

/// Final answer for one item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Price rounded to the nearest whole currency unit.
    pub price: i64,
    /// `price - cost`, rounded to the nearest whole currency unit.
    pub profit: i64,
    pub trace: PricingTrace,
}

impl PricingResult {
    pub fn has_market_conflict(&self) -> bool {
        self.trace.market_conflict.is_some()
    }
}
