//! Floor constraint engine (stage 5).
//!
//! Two lower bounds, both absolute price levels:
//! - `cost * (1 + min_margin_floor)`
//! - `adjusted_market * (1 + not_below_market_pct)` (only with a market)
//!
//! They are applied as two sequential `max` clamps so the trace keeps the
//! intermediate "after min-margin" value.

/// `market * (1 + market_adj)`, or `None` without a market.
pub fn adjusted_market(market: Option<f64>, market_adj: f64) -> Option<f64> {
    market.map(|m| m * (1.0 + market_adj))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorOutcome {
    pub min_price_by_margin: f64,
    /// Not-below-market floor; `None` when there is no market signal.
    pub market_floor: Option<f64>,
    pub price_after_min_margin: f64,
    pub price_after_market_floor: f64,
}

impl FloorOutcome {
    /// `max(min_price_by_margin, market_floor)`; the market floor is -inf
    /// when inactive.
    pub fn floor_constraint(&self) -> f64 {
        self.min_price_by_margin
            .max(self.market_floor.unwrap_or(f64::NEG_INFINITY))
    }
}

pub fn apply_floors(
    price: f64,
    cost: f64,
    min_margin_floor: f64,
    adjusted_market: Option<f64>,
    not_below_market_pct: f64,
) -> FloorOutcome {
    let min_price_by_margin = cost * (1.0 + min_margin_floor);
    let price_after_min_margin = price.max(min_price_by_margin);

    let market_floor = adjusted_market.map(|m| m * (1.0 + not_below_market_pct));
    let price_after_market_floor = match market_floor {
        Some(floor) => price_after_min_margin.max(floor),
        None => price_after_min_margin,
    };

    FloorOutcome {
        min_price_by_margin,
        market_floor,
        price_after_min_margin,
        price_after_market_floor,
    }
}
