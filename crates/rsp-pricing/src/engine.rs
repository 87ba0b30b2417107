use chrono::{DateTime, Utc};

use crate::aging::Aging;
use crate::ceiling::apply_ceiling;
use crate::coefficients::apply_coefficient;
use crate::floors::{adjusted_market, apply_floors};
use crate::ladder::apply_ladder;
use crate::normalize::normalize;
use crate::rounding::{quantize, round_half_up};
use crate::tail::apply_tail;
use crate::{GlobalPricingConfig, ItemPricingInput, PricingResult, PricingTrace};

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Price one item as of `as_of`.
///
/// Total: every input (including garbage numerics and unparseable dates)
/// yields a result. Identical inputs yield identical results.
pub fn compute_price(
    item: &ItemPricingInput,
    cfg: &GlobalPricingConfig,
    as_of: DateTime<Utc>,
) -> PricingResult {
    let n = normalize(item, cfg);

    let aging = Aging::compute(
        item.recycle_date.as_deref(),
        item.purchase_date.as_deref(),
        as_of,
    );

    let adj_market = adjusted_market(n.market, n.market_adj);
    let initial_margin_price = n.cost * (1.0 + n.margin);

    let ladder_adjustment_pct = cfg.ladder.resolve(aging.days_in_stock);
    let price_after_ladder = apply_ladder(initial_margin_price, ladder_adjustment_pct);

    let month_used = aging.month_index(cfg.coefficient_basis);
    let coefficient_applied = n.coefficients.factor(month_used, cfg.cumulative_mode);
    let price_after_coefficient = apply_coefficient(price_after_ladder, coefficient_applied);

    let floors = apply_floors(
        price_after_coefficient,
        n.cost,
        n.min_margin_floor,
        adj_market,
        n.not_below_market_pct,
    );
    let floor_constraint = floors.floor_constraint();

    let price_after_rounding = quantize(floors.price_after_market_floor, n.round_unit, cfg.round_mode);
    let price_after_tail = apply_tail(price_after_rounding, cfg.tail_mode, floor_constraint);

    let ceiling = apply_ceiling(price_after_tail, adj_market, floor_constraint);
    if let Some(conflict) = &ceiling.conflict {
        tracing::debug!(
            ceiling = conflict.ceiling,
            floor_constraint = conflict.floor_constraint,
            "market ceiling below floor constraint"
        );
    }

    let final_price = ceiling.price.max(0.0);

    PricingResult {
        price: round_half_up(final_price) as i64,
        profit: round_half_up(final_price - n.cost) as i64,
        trace: PricingTrace {
            days_in_stock: aging.days_in_stock,
            month_index_by_purchase: aging.month_index_by_purchase,
            month_index_by_intake: aging.month_index_by_intake,
            adjusted_market: adj_market,
            initial_margin_price,
            ladder_adjustment_pct,
            price_after_ladder,
            coefficient_month_index_used: month_used,
            coefficient_applied,
            price_after_coefficient,
            price_after_min_margin_floor: floors.price_after_min_margin,
            market_floor_value: floors.market_floor,
            price_after_market_floor: floors.price_after_market_floor,
            price_after_rounding,
            price_after_tail,
            price_after_market_ceiling: ceiling.price,
            market_conflict: ceiling.conflict.map(|c| c.to_string()),
        },
    }
}

/// [`compute_price`] against the current wall-clock instant.
pub fn compute_price_now(item: &ItemPricingInput, cfg: &GlobalPricingConfig) -> PricingResult {
    compute_price(item, cfg, Utc::now())
}

/// Price a batch against one config snapshot and one instant. Output order
/// matches input order.
pub fn price_all<'a, I>(items: I, cfg: &GlobalPricingConfig, as_of: DateTime<Utc>) -> Vec<PricingResult>
where
    I: IntoIterator<Item = &'a ItemPricingInput>,
{
    items
        .into_iter()
        .map(|item| compute_price(item, cfg, as_of))
        .collect()
}
