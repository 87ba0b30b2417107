//! rsp-pricing
//!
//! Resale price derivation pipeline.
//!
//! One call turns `(item, global config, as-of instant)` into an integer price,
//! an integer profit and a full diagnostic trace. Stages run in a fixed order:
//!
//! 1. input normalization (`normalize`)
//! 2. aging (`aging`)
//! 3. ladder depreciation (`ladder`)
//! 4. recovery coefficient (`coefficients`)
//! 5. min-margin and not-below-market floors (`floors`)
//! 6. quantization (`rounding`)
//! 7. tail-digit rewrite (`tail`)
//! 8. market ceiling + conflict detection (`ceiling`)
//!
//! Deterministic, pure logic. No IO, no wall-clock (except `compute_price_now`),
//! no hidden state. Inputs are borrowed and never mutated.

pub mod aging;
pub mod ceiling;
pub mod coefficients;
mod engine;
pub mod floors;
pub mod ladder;
pub mod normalize;
pub mod rounding;
pub mod tail;
mod types;

pub use aging::Aging;
pub use ceiling::{apply_ceiling, CeilingOutcome, MarketConflict};
pub use coefficients::{parse_coefficient_row, CoefficientTable, COEFFICIENT_MONTHS};
pub use engine::{compute_price, compute_price_now, price_all};
pub use floors::{adjusted_market, apply_floors, FloorOutcome};
pub use ladder::{apply_ladder, Ladder, LadderError, LadderStep};
pub use normalize::{normalize, parse_numberish, NormalizedInput};
pub use rounding::{quantize, round_half_up};
pub use tail::apply_tail;
pub use types::*;
