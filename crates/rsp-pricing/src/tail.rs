//! Tail-digit optimizer (stage 7).
//!
//! Rewrites the trailing digit(s) of the rounded price to a preferred ending
//! without intentionally dropping below the floor constraint.
//!
//! Fallback when the rewritten price is under the floor:
//! `floor(floor_constraint / step) * step + (step - 1)`, then the larger of
//! that and the naive rewrite. The fallback itself can land below a floor
//! that carries a fractional remainder above the tail value (e.g. floor
//! 1249.5 gives 1249). That output is relied on as-is.

use crate::types::TailMode;

pub fn apply_tail(value: f64, mode: TailMode, floor_constraint: f64) -> f64 {
    let step = match mode {
        TailMode::None => return value,
        TailMode::LastDigit9 => 10.0,
        TailMode::LastTwoDigits99 => 100.0,
    };

    let v = value.max(0.0);
    let base = (v / step).floor() * step + (step - 1.0);
    if base >= floor_constraint {
        return base;
    }
    let alt = (floor_constraint / step).floor() * step + (step - 1.0);
    base.max(alt)
}
