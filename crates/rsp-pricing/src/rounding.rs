//! Rounding engine (stage 6).

use crate::types::RoundMode;

/// Round to the nearest integer with ties toward +inf (`2.5 -> 3`,
/// `-2.5 -> -2`).
pub fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Quantize `v` to a multiple of `unit` under `mode`. Units below 1 (or
/// non-finite) are treated as 1.
pub fn quantize(v: f64, unit: f64, mode: RoundMode) -> f64 {
    let unit = if unit.is_finite() && unit >= 1.0 { unit } else { 1.0 };
    let q = v / unit;
    match mode {
        RoundMode::Nearest => round_half_up(q) * unit,
        RoundMode::Ceiling => q.ceil() * unit,
        RoundMode::Floor => q.floor() * unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_modes_on_half_unit() {
        assert_eq!(quantize(1050.0, 100.0, RoundMode::Nearest), 1100.0);
        assert_eq!(quantize(1050.0, 100.0, RoundMode::Floor), 1000.0);
        assert_eq!(quantize(1050.0, 100.0, RoundMode::Ceiling), 1100.0);
    }

    #[test]
    fn small_unit_is_one() {
        assert_eq!(quantize(12.4, 0.0, RoundMode::Nearest), 12.0);
        assert_eq!(quantize(12.4, -5.0, RoundMode::Ceiling), 13.0);
    }

    #[test]
    fn ties_go_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }
}
