//! Ceiling clamp & conflict detector (stage 8).
//!
//! The adjusted market price caps the final price. The cap runs after the
//! tail stage and always wins, even over the floor constraint; when the cap
//! sits below the floor the pair is reported, not resolved.

use std::fmt;

/// Ceiling below floor: no price satisfies both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketConflict {
    pub ceiling: f64,
    pub floor_constraint: f64,
}

impl fmt::Display for MarketConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "market ceiling {:.2} is below floor constraint {:.2}; ceiling applied",
            self.ceiling, self.floor_constraint
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CeilingOutcome {
    pub price: f64,
    pub conflict: Option<MarketConflict>,
}

pub fn apply_ceiling(
    price: f64,
    adjusted_market: Option<f64>,
    floor_constraint: f64,
) -> CeilingOutcome {
    let Some(ceiling) = adjusted_market else {
        return CeilingOutcome {
            price,
            conflict: None,
        };
    };

    let conflict = (ceiling < floor_constraint).then_some(MarketConflict {
        ceiling,
        floor_constraint,
    });

    CeilingOutcome {
        price: price.min(ceiling),
        conflict,
    }
}
