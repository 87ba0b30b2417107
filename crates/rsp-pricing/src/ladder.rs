//! Ladder (tier) resolver (stage 3).
//!
//! A ladder is a step function from days in stock to one depreciation
//! percentage. The effective step is the largest satisfied threshold; steps
//! never accumulate.
//!
//! Human-entry text form: `"30/-0.05,60/-0.1,90/-0.15"`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::aging::DAYS_PER_MONTH;
use crate::normalize::parse_numberish;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderStep {
    #[serde(alias = "days")]
    pub days_threshold: f64,
    #[serde(alias = "adj")]
    pub adjustment_pct: f64,
}

impl LadderStep {
    pub fn new(days_threshold: f64, adjustment_pct: f64) -> Self {
        Self {
            days_threshold,
            adjustment_pct,
        }
    }

    fn is_finite(&self) -> bool {
        self.days_threshold.is_finite() && self.adjustment_pct.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    /// Month-based generation with `end < start`.
    EndBeforeStart { start: u32, end: u32 },
}

impl fmt::Display for LadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LadderError::EndBeforeStart { start, end } => {
                write!(f, "ladder end month {end} is before start month {start}")
            }
        }
    }
}

impl std::error::Error for LadderError {}

/// Ascending, unique-threshold list of steps.
///
/// Every constructor sorts ascending and de-duplicates by last write, so an
/// out-of-order ladder cannot be built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ladder(Vec<LadderStep>);

impl Ladder {
    pub fn new(steps: impl IntoIterator<Item = LadderStep>) -> Self {
        let mut sorted: Vec<LadderStep> = steps.into_iter().filter(LadderStep::is_finite).collect();
        // Stable sort keeps entry order among equal thresholds.
        sorted.sort_by(|a, b| a.days_threshold.total_cmp(&b.days_threshold));

        let mut out: Vec<LadderStep> = Vec::with_capacity(sorted.len());
        for step in sorted {
            match out.last_mut() {
                Some(last) if last.days_threshold == step.days_threshold => *last = step,
                _ => out.push(step),
            }
        }
        Ladder(out)
    }

    /// Parse the human-entry form. Malformed segments are dropped; parts
    /// after the second `/` are ignored.
    pub fn parse(text: &str) -> Self {
        let mut steps = Vec::new();
        for seg in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let mut parts = seg.split('/');
            let days = parts.next().and_then(parse_numberish);
            let pct = parts.next().and_then(parse_numberish);
            match (days, pct) {
                (Some(d), Some(p)) => steps.push(LadderStep::new(d, p)),
                _ => tracing::debug!(segment = seg, "dropping malformed ladder segment"),
            }
        }
        Ladder::new(steps)
    }

    /// One step per month in `start..=end`, at `month * 30` days, all with
    /// the same adjustment.
    pub fn by_month(start_month: u32, end_month: u32, per_month_pct: f64) -> Result<Self, LadderError> {
        if end_month < start_month {
            return Err(LadderError::EndBeforeStart {
                start: start_month,
                end: end_month,
            });
        }
        Ok(Ladder::new((start_month..=end_month).map(|m| {
            LadderStep::new((i64::from(m) * DAYS_PER_MONTH) as f64, per_month_pct)
        })))
    }

    pub fn steps(&self) -> &[LadderStep] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|s| format!("{}/{}", s.days_threshold, s.adjustment_pct))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Adjustment of the largest satisfied threshold, or 0 when none is.
    pub fn resolve(&self, days_in_stock: i64) -> f64 {
        let days = days_in_stock as f64;
        let mut pct = 0.0;
        for step in &self.0 {
            if days >= step.days_threshold {
                pct = step.adjustment_pct;
            }
        }
        pct
    }
}

/// `price * (1 + pct)`, skipped entirely when `pct` is exactly 0.
pub fn apply_ladder(price: f64, pct: f64) -> f64 {
    if pct == 0.0 {
        price
    } else {
        price * (1.0 + pct)
    }
}

impl fmt::Display for Ladder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Ladder {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_text())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LadderRepr {
    Text(String),
    Steps(Vec<LadderStep>),
}

impl<'de> Deserialize<'de> for Ladder {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match Option::<LadderRepr>::deserialize(d)? {
            Some(LadderRepr::Text(t)) => Ladder::parse(&t),
            Some(LadderRepr::Steps(steps)) => Ladder::new(steps),
            None => Ladder::default(),
        })
    }
}
