//! Aging calculator (stage 2).
//!
//! Derives elapsed days in stock and the 1..=18 month index used to pick a
//! recovery coefficient. Both month bases are always computed so the trace
//! can show them side by side.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::coefficients::COEFFICIENT_MONTHS;
use crate::types::CoefficientBasis;

/// Days per intake-basis month bucket.
pub const DAYS_PER_MONTH: i64 = 30;

const MILLIS_PER_DAY: i64 = 86_400_000;
const MAX_MONTH_INDEX: i64 = COEFFICIENT_MONTHS as i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aging {
    pub days_in_stock: i64,
    pub month_index_by_intake: u32,
    pub month_index_by_purchase: u32,
}

impl Aging {
    pub fn compute(
        recycle_date: Option<&str>,
        purchase_date: Option<&str>,
        as_of: DateTime<Utc>,
    ) -> Self {
        let days_in_stock = days_in_stock(recycle_date, as_of);
        Self {
            days_in_stock,
            month_index_by_intake: month_index_by_intake(days_in_stock),
            month_index_by_purchase: month_index_by_purchase(purchase_date, as_of),
        }
    }

    /// Month index selected by the configured basis.
    pub fn month_index(&self, basis: CoefficientBasis) -> u32 {
        match basis {
            CoefficientBasis::Intake => self.month_index_by_intake,
            CoefficientBasis::Purchase => self.month_index_by_purchase,
        }
    }
}

/// Parse `YYYY-MM-DD` (UTC midnight) or an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(t)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `max(0, floor((as_of - date) / 1 day))`.
///
/// A missing or unparseable date ages from `as_of` itself, i.e. 0 days.
pub fn days_in_stock(date: Option<&str>, as_of: DateTime<Utc>) -> i64 {
    let Some(start) = date.and_then(parse_date) else {
        return 0;
    };
    let elapsed_ms = (as_of - start).num_milliseconds();
    elapsed_ms.div_euclid(MILLIS_PER_DAY).max(0)
}

/// `clamp(floor(days / 30) + 1, 1, 18)`.
pub fn month_index_by_intake(days_in_stock: i64) -> u32 {
    (days_in_stock.div_euclid(DAYS_PER_MONTH) + 1).clamp(1, MAX_MONTH_INDEX) as u32
}

/// Calendar-month difference since purchase, minus one while the current
/// month is only partially elapsed, clamped to `[1, 18]`.
pub fn month_index_by_purchase(purchase_date: Option<&str>, as_of: DateTime<Utc>) -> u32 {
    let Some(purchased) = purchase_date.and_then(parse_date) else {
        return 1;
    };

    let mut months = (as_of.year() as i64 - purchased.year() as i64) * 12
        + (as_of.month() as i64 - purchased.month() as i64);
    if as_of.day() < purchased.day() {
        months -= 1;
    }
    months.clamp(1, MAX_MONTH_INDEX) as u32
}
