//! Recovery coefficient applier (stage 4).
//!
//! A fixed 18-entry table of per-month multipliers (index 0 = month 1). The
//! factor is either looked up for the current month or compounded across
//! months `1..=month`.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::normalize::lenient::Numberish;
use crate::normalize::parse_numberish;

pub const COEFFICIENT_MONTHS: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefficientTable([f64; COEFFICIENT_MONTHS]);

impl Default for CoefficientTable {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl CoefficientTable {
    pub fn uniform(value: f64) -> Self {
        CoefficientTable([value; COEFFICIENT_MONTHS])
    }

    /// Build from any number of values: extra values are dropped, missing
    /// months repeat the last supplied value (or 1.0 when none).
    pub fn from_slice(values: &[f64]) -> Self {
        let mut table = [1.0; COEFFICIENT_MONTHS];
        let mut last = 1.0;
        for (i, slot) in table.iter_mut().enumerate() {
            if let Some(v) = values.get(i) {
                last = *v;
            }
            *slot = last;
        }
        CoefficientTable(table)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Coefficient for a 1-based month; missing or non-finite entries read as 1.
    pub fn month(&self, month_index: u32) -> f64 {
        (month_index as usize)
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(1.0)
    }

    /// Factor to apply for `month_index`.
    pub fn factor(&self, month_index: u32, cumulative: bool) -> f64 {
        if cumulative {
            (1..=month_index).map(|m| self.month(m)).product()
        } else {
            self.month(month_index)
        }
    }

    /// Comma-joined text form used by tabular rows.
    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parse a pasted coefficient row (comma and/or whitespace separated).
///
/// Returns `None` when nothing usable was supplied or any token is not a
/// finite number, so callers can tell "garbage supplied" apart from a valid
/// list. Takes at most 18 tokens and pads shorter rows with the last value.
pub fn parse_coefficient_row(text: &str) -> Option<CoefficientTable> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .take(COEFFICIENT_MONTHS)
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let mut values = Vec::with_capacity(tokens.len());
    for t in tokens {
        values.push(parse_numberish(t)?);
    }
    Some(CoefficientTable::from_slice(&values))
}

pub fn apply_coefficient(price: f64, coefficient: f64) -> f64 {
    price * coefficient
}

impl Serialize for CoefficientTable {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(COEFFICIENT_MONTHS))?;
        for v in &self.0 {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableRepr {
    Text(String),
    List(Vec<Numberish>),
}

fn table_from_list(list: Vec<Numberish>) -> CoefficientTable {
    let values: Vec<f64> = list.into_iter().map(|n| n.0.unwrap_or(1.0)).collect();
    CoefficientTable::from_slice(&values)
}

fn table_from_text<E: de::Error>(text: &str) -> Result<CoefficientTable, E> {
    parse_coefficient_row(text)
        .ok_or_else(|| E::custom(format!("unparseable coefficient row: '{text}'")))
}

/// Accepts a list (entries may be numeric strings; blanks read as 1) or the
/// comma-joined text form.
impl<'de> Deserialize<'de> for CoefficientTable {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match TableRepr::deserialize(d)? {
            TableRepr::List(list) => Ok(table_from_list(list)),
            TableRepr::Text(t) => table_from_text(&t),
        }
    }
}

/// Per-item override: `null`, `[]` and blank text mean "use the global table".
pub(crate) fn lenient_override<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<CoefficientTable>, D::Error> {
    match Option::<TableRepr>::deserialize(d)? {
        None => Ok(None),
        Some(TableRepr::List(list)) if list.is_empty() => Ok(None),
        Some(TableRepr::List(list)) => Ok(Some(table_from_list(list))),
        Some(TableRepr::Text(t)) if t.trim().is_empty() => Ok(None),
        Some(TableRepr::Text(t)) => table_from_text(&t).map(Some),
    }
}
