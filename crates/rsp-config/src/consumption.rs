//! Unused-key guard.
//!
//! "Consumed pointers" are JSON pointer prefixes. A leaf under any consumed
//! prefix counts as read; every other leaf is reported. Callers choose
//! whether unused keys warn or fail.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every key `GlobalPricingConfig` reads, legacy aliases included.
pub static CONSUMED_POINTERS: &[&str] = &[
    "/globals/roundUnit",
    "/globals/roundMode",
    "/globals/tailMode",
    "/globals/defaultMarketAdj",
    "/globals/minMarginFloor",
    "/globals/notBelowMarketPct",
    "/globals/ladder",
    "/globals/monthlyCoefficients",
    "/globals/monthlyCoeffs",
    "/globals/cumulativeMode",
    "/globals/coefficientBasis",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Sorted, unique.
    pub consumed_prefixes: Vec<String>,
    /// Sorted.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// `Fail` errors with `CONFIG_UNUSED_KEYS` when anything is unused; `Warn`
/// logs and returns the report.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<&str> = CONSUMED_POINTERS.iter().copied().collect();

    let unused: BTreeSet<String> = leaf_pointers(config_json)
        .into_iter()
        .filter(|leaf| !consumed.iter().any(|prefix| covers(prefix, leaf)))
        .collect();

    let report = UnusedKeyReport {
        consumed_prefixes: consumed.iter().map(|p| p.to_string()).collect(),
        unused_leaf_pointers: unused.into_iter().collect(),
    };
    if report.is_clean() {
        return Ok(report);
    }

    let preview = preview(&report.unused_leaf_pointers);
    match policy {
        UnusedKeyPolicy::Fail => bail!(
            "CONFIG_UNUSED_KEYS: {} config key(s) are not read by the pricing globals. \
            Remove or rename them. First few: {}",
            report.unused_leaf_pointers.len(),
            preview
        ),
        UnusedKeyPolicy::Warn => {
            tracing::warn!(
                count = report.unused_leaf_pointers.len(),
                keys = %preview,
                "CONFIG_UNUSED_KEYS"
            );
            Ok(report)
        }
    }
}

/// `/a/b` covers `/a/b` and `/a/b/c` but not `/a/bc`.
fn covers(prefix: &str, leaf: &str) -> bool {
    match leaf.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Every scalar in `v`, addressed by RFC 6901 pointer. A scalar root is `/`.
fn leaf_pointers(v: &Value) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack: Vec<(String, &Value)> = vec![(String::new(), v)];
    while let Some((path, node)) = stack.pop() {
        match node {
            Value::Object(map) => stack.extend(
                map.iter()
                    .map(|(k, child)| (format!("{path}/{}", k.replace('~', "~0").replace('/', "~1")), child)),
            ),
            Value::Array(items) => stack.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| (format!("{path}/{i}"), child)),
            ),
            _ if path.is_empty() => out.push("/".to_string()),
            _ => out.push(path),
        }
    }
    out
}

fn preview(keys: &[String]) -> String {
    let head: Vec<&str> = keys.iter().take(12).map(String::as_str).collect();
    format!("{head:?}")
}
