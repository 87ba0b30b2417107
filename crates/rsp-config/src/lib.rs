//! Layered pricing configuration.
//!
//! YAML documents are merged in order (later layers override earlier ones),
//! canonicalized to JSON and hashed with SHA-256 so a price run can be tied
//! to the exact globals it used. The `/globals` subtree becomes a
//! [`GlobalPricingConfig`].

use anyhow::{Context, Result};
use rsp_pricing::GlobalPricingConfig;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

mod consumption;

pub use consumption::{report_unused_keys, UnusedKeyPolicy, UnusedKeyReport, CONSUMED_POINTERS};

/// JSON pointer of the globals subtree.
pub const GLOBALS_POINTER: &str = "/globals";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
    pub globals: GlobalPricingConfig,
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}")))
        .collect::<Result<Vec<String>>>()?;

    let doc_refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

/// Merge in order: earlier layers are the base, later layers override.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Default::default());
    for (layer, raw) in yaml_docs.iter().enumerate() {
        let parsed: serde_yaml::Value = serde_yaml::from_str(raw)
            .with_context(|| format!("invalid yaml in layer {layer}"))?;
        // An empty document is an empty layer.
        if parsed.is_null() {
            continue;
        }
        let overlay = serde_json::to_value(parsed)
            .with_context(|| format!("yaml->json conversion failed for layer {layer}"))?;
        merge_into(&mut merged, overlay);
    }

    let globals = globals_from_json(&merged)?;
    // serde_json::Map is BTreeMap-backed (no `preserve_order`), so object keys
    // serialize sorted regardless of source order.
    let canonical_json = serde_json::to_string(&merged).context("canonical json serialize failed")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    tracing::debug!(config_hash = %config_hash, layers = yaml_docs.len(), "config loaded");

    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
        globals,
    })
}

/// Deserialize `/globals`; absent means seed defaults.
pub fn globals_from_json(config_json: &Value) -> Result<GlobalPricingConfig> {
    match config_json.pointer(GLOBALS_POINTER) {
        None | Some(Value::Null) => Ok(GlobalPricingConfig::default()),
        Some(v) => serde_json::from_value(v.clone())
            .with_context(|| format!("CONFIG_INVALID_GLOBALS at {GLOBALS_POINTER}")),
    }
}

/// Objects merge key by key; any other overlay value replaces the base.
fn merge_into(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (k, v) in overlay_map {
                merge_into(base_map.entry(k).or_insert(Value::Null), v);
            }
        }
        (slot, v) => *slot = v,
    }
}
