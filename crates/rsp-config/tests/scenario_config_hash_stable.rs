//! Scenario: layered config hash stability.
//!
//! GREEN when:
//! - the same layers hash identically on every load;
//! - key order inside a YAML document does not change the hash;
//! - different values produce different hashes;
//! - overlays override the base and flow through to the parsed globals.

use rsp_config::load_layered_yaml_from_strings;
use rsp_pricing::{RoundMode, TailMode};

const BASE_YAML: &str = r#"
globals:
  roundUnit: 10
  roundMode: nearest
  tailMode: last-digit-9
  defaultMarketAdj: 0.05
  minMarginFloor: 0.10
  notBelowMarketPct: -0.05
  ladder: "30/-0.05,60/-0.10,90/-0.15"
  cumulativeMode: false
"#;

const BASE_YAML_REORDERED: &str = r#"
globals:
  cumulativeMode: false
  ladder: "30/-0.05,60/-0.10,90/-0.15"
  notBelowMarketPct: -0.05
  minMarginFloor: 0.10
  defaultMarketAdj: 0.05
  tailMode: last-digit-9
  roundMode: nearest
  roundUnit: 10
"#;

const OVERLAY_YAML: &str = r#"
globals:
  roundUnit: 100
  tailMode: "99"
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash, "same YAML input must produce identical hash");
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
    assert_eq!(original.globals, reordered.globals);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML, "globals:\n  minMarginFloor: 0.2\n"]).unwrap();

    assert_ne!(a.config_hash, b.config_hash, "different values must produce different hashes");
}

#[test]
fn overlay_overrides_base_and_reaches_globals() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    let unit = loaded
        .config_json
        .pointer("/globals/roundUnit")
        .and_then(|v| v.as_i64())
        .unwrap();
    assert_eq!(unit, 100, "overlay should override base roundUnit");

    let g = &loaded.globals;
    assert_eq!(g.round_unit, 100);
    assert_eq!(g.tail_mode, TailMode::LastTwoDigits99);
    assert_eq!(g.round_mode, RoundMode::Nearest, "base value survives the overlay");
    assert_eq!(g.ladder.to_text(), "30/-0.05,60/-0.1,90/-0.15");
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64, "SHA-256 hash should be 64 hex chars");
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_layers_yield_seed_globals() {
    let a = load_layered_yaml_from_strings(&["{}"]).unwrap();
    let b = load_layered_yaml_from_strings(&[""]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.globals, rsp_pricing::GlobalPricingConfig::default());
}

#[test]
fn malformed_globals_error_carries_code() {
    let err = load_layered_yaml_from_strings(&["globals:\n  roundMode: sideways\n"]).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("CONFIG_INVALID_GLOBALS"), "msg={msg}");
}

#[test]
fn files_load_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    std::fs::write(&base, BASE_YAML).unwrap();
    std::fs::write(&overlay, OVERLAY_YAML).unwrap();

    let paths = [base.to_str().unwrap(), overlay.to_str().unwrap()];
    let from_files = rsp_config::load_layered_yaml(&paths).unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_eq!(from_files.config_hash, from_strings.config_hash);

    let missing = dir.path().join("nope.yaml");
    let err = rsp_config::load_layered_yaml(&[missing.to_str().unwrap()]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read yaml path"));
}
