use rsp_config::{load_layered_yaml_from_strings, report_unused_keys, UnusedKeyPolicy};

/// scenario_unused_keys_warn_or_fail
///
/// Validates:
/// 1) Unused keys are detected under Warn but do not error.
/// 2) Unused keys fail under Fail with CONFIG_UNUSED_KEYS.
/// 3) Keys under consumed prefixes (including list-form ladders) are not flagged.
/// 4) Deterministic ordering of unused pointers.

#[test]
fn warn_mode_reports_unused_keys_without_error() {
    let yaml = r#"
globals:
  roundUnit: 10
  roundUnti: 100
shop:
  name: "Main St"
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert!(!report.is_clean(), "report should detect unused keys");
    assert!(
        report
            .unused_leaf_pointers
            .contains(&"/globals/roundUnti".to_string()),
        "misspelled key must be reported"
    );
    assert!(report
        .unused_leaf_pointers
        .contains(&"/shop/name".to_string()));
}

#[test]
fn fail_mode_errors_on_unused_keys() {
    let yaml = r#"
globals:
  tailMode: none
  extra: 1
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let result = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail);

    assert!(result.is_err(), "fail policy must error when unused keys exist");
    let msg = format!("{:?}", result.err().unwrap());
    assert!(msg.contains("CONFIG_UNUSED_KEYS"), "error message should contain CONFIG_UNUSED_KEYS");
}

#[test]
fn consumed_prefix_covers_nested_keys() {
    let yaml = r#"
globals:
  ladder:
    - { days: 30, adj: -0.05 }
    - { days: 60, adj: -0.10 }
  monthlyCoeffs: [1.0, 0.98, 0.96]
  coefficientBasis: purchase
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail)
        .expect("fully consumed config must pass under Fail");

    assert!(report.is_clean());
    assert_eq!(loaded.globals.ladder.steps().len(), 2);
    assert_eq!(loaded.globals.monthly_coefficients.month(18), 0.96);
}

#[test]
fn deterministic_unused_pointer_ordering() {
    let yaml = r#"
unused:
  b: 2
  a: 1
"#;

    let loaded = load_layered_yaml_from_strings(&[yaml]).expect("config load must succeed");
    let report = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)
        .expect("warn mode must not error");

    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/unused/a".to_string(), "/unused/b".to_string()],
        "unused pointers must be sorted deterministically"
    );
}
