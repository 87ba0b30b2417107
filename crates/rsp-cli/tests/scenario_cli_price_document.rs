use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

/// scenario_cli_price_document
///
/// Validates:
/// 1) `rsp price` prices the reference item to 11000 / profit 1000.
/// 2) `--format json --trace` emits a parseable array with the stage trace.
/// 3) `--config` layers replace the document globals and print the hash.
/// 4) Unknown config keys fail under `--strict-config` with CONFIG_UNUSED_KEYS.
/// 5) Market conflicts are flagged in the output.

const DOC: &str = r#"{
  "globals": {
    "roundUnit": 10,
    "roundMode": "nearest",
    "tailMode": "none",
    "minMarginFloor": 0.10,
    "ladder": "30/-0.05,60/-0.10,90/-0.15"
  },
  "items": [
    { "name": "Reference NB", "cost": 10000, "margin": 0.2, "recycleDate": "2024-02-05" }
  ]
}"#;

fn rsp(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rsp").expect("rsp binary must build");
    cmd.current_dir(dir)
        .env_remove("RSP_CONFIG")
        .env("RUST_LOG", "warn");
    cmd
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let p = dir.join(name);
    std::fs::write(&p, body).unwrap();
    p.to_string_lossy().to_string()
}

#[test]
fn table_output_prices_reference_item() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(dir.path(), "inventory.json", DOC);

    rsp(dir.path())
        .args(["price", "--doc", &doc, "--as-of", "2024-05-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as_of=2024-05-10"))
        .stdout(predicate::str::contains(
            "item=0 name=\"Reference NB\" price=11000 profit=1000 conflict=false",
        ))
        .stdout(predicate::str::contains("items_priced=1 conflicts=0"));
}

#[test]
fn json_output_includes_trace_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(dir.path(), "inventory.json", DOC);

    let out = rsp(dir.path())
        .args([
            "price", "--doc", &doc, "--as-of", "2024-05-10", "--format", "json", "--trace",
        ])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("stdout must be JSON");
    assert_eq!(v[0]["name"], "Reference NB");
    assert_eq!(v[0]["price"], 11000);
    assert_eq!(v[0]["profit"], 1000);
    assert_eq!(v[0]["trace"]["daysInStock"], 95);
    assert_eq!(v[0]["trace"]["ladderAdjustmentPct"], -0.15);
}

#[test]
fn config_layers_replace_document_globals() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(dir.path(), "inventory.json", DOC);
    let base = write(
        dir.path(),
        "base.yaml",
        "globals:\n  tailMode: none\n  ladder: \"30/-0.05,60/-0.10,90/-0.15\"\n  minMarginFloor: 0.10\n",
    );
    let shop = write(dir.path(), "shop.yaml", "globals:\n  minMarginFloor: 0.25\n");

    rsp(dir.path())
        .args([
            "price", "--doc", &doc, "--as-of", "2024-05-10", "--config", &base, "--config", &shop,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_hash="))
        .stdout(predicate::str::contains("price=12500 profit=2500"));
}

#[test]
fn config_paths_fall_back_to_env() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(dir.path(), "inventory.json", DOC);
    let base = write(
        dir.path(),
        "base.yaml",
        "globals:\n  tailMode: none\n  ladder: \"\"\n  minMarginFloor: 0\n",
    );

    rsp(dir.path())
        .env("RSP_CONFIG", &base)
        .args(["price", "--doc", &doc, "--as-of", "2024-05-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config_hash="))
        .stdout(predicate::str::contains("price=12000 profit=2000"));
}

#[test]
fn strict_config_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(dir.path(), "inventory.json", DOC);
    let cfg = write(dir.path(), "typo.yaml", "globals:\n  minMarginFlor: 0.3\n");

    rsp(dir.path())
        .args(["price", "--doc", &doc, "--config", &cfg, "--strict-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_UNUSED_KEYS"));
}

#[test]
fn market_conflict_is_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(
        dir.path(),
        "inventory.json",
        r#"{
          "globals": { "tailMode": "9", "minMarginFloor": 0.05, "ladder": "" },
          "items": [
            { "name": "Overpriced", "cost": 10000, "margin": 0.2, "market": 10000, "marketAdj": 0 }
          ]
        }"#,
    );

    rsp(dir.path())
        .args(["price", "--doc", &doc, "--as-of", "2024-05-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("price=10000 profit=0 conflict=true"))
        .stdout(predicate::str::contains("conflicts=1"))
        .stderr(predicate::str::contains("market conflict"));
}

#[test]
fn bad_as_of_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(dir.path(), "inventory.json", DOC);

    rsp(dir.path())
        .args(["price", "--doc", &doc, "--as-of", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --as-of"));
}
