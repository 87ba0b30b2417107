//! `rsp price`: load a document, resolve globals, price every item.

use anyhow::{Context, Result};
use rsp_config::UnusedKeyPolicy;
use rsp_pricing::{GlobalPricingConfig, PricingResult, PricingTrace};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use super::{parse_as_of, resolve_config_paths, OutputFormat};

pub struct PriceArgs {
    pub doc: String,
    pub config_paths: Vec<String>,
    pub as_of: Option<String>,
    pub format: OutputFormat,
    pub trace: bool,
    pub strict_config: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PricedRow<'a> {
    name: &'a str,
    price: i64,
    profit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a PricingTrace>,
}

pub fn run(args: PriceArgs) -> Result<()> {
    let doc = rsp_codec::load_document(Path::new(&args.doc))
        .with_context(|| format!("load document failed: {}", args.doc))?;

    let config_paths = resolve_config_paths(args.config_paths);
    let (globals, config_hash) = if config_paths.is_empty() {
        (doc.globals.clone(), None)
    } else {
        let (globals, hash) = load_globals(&config_paths, args.strict_config)?;
        (globals, Some(hash))
    };

    let as_of = parse_as_of(args.as_of.as_deref())?;
    info!(items = doc.items.len(), as_of = %as_of, "pricing document");

    let results = rsp_pricing::price_all(doc.items.iter().map(|it| &it.pricing), &globals, as_of);

    let mut conflicts = 0usize;
    for (item, res) in doc.items.iter().zip(&results) {
        if let Some(msg) = &res.trace.market_conflict {
            conflicts += 1;
            warn!(item = %item.name, conflict = %msg, "market conflict");
        }
    }

    let rows: Vec<PricedRow<'_>> = doc
        .items
        .iter()
        .zip(&results)
        .map(|(item, res)| priced_row(&item.name, res, args.trace))
        .collect();

    match args.format {
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&rows).context("serialize price output failed")?;
            println!("{out}");
        }
        OutputFormat::Table => {
            if let Some(h) = &config_hash {
                println!("config_hash={h}");
            }
            println!("as_of={}", as_of.format("%Y-%m-%d"));
            for (i, (row, res)) in rows.iter().zip(&results).enumerate() {
                println!(
                    "item={} name={:?} price={} profit={} conflict={}",
                    i,
                    row.name,
                    row.price,
                    row.profit,
                    res.has_market_conflict()
                );
                if let Some(t) = row.trace {
                    let t = serde_json::to_string(t).context("serialize trace failed")?;
                    println!("trace={t}");
                }
            }
            println!("items_priced={} conflicts={}", results.len(), conflicts);
        }
    }

    Ok(())
}

fn priced_row<'a>(name: &'a str, res: &'a PricingResult, with_trace: bool) -> PricedRow<'a> {
    PricedRow {
        name,
        price: res.price,
        profit: res.profit,
        trace: with_trace.then_some(&res.trace),
    }
}

fn load_globals(paths: &[String], strict: bool) -> Result<(GlobalPricingConfig, String)> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = rsp_config::load_layered_yaml(&path_refs)?;

    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    rsp_config::report_unused_keys(&loaded.config_json, policy)?;

    info!(config_hash = %loaded.config_hash, "globals loaded from config");
    Ok((loaded.globals, loaded.config_hash))
}
