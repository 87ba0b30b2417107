//! Command handler modules for rsp-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod convert;
pub mod price;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;

/// Env var with default config paths (comma-separated) for `rsp price`.
pub const ENV_CONFIG_PATHS: &str = "RSP_CONFIG";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key=value` line per item
    Table,
    /// JSON array on stdout
    Json,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Parse `--as-of`; absent means now.
pub fn parse_as_of(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(s) => rsp_pricing::aging::parse_date(s).ok_or_else(|| {
            anyhow::anyhow!("invalid --as-of '{}'. expected YYYY-MM-DD or RFC 3339", s)
        }),
    }
}

/// Explicit `--config` paths win; otherwise `RSP_CONFIG`.
pub fn resolve_config_paths(cli_paths: Vec<String>) -> Vec<String> {
    if !cli_paths.is_empty() {
        return cli_paths;
    }
    std::env::var(ENV_CONFIG_PATHS)
        .map(|v| split_paths(&v))
        .unwrap_or_default()
}

fn split_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
