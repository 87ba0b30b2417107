use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "rsp")]
#[command(about = "Resale pricing CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every item in a JSON document or CSV file
    Price {
        /// Inventory document (.json with globals, or .csv items)
        #[arg(long)]
        doc: String,

        /// Layered globals YAML in merge order; replaces the document globals.
        /// Falls back to RSP_CONFIG (comma-separated) when omitted.
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Pricing date, YYYY-MM-DD or RFC 3339 (default: now)
        #[arg(long = "as-of")]
        as_of: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Include the full stage trace per item
        #[arg(long, default_value_t = false)]
        trace: bool,

        /// Fail on config keys nothing reads (default: warn)
        #[arg(long = "strict-config", default_value_t = false)]
        strict_config: bool,
    },

    /// Convert an inventory between JSON document and CSV (by extension)
    Convert {
        #[arg(long)]
        input: String,

        #[arg(long)]
        output: String,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> shop -> season ...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Generate a month-based ladder (one step per month at month*30 days)
    LadderGen {
        #[arg(long)]
        start: u32,

        #[arg(long)]
        end: u32,

        /// Adjustment per step, e.g. -0.05
        #[arg(long, allow_negative_numbers = true)]
        pct: f64,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Price {
            doc,
            config_paths,
            as_of,
            format,
            trace,
            strict_config,
        } => commands::price::run(commands::price::PriceArgs {
            doc,
            config_paths,
            as_of,
            format,
            trace,
            strict_config,
        })?,

        Commands::Convert { input, output } => commands::convert::run(&input, &output)?,

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = rsp_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::LadderGen { start, end, pct } => {
            let ladder = rsp_pricing::Ladder::by_month(start, end, pct)?;
            println!("steps={}", ladder.steps().len());
            println!("ladder={ladder}");
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries the command output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
