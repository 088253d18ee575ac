//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints reports/charts or JSON
//! - writes optional exports

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnalyzeArgs, Command, TableArgs};
use crate::domain::{AnalyzeConfig, SortDirection, TableConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "TRENDS_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Entry point for the `trends` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging()?;

    // `trends sales.csv` behaves like `trends analyze sales.csv`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(&args),
        Command::Table(args) => handle_table(&args),
    }
}

fn init_logging() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Logs go to stderr so `--json` output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))
}

fn handle_analyze(args: &AnalyzeArgs) -> Result<(), AppError> {
    let config = analyze_config_from_args(args);
    let run = pipeline::run_analysis(&config)?;

    if config.json {
        let json = serde_json::to_string_pretty(&run.snapshot)
            .map_err(|e| AppError::runtime(format!("Failed to serialize snapshot: {e}")))?;
        print_stdout(&json)?;
    } else {
        print_stdout(&crate::report::format_snapshot(&run.snapshot, &run.ingest, &config))?;
        if config.plot {
            print_stdout(&crate::plot::render_demand_chart(&run.snapshot, config.plot_width))?;
            print_stdout(&crate::plot::render_revenue_chart(
                &run.snapshot,
                &config.currency,
                config.plot_width,
            ))?;
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_snapshot {
        crate::io::export::write_snapshot_json(path, &run.snapshot)?;
    }
    if let Some(path) = &config.export_totals {
        crate::io::export::write_totals_csv(path, &run.snapshot)?;
    }

    Ok(())
}

fn handle_table(args: &TableArgs) -> Result<(), AppError> {
    let ingest = crate::io::ingest::load_sales(&args.csv)?;
    let config = table_config_from_args(args);
    print_stdout(&crate::report::format_sales_table(&ingest.records, &config))
}

fn print_stdout(text: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}").map_err(|e| AppError::runtime(format!("Failed to write output: {e}")))
}

pub fn analyze_config_from_args(args: &AnalyzeArgs) -> AnalyzeConfig {
    AnalyzeConfig {
        csv_path: args.csv.clone(),
        currency: args.currency.clone(),
        json: args.json,
        plot: !args.no_plot,
        plot_width: args.width,
        export_snapshot: args.export_snapshot.clone(),
        export_totals: args.export_totals.clone(),
        parallel: args.parallel,
        chunk_size: args.chunk_size,
    }
}

pub fn table_config_from_args(args: &TableArgs) -> TableConfig {
    TableConfig {
        sort_key: args.sort,
        direction: if args.asc {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        },
        limit: args.limit,
    }
}

/// Rewrite argv so a bare CSV path defaults to `analyze`.
///
/// Rules:
/// - `trends`                         -> unchanged (clap prints usage)
/// - `trends sales.csv ...`           -> `trends analyze sales.csv ...`
/// - `trends --help/--version/help`   -> unchanged
/// - `trends analyze|table ...`       -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "table");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}
