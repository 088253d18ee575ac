//! Command-line parsing for the sales trend analyzer.
//!
//! Argument parsing and command dispatch stay separate from the engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::SortKey;
use crate::engine::DEFAULT_CHUNK_SIZE;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trends", version, about = "Sales trend analyzer: per-period totals, trending products, alerts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a sales CSV and print the snapshot (alerts, trending product, peak, revenue).
    Analyze(AnalyzeArgs),
    /// Print the sales table sorted by a column.
    Table(TableArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Sales CSV with a header row (date, product, qty, revenue or their aliases).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Currency code used when formatting revenue.
    #[arg(long, env = "TRENDS_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Print the snapshot as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Disable the terminal bar charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,

    /// Export the snapshot to JSON.
    #[arg(long = "export-snapshot", value_name = "JSON")]
    pub export_snapshot: Option<PathBuf>,

    /// Export per-product totals to CSV.
    #[arg(long = "export-totals", value_name = "CSV")]
    pub export_totals: Option<PathBuf>,

    /// Group records in parallel chunks (large files).
    #[arg(long)]
    pub parallel: bool,

    /// Records per chunk for `--parallel`.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct TableArgs {
    /// Sales CSV with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Column to sort by.
    #[arg(long, value_enum, default_value_t = SortKey::Revenue)]
    pub sort: SortKey,

    /// Sort ascending (default is descending).
    #[arg(long)]
    pub asc: bool,

    /// Print at most N rows.
    #[arg(long)]
    pub limit: Option<usize>,
}
