//! Shared "analysis pipeline" used by every subcommand.
//!
//! load CSV -> validated records -> engine -> snapshot
//!
//! Front-ends then focus on presentation (text report, JSON, charts, exports).

use crate::domain::{AnalyzeConfig, Snapshot};
use crate::engine::{EngineOptions, analyze_sales_with};
use crate::error::AppError;
use crate::io::ingest::{IngestedSales, load_sales};

/// All computed outputs of a single `trends analyze` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedSales,
    pub snapshot: Snapshot,
}

/// Load the configured CSV and derive its snapshot.
pub fn run_analysis(config: &AnalyzeConfig) -> Result<RunOutput, AppError> {
    let ingest = load_sales(&config.csv_path)?;
    Ok(analyze_ingested(ingest, config))
}

/// Derive the snapshot for records that are already loaded.
pub fn analyze_ingested(ingest: IngestedSales, config: &AnalyzeConfig) -> RunOutput {
    if ingest.records.is_empty() {
        tracing::warn!("no usable sales records; snapshot will be empty");
    }

    let options = EngineOptions {
        parallel: config.parallel,
        chunk_size: config.chunk_size,
    };
    let snapshot = analyze_sales_with(&ingest.records, &options);

    tracing::debug!(
        records = ingest.records.len(),
        parallel = options.parallel,
        trending = snapshot.trending_product.as_ref().map(|t| t.name.as_str()),
        "analysis complete"
    );

    RunOutput { ingest, snapshot }
}
