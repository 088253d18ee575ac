//! Snapshot exports.
//!
//! - full snapshot as pretty JSON (for dashboards / downstream scripts)
//! - per-product lifetime totals as CSV (for spreadsheets)

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::Snapshot;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct TotalsRow<'a> {
    product: &'a str,
    quantity: f64,
    revenue: f64,
}

/// Write the snapshot as pretty-printed JSON.
pub fn write_snapshot_json(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create snapshot JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::io(format!("Failed to write snapshot JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote snapshot JSON");
    Ok(())
}

/// Write per-product lifetime totals (first-seen order) as CSV.
pub fn write_totals_csv(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create totals CSV '{}': {e}", path.display())))?;

    for (product, totals) in snapshot.totals_by_product.iter() {
        writer
            .serialize(TotalsRow {
                product,
                quantity: totals.quantity,
                revenue: totals.revenue,
            })
            .map_err(|e| AppError::io(format!("Failed to write totals CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush totals CSV: {e}")))?;

    tracing::info!(
        path = %path.display(),
        products = snapshot.totals_by_product.len(),
        "wrote totals CSV"
    );
    Ok(())
}
