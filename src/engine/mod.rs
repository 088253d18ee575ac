//! Aggregation engine: sale records → `Snapshot`.
//!
//! The engine is a pure, synchronous transformation with no error path. Every
//! "not enough data" case degrades into an absent optional field or an empty
//! sequence.
//!
//! Stages:
//! - `period`  — date text → period key
//! - `totals`  — per-product / per-period grouping (the only partitionable stage)
//! - `series`  — time-ordered revenue and quantity series
//! - `detect`  — trending product and peak period
//! - `alerts`  — quick alert strings

pub mod alerts;
pub mod detect;
pub mod period;
pub mod series;
pub mod totals;

pub use period::period_key;
pub use totals::GroupedTotals;

use crate::domain::{SaleRecord, Snapshot};

/// Default records per chunk for the parallel grouping pass.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Build grouped totals with the chunked parallel pass.
    pub parallel: bool,
    pub chunk_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Analyze a record batch with default options (sequential grouping).
pub fn analyze_sales(records: &[SaleRecord]) -> Snapshot {
    analyze_sales_with(records, &EngineOptions::default())
}

pub fn analyze_sales_with(records: &[SaleRecord], options: &EngineOptions) -> Snapshot {
    let grouped = if options.parallel {
        GroupedTotals::from_records_parallel(records, options.chunk_size)
    } else {
        GroupedTotals::from_records(records)
    };
    snapshot_from_totals(&grouped)
}

/// Derive every snapshot field from complete grouped totals.
pub fn snapshot_from_totals(grouped: &GroupedTotals) -> Snapshot {
    let periods = grouped.sorted_periods();

    let revenue_series = series::revenue_series(grouped, &periods);
    let quantity_series = series::quantity_series(grouped, &periods);
    let trending_product = detect::trending_product(grouped, &periods);
    let peak_month = detect::peak_period(grouped, &periods);
    let revenue_change_pct = alerts::revenue_change_pct(&revenue_series);
    let quick_alerts = alerts::quick_alerts(
        trending_product.as_ref(),
        peak_month.as_ref(),
        revenue_change_pct,
    );

    tracing::debug!(
        products = grouped.products.len(),
        periods = periods.len(),
        alerts = quick_alerts.len(),
        "snapshot derived"
    );

    Snapshot {
        trending_product,
        peak_month,
        revenue_series,
        quantity_series,
        revenue_change_pct,
        quick_alerts,
        totals_by_product: grouped.product_totals(),
    }
}
