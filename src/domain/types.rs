//! Shared domain types.
//!
//! Inputs (`SaleRecord`) are produced by the CSV record source; outputs
//! (`Snapshot` and its parts) are plain serializable data consumed by the report,
//! the plots and the JSON export.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use super::ledger::Ledger;

/// Bucket used when a record carries no date at all.
pub const UNKNOWN_PERIOD: &str = "Unknown";

/// One observed transaction line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    /// Free-form date text: a timestamp, a `YYYY-MM` string, or a month/year phrase.
    pub date: String,
    pub product: String,
    pub quantity: f64,
    pub revenue: f64,
}

impl SaleRecord {
    pub fn new(date: impl Into<String>, product: impl Into<String>, quantity: f64, revenue: f64) -> Self {
        Self {
            date: date.into(),
            product: product.into(),
            quantity,
            revenue,
        }
    }
}

/// Canonical `YYYY-MM` period key (or a verbatim fallback for unparseable dates).
///
/// Ordering is plain string ordering, which equals chronological ordering for
/// zero-padded keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Running `(quantity, revenue)` sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub quantity: f64,
    pub revenue: f64,
}

impl Totals {
    pub fn add(&mut self, quantity: f64, revenue: f64) {
        self.quantity += quantity;
        self.revenue += revenue;
    }

    pub fn absorb(&mut self, other: Totals) {
        self.add(other.quantity, other.revenue);
    }
}

/// Per-product running totals plus per-period sub-totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTotals {
    pub totals: Totals,
    pub by_period: Ledger<PeriodKey, Totals>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingProduct {
    pub name: String,
    /// Rounded month-over-month quantity growth (0 for the top-by-quantity fallback).
    pub growth_pct: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakPeriod {
    pub label: PeriodKey,
    pub total_qty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub period: PeriodKey,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityPoint {
    pub period: PeriodKey,
    pub quantity: f64,
}

/// Result of one complete pass over a record batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub trending_product: Option<TrendingProduct>,
    pub peak_month: Option<PeakPeriod>,
    /// Ascending by period key.
    pub revenue_series: Vec<RevenuePoint>,
    /// Same periods and order as `revenue_series`.
    pub quantity_series: Vec<QuantityPoint>,
    /// Rounded change between the last two revenue periods, if there are two.
    pub revenue_change_pct: Option<i64>,
    pub quick_alerts: Vec<String>,
    /// Lifetime totals per product, in first-seen order.
    pub totals_by_product: Ledger<String, Totals>,
}

/// Columns the sales table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Product,
    Qty,
    Revenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A full `trends analyze` run's configuration, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub csv_path: PathBuf,
    /// ISO currency code used when formatting revenue.
    pub currency: String,
    pub json: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub export_snapshot: Option<PathBuf>,
    pub export_totals: Option<PathBuf>,
    pub parallel: bool,
    pub chunk_size: usize,
}

/// Configuration for `trends table`.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// Maximum rows printed (`None` prints all).
    pub limit: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Revenue,
            direction: SortDirection::Descending,
            limit: None,
        }
    }
}
