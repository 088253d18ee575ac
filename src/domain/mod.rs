//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input records (`SaleRecord`) and the canonical period key (`PeriodKey`)
//! - aggregation buckets (`Totals`, `ProductTotals`, `Ledger`)
//! - engine outputs (`Snapshot`, `TrendingProduct`, `PeakPeriod`, series points)
//! - run configuration (`AnalyzeConfig`, `TableConfig`)

pub mod ledger;
pub mod types;

pub use ledger::Ledger;
pub use types::*;
