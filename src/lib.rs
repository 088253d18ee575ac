//! `sales-trends` library crate.
//!
//! The binary (`trends`) is a thin wrapper around this library so that:
//!
//! - the aggregation engine is testable without spawning processes
//! - the engine can be reused by other front-ends (dashboards, services)
//!
//! Entry point for library users: [`engine::analyze_sales`].

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;

pub use domain::{SaleRecord, Snapshot};
pub use engine::{analyze_sales, analyze_sales_with};
