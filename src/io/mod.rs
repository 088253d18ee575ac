//! Input/output helpers.
//!
//! - CSV record source (`ingest`)
//! - snapshot exports (JSON/CSV) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
