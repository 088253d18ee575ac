//! Reporting utilities: product rankings and formatted terminal output.

pub mod format;

pub use format::*;

use std::cmp::Ordering;

use crate::domain::{Snapshot, Totals};

/// Products ordered by lifetime revenue, highest first (first-seen order on ties).
pub fn products_by_revenue(snapshot: &Snapshot) -> Vec<(&str, Totals)> {
    let mut ranked: Vec<(&str, Totals)> = snapshot
        .totals_by_product
        .iter()
        .map(|(name, totals)| (name.as_str(), *totals))
        .collect();
    ranked.sort_by(|a, b| b.1.revenue.partial_cmp(&a.1.revenue).unwrap_or(Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SaleRecord;
    use crate::engine::analyze_sales;

    #[test]
    fn ranks_by_revenue_with_stable_ties() {
        let snapshot = analyze_sales(&[
            SaleRecord::new("2024-01-01", "Low", 1.0, 10.0),
            SaleRecord::new("2024-01-01", "TieA", 1.0, 50.0),
            SaleRecord::new("2024-01-01", "High", 1.0, 90.0),
            SaleRecord::new("2024-01-01", "TieB", 1.0, 50.0),
        ]);
        let names: Vec<&str> = products_by_revenue(&snapshot).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["High", "TieA", "TieB", "Low"]);
    }
}
