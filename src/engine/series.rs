//! Time-ordered series built from per-period totals.
//!
//! Periods are ordered by plain string comparison. Zero-padded `YYYY-MM` keys sort
//! chronologically; fallback keys (`Unknown`, verbatim text) sort lexicographically
//! among them.

use crate::domain::{PeriodKey, QuantityPoint, RevenuePoint};
use crate::engine::totals::GroupedTotals;

pub fn revenue_series(grouped: &GroupedTotals, periods: &[PeriodKey]) -> Vec<RevenuePoint> {
    periods
        .iter()
        .map(|period| RevenuePoint {
            period: period.clone(),
            revenue: grouped.periods.get(period).map_or(0.0, |t| t.revenue),
        })
        .collect()
}

pub fn quantity_series(grouped: &GroupedTotals, periods: &[PeriodKey]) -> Vec<QuantityPoint> {
    periods
        .iter()
        .map(|period| QuantityPoint {
            period: period.clone(),
            quantity: grouped.periods.get(period).map_or(0.0, |t| t.quantity),
        })
        .collect()
}
