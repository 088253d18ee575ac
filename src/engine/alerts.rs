//! Quick alert strings derived from the snapshot signals.

use crate::domain::{PeakPeriod, RevenuePoint, TrendingProduct};
use crate::engine::detect::round_pct;

/// Rounded revenue change between the last two points of the series.
pub fn revenue_change_pct(series: &[RevenuePoint]) -> Option<i64> {
    let [.., prev, last] = series else {
        return None;
    };
    let diff = last.revenue - prev.revenue;
    Some(round_pct(diff / prev.revenue.max(1.0) * 100.0))
}

/// Up to three alerts, always in the order: trending, peak, revenue MoM.
pub fn quick_alerts(
    trending: Option<&TrendingProduct>,
    peak: Option<&PeakPeriod>,
    revenue_change: Option<i64>,
) -> Vec<String> {
    let mut alerts = Vec::with_capacity(3);

    if let Some(t) = trending {
        alerts.push(format!("{} sales spiked {}%", t.name, t.growth_pct));
    }
    if let Some(p) = peak {
        alerts.push(format!("Highest demand: {}", p.label));
    }
    if let Some(pct) = revenue_change {
        let direction = if pct >= 0 { "up" } else { "down" };
        alerts.push(format!("Revenue {direction} {}% MoM", pct.abs()));
    }

    alerts
}
