//! Trending-product and peak-period detection.

use crate::domain::{PeakPeriod, PeriodKey, TrendingProduct};
use crate::engine::totals::GroupedTotals;

/// Growth reported for a product that appears in the last period with no quantity
/// in the one before it.
pub const EMERGENCE_GROWTH_PCT: i64 = 100;

/// Round a percentage half away from zero.
pub fn round_pct(value: f64) -> i64 {
    value.round() as i64
}

/// Rounded quantity growth from `prev` to `last`.
pub fn growth_pct(last: f64, prev: f64) -> i64 {
    if prev == 0.0 {
        return EMERGENCE_GROWTH_PCT;
    }
    round_pct((last - prev) / prev.max(1.0) * 100.0)
}

/// Product with the strongest growth between the last two periods.
///
/// Only products with positive quantity in the last period compete; ties keep the
/// first-seen product. With fewer than two periods, or no competitor, falls back
/// to the product with the highest lifetime quantity (growth 0).
pub fn trending_product(grouped: &GroupedTotals, periods: &[PeriodKey]) -> Option<TrendingProduct> {
    if let [.., prev, last] = periods {
        let mut best: Option<TrendingProduct> = None;

        for (name, product) in grouped.products.iter() {
            let l = product.by_period.get(last).map_or(0.0, |t| t.quantity);
            if l <= 0.0 {
                continue;
            }
            let p = product.by_period.get(prev).map_or(0.0, |t| t.quantity);
            let growth = growth_pct(l, p);

            let replaces = match &best {
                None => true,
                Some(current) => growth > current.growth_pct,
            };
            if replaces {
                best = Some(TrendingProduct {
                    name: name.clone(),
                    growth_pct: growth,
                    total: l,
                });
            }
        }

        if best.is_some() {
            return best;
        }
    }

    top_by_quantity(grouped)
}

fn top_by_quantity(grouped: &GroupedTotals) -> Option<TrendingProduct> {
    let mut top: Option<(&String, f64)> = None;
    for (name, product) in grouped.products.iter() {
        let qty = product.totals.quantity;
        if top.is_none_or(|(_, best)| qty > best) {
            top = Some((name, qty));
        }
    }

    top.map(|(name, total)| TrendingProduct {
        name: name.clone(),
        growth_pct: 0,
        total,
    })
}

/// Period with the highest aggregate quantity; the earliest period wins ties.
pub fn peak_period(grouped: &GroupedTotals, periods: &[PeriodKey]) -> Option<PeakPeriod> {
    let mut peak: Option<PeakPeriod> = None;
    for period in periods {
        let qty = grouped.periods.get(period).map_or(0.0, |t| t.quantity);
        if peak.as_ref().is_none_or(|p| qty > p.total_qty) {
            peak = Some(PeakPeriod {
                label: period.clone(),
                total_qty: qty,
            });
        }
    }
    peak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SaleRecord;

    fn detect(records: &[SaleRecord]) -> (Option<TrendingProduct>, Option<PeakPeriod>) {
        let grouped = GroupedTotals::from_records(records);
        let periods = grouped.sorted_periods();
        (trending_product(&grouped, &periods), peak_period(&grouped, &periods))
    }

    #[test]
    fn growth_rules() {
        assert_eq!(growth_pct(5.0, 0.0), 100);
        assert_eq!(growth_pct(5.0, 10.0), -50);
        assert_eq!(growth_pct(30.0, 10.0), 200);
        // max(1, p) keeps fractional previous quantities from exploding the ratio.
        assert_eq!(growth_pct(2.0, 0.5), 150);
        // Half away from zero.
        assert_eq!(round_pct(12.5), 13);
        assert_eq!(round_pct(-12.5), -13);
    }

    #[test]
    fn emerging_product_beats_declining_one() {
        let (trending, peak) = detect(&[
            SaleRecord::new("2024-01-15", "A", 10.0, 100.0),
            SaleRecord::new("2024-02-15", "A", 5.0, 60.0),
            SaleRecord::new("2024-02-15", "B", 20.0, 300.0),
        ]);
        assert_eq!(
            trending,
            Some(TrendingProduct {
                name: "B".to_string(),
                growth_pct: 100,
                total: 20.0,
            })
        );
        assert_eq!(
            peak,
            Some(PeakPeriod {
                label: PeriodKey::new("2024-02"),
                total_qty: 25.0,
            })
        );
    }

    #[test]
    fn total_is_last_period_quantity_on_growth_path() {
        let (trending, _) = detect(&[
            SaleRecord::new("2024-01-01", "A", 2.0, 0.0),
            SaleRecord::new("2024-02-01", "A", 8.0, 0.0),
            SaleRecord::new("2024-03-01", "A", 4.0, 0.0),
            SaleRecord::new("2024-03-01", "A", 8.0, 0.0),
        ]);
        let trending = trending.unwrap();
        assert_eq!(trending.growth_pct, 50);
        assert_eq!(trending.total, 12.0);
    }

    #[test]
    fn ties_keep_first_seen_product() {
        let (trending, _) = detect(&[
            SaleRecord::new("2024-01-01", "First", 1.0, 0.0),
            SaleRecord::new("2024-01-01", "Second", 2.0, 0.0),
            SaleRecord::new("2024-02-01", "Second", 4.0, 0.0),
            SaleRecord::new("2024-02-01", "First", 2.0, 0.0),
        ]);
        assert_eq!(trending.unwrap().name, "First");
    }

    #[test]
    fn single_period_falls_back_to_top_quantity() {
        let (trending, peak) = detect(&[
            SaleRecord::new("2024-05-01", "A", 3.0, 30.0),
            SaleRecord::new("2024-05-02", "B", 7.0, 10.0),
            SaleRecord::new("2024-05-03", "A", 1.0, 5.0),
        ]);
        assert_eq!(
            trending,
            Some(TrendingProduct {
                name: "B".to_string(),
                growth_pct: 0,
                total: 7.0,
            })
        );
        assert_eq!(peak.unwrap().total_qty, 11.0);
    }

    #[test]
    fn nothing_in_last_period_falls_back_to_lifetime_quantity() {
        let (trending, _) = detect(&[
            SaleRecord::new("2024-01-01", "A", 9.0, 10.0),
            SaleRecord::new("2024-01-01", "B", 4.0, 10.0),
            SaleRecord::new("2024-02-01", "B", 0.0, 50.0),
        ]);
        let trending = trending.unwrap();
        assert_eq!(trending.name, "A");
        assert_eq!(trending.growth_pct, 0);
        assert_eq!(trending.total, 9.0);
    }

    #[test]
    fn fallback_tie_keeps_first_seen() {
        let (trending, _) = detect(&[
            SaleRecord::new("2024-01-01", "A", 5.0, 0.0),
            SaleRecord::new("2024-01-01", "B", 5.0, 0.0),
        ]);
        assert_eq!(trending.unwrap().name, "A");
    }

    #[test]
    fn peak_tie_prefers_earliest_period() {
        let (_, peak) = detect(&[
            SaleRecord::new("2024-03-01", "A", 5.0, 0.0),
            SaleRecord::new("2024-01-01", "A", 5.0, 0.0),
            SaleRecord::new("2024-02-01", "A", 2.0, 0.0),
        ]);
        assert_eq!(peak.unwrap().label, PeriodKey::new("2024-01"));
    }

    #[test]
    fn empty_input_has_no_signals() {
        let (trending, peak) = detect(&[]);
        assert!(trending.is_none());
        assert!(peak.is_none());
    }
}
