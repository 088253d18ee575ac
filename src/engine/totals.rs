//! Grouping & totals: one pass over the records into per-product and per-period buckets.

use rayon::prelude::*;

use crate::domain::{Ledger, PeriodKey, ProductTotals, SaleRecord, Totals};
use crate::engine::period::period_key;

/// Per-product and per-period running totals for a record batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedTotals {
    pub products: Ledger<String, ProductTotals>,
    pub periods: Ledger<PeriodKey, Totals>,
}

impl GroupedTotals {
    /// Sequential single pass.
    pub fn from_records(records: &[SaleRecord]) -> Self {
        let mut grouped = Self::default();
        for record in records {
            grouped.push(record);
        }
        grouped
    }

    /// Chunked map-reduce pass.
    ///
    /// Partial totals are built per fixed-size chunk in parallel, then merged left to
    /// right in chunk order. The partition depends only on `chunk_size`, so the result
    /// (including float summation order and bucket insertion order) is the same on
    /// every run regardless of thread count.
    pub fn from_records_parallel(records: &[SaleRecord], chunk_size: usize) -> Self {
        let partials: Vec<GroupedTotals> = records
            .par_chunks(chunk_size.max(1))
            .map(Self::from_records)
            .collect();

        let mut merged = Self::default();
        for partial in partials {
            merged.merge(partial);
        }
        merged
    }

    /// Add one record to its product bucket and its period bucket.
    pub fn push(&mut self, record: &SaleRecord) {
        let period = period_key(&record.date);

        let product = self.products.entry_or_default(record.product.as_str());
        product.totals.add(record.quantity, record.revenue);
        product
            .by_period
            .entry_or_default(&period)
            .add(record.quantity, record.revenue);

        self.periods
            .entry_or_default(&period)
            .add(record.quantity, record.revenue);
    }

    /// Fold another partial result into this one.
    pub fn merge(&mut self, other: GroupedTotals) {
        self.products.merge_with(other.products, |acc, product| {
            acc.totals.absorb(product.totals);
            acc.by_period.merge_with(product.by_period, Totals::absorb);
        });
        self.periods.merge_with(other.periods, Totals::absorb);
    }

    /// Period keys in ascending string order.
    pub fn sorted_periods(&self) -> Vec<PeriodKey> {
        let mut periods: Vec<PeriodKey> = self.periods.keys().cloned().collect();
        periods.sort();
        periods
    }

    /// Lifetime `(quantity, revenue)` per product, in first-seen order.
    pub fn product_totals(&self) -> Ledger<String, Totals> {
        let mut out = Ledger::new();
        for (name, product) in self.products.iter() {
            *out.entry_or_default(name.as_str()) = product.totals;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SaleRecord> {
        vec![
            SaleRecord::new("2024-01-15", "A", 10.0, 100.0),
            SaleRecord::new("2024-02-15", "A", 5.0, 60.0),
            SaleRecord::new("2024-02-15", "B", 20.0, 300.0),
        ]
    }

    #[test]
    fn groups_by_product_and_period() {
        let grouped = GroupedTotals::from_records(&sample());

        let a = grouped.products.get("A").unwrap();
        assert_eq!(a.totals, Totals { quantity: 15.0, revenue: 160.0 });
        assert_eq!(
            a.by_period.get(&PeriodKey::new("2024-01")),
            Some(&Totals { quantity: 10.0, revenue: 100.0 })
        );

        let feb = grouped.periods.get(&PeriodKey::new("2024-02")).unwrap();
        assert_eq!(*feb, Totals { quantity: 25.0, revenue: 360.0 });
        assert_eq!(
            grouped.sorted_periods(),
            vec![PeriodKey::new("2024-01"), PeriodKey::new("2024-02")]
        );
    }

    #[test]
    fn zero_records_still_create_buckets() {
        let grouped = GroupedTotals::from_records(&[SaleRecord::new("2024-03-01", "Z", 0.0, 0.0)]);
        assert_eq!(grouped.products.get("Z").unwrap().totals, Totals::default());
        assert_eq!(grouped.periods.len(), 1);
    }

    #[test]
    fn unparseable_dates_form_their_own_bucket() {
        let grouped = GroupedTotals::from_records(&[
            SaleRecord::new("", "A", 1.0, 1.0),
            SaleRecord::new("banana", "A", 2.0, 2.0),
        ]);
        assert_eq!(
            grouped.sorted_periods(),
            vec![PeriodKey::new("Unknown"), PeriodKey::new("banana")]
        );
    }

    #[test]
    fn parallel_pass_matches_sequential_on_integral_values() {
        let records: Vec<SaleRecord> = (0..500)
            .map(|i| {
                SaleRecord::new(
                    format!("2024-{:02}-01", i % 12 + 1),
                    format!("P{}", i % 7),
                    (i % 5) as f64,
                    (i * 3) as f64,
                )
            })
            .collect();

        let sequential = GroupedTotals::from_records(&records);
        let parallel = GroupedTotals::from_records_parallel(&records, 64);
        assert_eq!(sequential, parallel);
    }
}
