//! Formatted terminal output for snapshots and the sales table.
//!
//! We keep formatting code in one place so the engine stays free of presentation
//! concerns and output changes stay localized.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{AnalyzeConfig, SaleRecord, Snapshot, SortDirection, SortKey, TableConfig};
use crate::io::ingest::IngestedSales;
use crate::report::products_by_revenue;

/// Rows of the sorted table whose products get the `*` marker.
const HIGHLIGHT_ROWS: usize = 3;

/// Format the full snapshot summary.
pub fn format_snapshot(snapshot: &Snapshot, ingest: &IngestedSales, config: &AnalyzeConfig) -> String {
    let mut out = String::new();

    out.push_str("=== trends - Sales Snapshot ===\n");
    out.push_str(&format!("Source: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: read={} | used={} | filtered={} | errors={}\n",
        ingest.rows_read,
        ingest.records.len(),
        ingest.rows_filtered,
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Products: {} | Periods: {}\n",
        snapshot.totals_by_product.len(),
        snapshot.revenue_series.len()
    ));

    out.push_str("\nQuick alerts:\n");
    if snapshot.quick_alerts.is_empty() {
        out.push_str("  (none)\n");
    }
    for alert in &snapshot.quick_alerts {
        out.push_str(&format!("  - {alert}\n"));
    }

    out.push('\n');
    match &snapshot.trending_product {
        Some(t) => out.push_str(&format!(
            "Trending product: {} | growth {:+}% | qty {}\n",
            t.name,
            t.growth_pct,
            format_quantity(t.total)
        )),
        None => out.push_str("Trending product: no data\n"),
    }
    match &snapshot.peak_month {
        Some(p) => out.push_str(&format!(
            "Peak demand: {} | qty {}\n",
            p.label,
            format_quantity(p.total_qty)
        )),
        None => out.push_str("Peak demand: no data\n"),
    }
    match snapshot.revenue_series.last() {
        Some(last) => {
            let change = match snapshot.revenue_change_pct {
                Some(pct) => format!(" | {pct:+}% MoM"),
                None => String::new(),
            };
            out.push_str(&format!(
                "Latest revenue: {} {}{change}\n",
                last.period,
                format_currency(last.revenue, &config.currency)
            ));
        }
        None => out.push_str("Latest revenue: no data\n"),
    }

    out.push_str("\nProduct totals (by revenue):\n");
    out.push_str(&format_product_totals(snapshot, &config.currency));

    out
}

fn format_product_totals(snapshot: &Snapshot, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<28} {:>12} {:>16}", "product", "qty", "revenue").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<28} {:-<12} {:-<16}", "", "", "").trim_end());
    out.push('\n');

    for (name, totals) in products_by_revenue(snapshot) {
        out.push_str(
            format!(
                "{:<28} {:>12} {:>16}",
                truncate(name, 28),
                format_quantity(totals.quantity),
                format_currency(totals.revenue, currency)
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the sales table, sorted per `config`.
///
/// Rows whose product appears in the first three rows of the sorted table are
/// marked with `*`.
pub fn format_sales_table(records: &[SaleRecord], config: &TableConfig) -> String {
    let sorted = sort_records(records, config.sort_key, config.direction);
    let highlighted: HashSet<&str> = sorted
        .iter()
        .take(HIGHLIGHT_ROWS)
        .map(|r| r.product.as_str())
        .collect();

    let mut out = String::new();
    out.push_str(format!("  {:<20} {:<28} {:>10} {:>14}", "date", "product", "qty", "revenue").trim_end());
    out.push('\n');
    out.push_str(format!("  {:-<20} {:-<28} {:-<10} {:-<14}", "", "", "", "").trim_end());
    out.push('\n');

    let limit = config.limit.unwrap_or(sorted.len());
    for r in sorted.iter().take(limit) {
        let marker = if highlighted.contains(r.product.as_str()) { '*' } else { ' ' };
        out.push_str(
            format!(
                "{marker} {:<20} {:<28} {:>10} {:>14}",
                truncate(&r.date, 20),
                truncate(&r.product, 28),
                format_quantity(r.quantity),
                format_number(r.revenue, 2)
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if limit < sorted.len() {
        out.push_str(&format!("  ... {} more rows\n", sorted.len() - limit));
    }

    out
}

/// Stable ascending sort, reversed for descending order.
pub fn sort_records(records: &[SaleRecord], key: SortKey, direction: SortDirection) -> Vec<&SaleRecord> {
    let mut sorted: Vec<&SaleRecord> = records.iter().collect();
    sorted.sort_by(|a, b| compare_by(a, b, key));
    if direction == SortDirection::Descending {
        sorted.reverse();
    }
    sorted
}

fn compare_by(a: &SaleRecord, b: &SaleRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Product => a.product.cmp(&b.product),
        SortKey::Qty => a.quantity.partial_cmp(&b.quantity).unwrap_or(Ordering::Equal),
        SortKey::Revenue => a.revenue.partial_cmp(&b.revenue).unwrap_or(Ordering::Equal),
    }
}

/// Format a money amount: `$1,234.50` for USD, `1,234.50 CHF` for codes without a symbol.
pub fn format_currency(value: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let symbol = match code.as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let amount = format_number(value.abs(), 2);
    match symbol {
        Some(symbol) => format!("{sign}{symbol}{amount}"),
        None => format!("{sign}{amount} {code}"),
    }
}

/// Quantities print without decimals when integral.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        format_number(value, 2)
    }
}

/// Fixed-decimal number with `,` thousands separators.
fn format_number(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && raw.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
