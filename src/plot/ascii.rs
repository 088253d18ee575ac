//! ASCII bar charts for terminal output.
//!
//! Fixed-width and deterministic (helpful for golden tests). One row per period:
//! bars scale to the largest positive value, the highlighted row (the peak) is
//! drawn with `#` instead of `=`, and non-positive values get an empty bar.

use crate::domain::Snapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text printed after the bar (already formatted by the caller).
    pub value_label: String,
    pub highlight: bool,
}

/// Quantity per period, peak period highlighted.
pub fn render_demand_chart(snapshot: &Snapshot, width: usize) -> String {
    let peak = snapshot.peak_month.as_ref().map(|p| &p.label);
    let bars: Vec<Bar> = snapshot
        .quantity_series
        .iter()
        .map(|p| Bar {
            label: p.period.to_string(),
            value: p.quantity,
            value_label: crate::report::format_quantity(p.quantity),
            highlight: Some(&p.period) == peak,
        })
        .collect();
    render_bar_chart("Demand by period", &bars, width)
}

/// Revenue per period, most recent period highlighted.
pub fn render_revenue_chart(snapshot: &Snapshot, currency: &str, width: usize) -> String {
    let last = snapshot.revenue_series.len().checked_sub(1);
    let bars: Vec<Bar> = snapshot
        .revenue_series
        .iter()
        .enumerate()
        .map(|(i, p)| Bar {
            label: p.period.to_string(),
            value: p.revenue,
            value_label: crate::report::format_currency(p.revenue, currency),
            highlight: Some(i) == last,
        })
        .collect();
    render_bar_chart("Revenue by period", &bars, width)
}

pub fn render_bar_chart(title: &str, bars: &[Bar], width: usize) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    if bars.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let width = width.max(1);
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max_value = bars
        .iter()
        .map(|b| b.value)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);

    for bar in bars {
        let len = bar_len(bar.value, max_value, width);
        let fill = if bar.highlight { '#' } else { '=' };
        let drawn: String = std::iter::repeat_n(fill, len).collect();
        let line = format!(
            "{:<label_width$} | {:<width$} {}",
            bar.label, drawn, bar.value_label
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn bar_len(value: f64, max_value: f64, width: usize) -> usize {
    if !(value.is_finite() && value > 0.0 && max_value > 0.0) {
        return 0;
    }
    let u = (value / max_value).clamp(0.0, 1.0);
    (u * width as f64).round() as usize
}
