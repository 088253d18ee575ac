//! Period-key normalization: free-form date text → `YYYY-MM`.
//!
//! Resolution order:
//! 1. empty text → `Unknown`
//! 2. a full calendar date/time (fixed to UTC) or a month/year phrase, with a four-digit
//!    year → its year and month
//! 3. an embedded `YYYY[-/ ]M` or `YYYY[-/ ]MM` pattern → that year and month
//! 4. anything else is kept verbatim and becomes its own bucket

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::domain::{PeriodKey, UNKNOWN_PERIOD};

static YEAR_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})[-/ ]?([0-9]{1,2})").expect("year-month pattern is valid")
});

/// Timestamps carrying a `+hhmm`/`+hh:mm` offset that RFC 3339 rejects.
const OFFSET_DATETIME_FMTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const DATETIME_FMTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FMTS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Month/year phrases ("May 2024", "05/2024") have no day; they are parsed as the 1st
/// with the day prepended.
const MONTH_YEAR_FMTS: [&str; 3] = ["%d %B %Y", "%d %b %Y", "%d %m %Y"];

/// Year-first phrases ("2024 March") with the day appended.
const YEAR_MONTH_FMTS: [&str; 2] = ["%Y %B %d", "%Y %b %d"];

/// chrono's `%Y` also takes short and signed years; anything outside this is not a date.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=9999;

/// Normalize a record's date text into its period key.
pub fn period_key(input: &str) -> PeriodKey {
    if input.is_empty() {
        return PeriodKey::new(UNKNOWN_PERIOD);
    }

    if let Some(date) = parse_calendar_date(input.trim()) {
        return month_key(date.year(), date.month());
    }

    if let Some(caps) = YEAR_MONTH.captures(input) {
        let year = &caps[1];
        if let Ok(month) = caps[2].parse::<u32>() {
            return PeriodKey::new(format!("{year}-{month:02}"));
        }
    }

    PeriodKey::new(input)
}

fn month_key(year: i32, month: u32) -> PeriodKey {
    PeriodKey::new(format!("{year:04}-{month:02}"))
}

/// Parse a complete calendar date, converting offset-carrying timestamps to UTC.
fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    let zoned = [DateTime::parse_from_rfc3339(s), DateTime::parse_from_rfc2822(s)]
        .into_iter()
        .chain(OFFSET_DATETIME_FMTS.iter().map(|fmt| DateTime::parse_from_str(s, fmt)))
        .filter_map(Result::ok)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .find(in_year_range);
    if zoned.is_some() {
        return zoned;
    }

    // Naive timestamps are taken as UTC already.
    let naive = DATETIME_FMTS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .find(in_year_range);
    if naive.is_some() {
        return naive;
    }

    // Before the day formats: "%b %d %Y" would otherwise read "May 2024" as May 20, year 24.
    parse_month_year(s).or_else(|| {
        DATE_FMTS
            .iter()
            .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .find(in_year_range)
    })
}

fn in_year_range(date: &NaiveDate) -> bool {
    YEAR_RANGE.contains(&date.year())
}

fn parse_month_year(s: &str) -> Option<NaiveDate> {
    let words = s
        .replace([',', '-', '/'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let day_first = format!("1 {words}");
    let day_last = format!("{words} 1");
    MONTH_YEAR_FMTS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&day_first, fmt).ok())
        .chain(
            YEAR_MONTH_FMTS
                .iter()
                .filter_map(|fmt| NaiveDate::parse_from_str(&day_last, fmt).ok()),
        )
        .find(in_year_range)
}
