//! CSV record source.
//!
//! Turns a heterogeneous sales export into validated `SaleRecord`s for the engine.
//!
//! - Column names are matched case-insensitively against a list of aliases per field.
//! - Numeric cells that don't parse coerce to `0` (and are counted).
//! - Rows with no product, or a negative quantity, are reported and skipped.
//! - Rows where quantity and revenue are both zero carry no signal and are filtered.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::SaleRecord;
use crate::error::AppError;

const DATE_COLUMNS: [&str; 4] = ["date", "order_date", "orderdate", "month"];
const PRODUCT_COLUMNS: [&str; 3] = ["product", "item", "sku"];
const QUANTITY_COLUMNS: [&str; 3] = ["qty", "quantity", "units"];
const REVENUE_COLUMNS: [&str; 4] = ["revenue", "sales", "amount", "total"];

/// Product name used when the source has no product column at all.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: records plus bookkeeping about what was dropped.
#[derive(Debug, Clone, Default)]
pub struct IngestedSales {
    pub records: Vec<SaleRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Rows skipped because quantity and revenue were both zero.
    pub rows_filtered: usize,
    /// Numeric cells that failed to parse and were read as zero.
    pub coerced_cells: usize,
}

/// Resolved column positions for the four record fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: Option<usize>,
    product: Option<usize>,
    quantity: Option<usize>,
    revenue: Option<usize>,
}

/// Load sale records from a CSV file.
pub fn load_sales(path: &Path) -> Result<IngestedSales, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = read_sales(file)?;

    tracing::info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        records = ingested.records.len(),
        rows_filtered = ingested.rows_filtered,
        row_errors = ingested.row_errors.len(),
        "loaded sales CSV"
    );
    Ok(ingested)
}

/// Read sale records from any CSV source with a header row.
pub fn read_sales<R: Read>(source: R) -> Result<IngestedSales, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&build_header_map(&headers));

    if columns.product.is_none() {
        tracing::warn!("no product column found; every row is attributed to `{UNKNOWN_PRODUCT}`");
    }

    let mut out = IngestedSales::default();

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, columns, &mut out.coerced_cells) {
            Ok(Some(sale)) => out.records.push(sale),
            Ok(None) => out.rows_filtered += 1,
            Err(message) => out.row_errors.push(RowError { line, message }),
        }
    }

    for err in &out.row_errors {
        tracing::warn!(line = err.line, "skipped row: {}", err.message);
    }

    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // Keep the first occurrence of a duplicated header.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Columns {
    Columns {
        date: find_column(header_map, &DATE_COLUMNS),
        product: find_column(header_map, &PRODUCT_COLUMNS),
        quantity: find_column(header_map, &QUANTITY_COLUMNS),
        revenue: find_column(header_map, &REVENUE_COLUMNS),
    }
}

/// First alias present in the header wins.
fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| header_map.get(*alias).copied())
}

fn parse_row(record: &StringRecord, columns: Columns, coerced: &mut usize) -> Result<Option<SaleRecord>, String> {
    let date = get_cell(record, columns.date).unwrap_or_default().to_string();

    let product = match columns.product {
        None => UNKNOWN_PRODUCT.to_string(),
        Some(idx) => get_cell(record, Some(idx))
            .ok_or_else(|| "Missing product name.".to_string())?
            .to_string(),
    };

    let quantity = parse_number(get_cell(record, columns.quantity), coerced);
    let revenue = parse_number(get_cell(record, columns.revenue), coerced);

    if quantity < 0.0 {
        return Err(format!("Negative quantity ({quantity}) for product '{product}'."));
    }
    if quantity == 0.0 && revenue == 0.0 {
        return Ok(None);
    }

    Ok(Some(SaleRecord {
        date,
        product,
        quantity,
        revenue,
    }))
}

fn get_cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    record.get(idx?).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a numeric cell; blanks are zero, garbage is zero and counted.
fn parse_number(cell: Option<&str>, coerced: &mut usize) -> f64 {
    let Some(s) = cell else { return 0.0 };
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            *coerced += 1;
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest(csv: &str) -> IngestedSales {
        read_sales(csv.as_bytes()).unwrap()
    }

    #[test]
    fn reads_canonical_columns() {
        let data = ingest("date,product,qty,revenue\n2024-01-15,A,10,100\n2024-02-15,B,20,300.5\n");
        assert_eq!(data.rows_read, 2);
        assert_eq!(
            data.records,
            vec![
                SaleRecord::new("2024-01-15", "A", 10.0, 100.0),
                SaleRecord::new("2024-02-15", "B", 20.0, 300.5),
            ]
        );
        assert!(data.row_errors.is_empty());
    }

    #[test]
    fn resolves_aliases_case_insensitively_with_bom() {
        let data = ingest("\u{feff}OrderDate,SKU,Units,Sales\nMay 2024,X-1,3,45\n");
        assert_eq!(data.records, vec![SaleRecord::new("May 2024", "X-1", 3.0, 45.0)]);
    }

    #[test]
    fn missing_columns_use_defaults() {
        let data = ingest("amount\n12.5\n");
        assert_eq!(data.records, vec![SaleRecord::new("", "Unknown", 0.0, 12.5)]);
    }

    #[test]
    fn filters_zero_rows_and_reports_bad_ones() {
        let data = ingest(
            "date,product,qty,revenue\n\
             2024-01-01,A,0,0\n\
             2024-01-02,,5,10\n\
             2024-01-03,B,-2,10\n\
             2024-01-04,C,abc,7\n",
        );
        assert_eq!(data.rows_read, 4);
        assert_eq!(data.rows_filtered, 1);
        assert_eq!(data.coerced_cells, 1);
        assert_eq!(data.records, vec![SaleRecord::new("2024-01-04", "C", 0.0, 7.0)]);

        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_sales(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
    }
}
