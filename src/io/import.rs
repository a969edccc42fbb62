use std::io::Read;

use crate::application::AppError;
use crate::domain::{
    accepts_numeric_input, parse_dong, parse_vnd, Dong, InputMode, SettlementRow, SettlementSheet,
};

/// Result of a rows import: the rows that parsed and one entry per rejected line.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub rows: Vec<SettlementRow>,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl ImportResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read a sheet document. A document without rows gets one blank row.
pub fn read_sheet_json<R: Read>(reader: R) -> Result<SettlementSheet, AppError> {
    let mut sheet: SettlementSheet = serde_json::from_reader(reader)?;
    sheet.ensure_row();
    Ok(sheet)
}

/// Import rows from CSV. Columns are matched by header name (see
/// `ROW_COLUMNS`), missing columns take the default of a new row, and
/// numeric cells are read in Vietnamese notation ("1.250.000", "2,5").
/// Bad lines are reported in `errors` and skipped.
pub fn import_rows_csv<R: Read>(reader: R) -> Result<ImportResult, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let columns = Columns {
        mode: column("mode"),
        content: column("content"),
        length: column("length"),
        width: column("width"),
        size: column("size"),
        quantity: column("quantity"),
        unit_price: column("unit_price"),
        manual_total: column("manual_total"),
    };

    let mut result = ImportResult::default();
    for (line_num, record) in csv_reader.records().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                result.errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok(row) => result.rows.push(row),
            Err((field, error)) => {
                log::warn!("skipping CSV line {}: {} ({})", line, error, field);
                result.errors.push(ImportError {
                    line,
                    field: Some(field.to_string()),
                    error,
                });
            }
        }
    }

    log::debug!(
        "imported {} row(s), {} rejected",
        result.rows.len(),
        result.errors.len()
    );
    Ok(result)
}

struct Columns {
    mode: Option<usize>,
    content: Option<usize>,
    length: Option<usize>,
    width: Option<usize>,
    size: Option<usize>,
    quantity: Option<usize>,
    unit_price: Option<usize>,
    manual_total: Option<usize>,
}

type FieldError = (&'static str, String);

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<SettlementRow, FieldError> {
    let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

    let mode = match cell(columns.mode) {
        "" => InputMode::default(),
        s => InputMode::from_str(s).ok_or(("mode", format!("unknown input mode '{}'", s)))?,
    };

    let mut row = SettlementRow::new(mode).with_content(cell(columns.content));
    if let Some(length) = measure(cell(columns.length), "length")? {
        row.length = length;
    }
    if let Some(width) = measure(cell(columns.width), "width")? {
        row.width = width;
    }
    if let Some(size) = measure(cell(columns.size), "size")? {
        row.size = size;
    }
    if let Some(quantity) = measure(cell(columns.quantity), "quantity")? {
        row.quantity = quantity;
    }
    if let Some(price) = amount(cell(columns.unit_price), "unit_price")? {
        row.unit_price = price;
    }
    if let Some(total) = amount(cell(columns.manual_total), "manual_total")? {
        row.manual_total = total;
    }
    Ok(row)
}

fn measure(cell: &str, field: &'static str) -> Result<Option<f64>, FieldError> {
    check_numeric(cell, field).map(|present| present.then(|| parse_vnd(cell)))
}

fn amount(cell: &str, field: &'static str) -> Result<Option<Dong>, FieldError> {
    check_numeric(cell, field).map(|present| present.then(|| parse_dong(cell)))
}

/// Ok(false) for an empty cell, Ok(true) for a number, Err otherwise.
fn check_numeric(cell: &str, field: &'static str) -> Result<bool, FieldError> {
    if cell.is_empty() {
        return Ok(false);
    }
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    if !accepts_numeric_input(digits) || !digits.bytes().any(|b| b.is_ascii_digit()) {
        return Err((field, format!("not a number: '{}'", cell)));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_vietnamese_numbers() {
        let input = "mode,content,length,width,size,quantity,unit_price,manual_total\n\
                     dim_qty,Lát gạch,\"2,5\",4,,2,\"150.000\",\n\
                     manual,Vận chuyển,,,,,,\"1.200.000\"\n";
        let result = import_rows_csv(input.as_bytes()).unwrap();
        assert!(result.is_clean(), "{:?}", result.errors);
        assert_eq!(result.rows.len(), 2);

        let tiles = &result.rows[0];
        assert_eq!(tiles.mode, InputMode::DimQty);
        assert_eq!(tiles.content, "Lát gạch");
        assert_eq!(tiles.length, 2.5);
        assert_eq!(tiles.quantity, 2.0);
        assert_eq!(tiles.unit_price, 150_000);
        assert_eq!(tiles.subtotal(), 3_000_000.0);

        let transport = &result.rows[1];
        assert_eq!(transport.mode, InputMode::Manual);
        assert_eq!(transport.quantity, 1.0);
        assert_eq!(transport.manual_total, 1_200_000);
    }

    #[test]
    fn test_bad_lines_are_reported_and_skipped() {
        let input = "mode,content,quantity,unit_price\n\
                     direct,Ok,2,1000\n\
                     bogus,Bad mode,1,1\n\
                     direct,Bad price,1,abc\n";
        let result = import_rows_csv(input.as_bytes()).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].line, 3);
        assert_eq!(result.errors[0].field.as_deref(), Some("mode"));
        assert_eq!(result.errors[1].line, 4);
        assert_eq!(result.errors[1].field.as_deref(), Some("unit_price"));
    }

    #[test]
    fn test_missing_columns_use_row_defaults() {
        let input = "content,unit_price\nChỉ có giá,5000\n";
        let result = import_rows_csv(input.as_bytes()).unwrap();
        let row = &result.rows[0];
        assert_eq!(row.mode, InputMode::DimQty);
        assert_eq!(row.quantity, 1.0);
        assert_eq!(row.unit_price, 5000);
    }

    #[test]
    fn test_read_sheet_json_without_rows() {
        let sheet = read_sheet_json(r#"{"title":"T","rows":[]}"#.as_bytes()).unwrap();
        assert_eq!(sheet.title, "T");
        assert_eq!(sheet.rows().len(), 1);
    }
}
