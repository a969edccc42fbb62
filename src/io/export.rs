use std::io::Write;

use crate::application::AppError;
use crate::domain::{format_dong, SettlementRow, SettlementSheet};

use super::ROW_COLUMNS;

/// Write a sheet document as pretty JSON.
pub fn write_sheet_json<W: Write>(mut writer: W, sheet: &SettlementSheet) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(sheet)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Export rows to CSV using Vietnamese number notation, so the file reads
/// back through `import_rows_csv` unchanged. Row ids are not exported.
pub fn export_rows_csv<W: Write>(writer: W, rows: &[SettlementRow]) -> Result<usize, AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ROW_COLUMNS)?;

    let mut count = 0;
    for row in rows {
        csv_writer.write_record([
            row.mode.as_str().to_string(),
            row.content.clone(),
            decimal_cell(row.length),
            decimal_cell(row.width),
            decimal_cell(row.size),
            decimal_cell(row.quantity),
            format_dong(row.unit_price),
            format_dong(row.manual_total),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    log::debug!("exported {} row(s) to CSV", count);
    Ok(count)
}

// Full precision with `,` as decimal separator: 2.5 -> "2,5"
fn decimal_cell(value: f64) -> String {
    value.to_string().replace('.', ",")
}
