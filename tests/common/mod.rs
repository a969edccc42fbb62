// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use quyettoan::application::SheetService;
use quyettoan::domain::{InputMode, SettlementRow, SettlementSheet};
use tempfile::TempDir;

/// Helper to create a service over a fresh sheet file in a temporary directory
pub fn test_service() -> Result<(SheetService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("sheet.json");
    let sheet = SettlementSheet::new().with_date(Some(date("2025-01-15")));
    let service = SheetService::create(&path, sheet, false)?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: rows of a small renovation job, one per input mode
pub struct StandardRows;

impl StandardRows {
    /// 3.600.000 + 810.000 + 700.000 + 500.000 = 5.610.000 đồng
    pub fn renovation() -> Vec<SettlementRow> {
        vec![
            SettlementRow::new(InputMode::DimQty)
                .with_content("Lát gạch nền")
                .with_dimensions(5.0, 4.0)
                .with_unit_price(180_000),
            SettlementRow::new(InputMode::SizeQty)
                .with_content("Ốp chân tường")
                .with_size(18.0)
                .with_unit_price(45_000),
            SettlementRow::new(InputMode::Direct)
                .with_content("Lắp bồn cầu")
                .with_quantity(2.0)
                .with_unit_price(350_000),
            SettlementRow::new(InputMode::Manual)
                .with_content("Vận chuyển, dọn dẹp")
                .with_manual_total(500_000),
        ]
    }

    pub const RENOVATION_TOTAL: i64 = 5_610_000;

    /// Service whose sheet holds the renovation rows (saved to disk)
    pub fn load_renovation(service: &mut SheetService) -> Result<()> {
        service.replace_rows(Self::renovation());
        service.save()?;
        Ok(())
    }
}
