mod common;

use anyhow::Result;
use common::{test_service, StandardRows};
use quyettoan::application::{render_html, render_text, AppError, SheetService};
use quyettoan::domain::{InputMode, Orientation, RowUpdate, SettlementSheet};
use quyettoan::io::{export_rows_csv, import_rows_csv};
use std::fs::File;

#[test]
fn test_create_and_reopen_sheet() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    StandardRows::load_renovation(&mut service)?;
    {
        let sheet = service.sheet_mut();
        sheet.recipient = "Anh Minh".into();
        sheet.advance_amount = 2_000_000;
        sheet.orientation = Orientation::Portrait;
    }
    service.save()?;

    let reopened = SheetService::open(service.path())?;
    let sheet = reopened.sheet();
    assert_eq!(sheet.recipient, "Anh Minh");
    assert_eq!(sheet.orientation, Orientation::Portrait);
    assert_eq!(sheet.formatted_date(), "Ngày 15 tháng 1 năm 2025");
    assert_eq!(sheet.rows().len(), 4);
    assert_eq!(sheet.rows(), service.sheet().rows());
    Ok(())
}

#[test]
fn test_summary_with_and_without_advance() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    StandardRows::load_renovation(&mut service)?;

    let summary = service.summary();
    assert_eq!(summary.row_count, 4);
    assert_eq!(summary.total, StandardRows::RENOVATION_TOTAL);
    assert_eq!(summary.amount_to_read, StandardRows::RENOVATION_TOTAL);
    assert_eq!(
        summary.money_text,
        "Năm triệu sáu trăm mười nghìn đồng chẵn"
    );

    service.sheet_mut().advance_amount = 2_000_000;
    let summary = service.summary();
    assert_eq!(summary.remaining, 3_610_000);
    assert_eq!(summary.amount_to_read, 3_610_000);
    assert_eq!(
        summary.money_text,
        "Ba triệu sáu trăm mười nghìn đồng chẵn"
    );
    Ok(())
}

#[test]
fn test_row_operations_by_position() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    StandardRows::load_renovation(&mut service)?;

    // duplicate "Lắp bồn cầu" (row 3); the copy becomes row 4
    let position = service.duplicate_row(3)?;
    assert_eq!(position, 4);
    assert_eq!(service.sheet().rows()[3].content, "Lắp bồn cầu");
    assert_eq!(service.sheet().rows().len(), 5);

    service.update_row(
        4,
        vec![
            RowUpdate::Content("Lắp lavabo".into()),
            RowUpdate::UnitPrice(250_000),
            RowUpdate::Quantity(1.0),
        ],
    )?;
    assert_eq!(
        service.sheet().total_amount(),
        StandardRows::RENOVATION_TOTAL + 250_000
    );

    let removed = service.remove_row(1)?;
    assert_eq!(removed.content, "Lát gạch nền");
    assert_eq!(service.sheet().rows()[0].content, "Ốp chân tường");

    let added = service.add_row(Default::default());
    assert_eq!(added, 5);
    Ok(())
}

#[test]
fn test_row_position_errors() -> Result<()> {
    let (mut service, _temp) = test_service()?;

    assert!(matches!(
        service.remove_row(1),
        Err(AppError::Sheet(quyettoan::domain::SheetError::LastRow))
    ));
    assert!(matches!(
        service.remove_row(0),
        Err(AppError::RowOutOfRange(0))
    ));
    assert!(matches!(
        service.duplicate_row(2),
        Err(AppError::RowOutOfRange(2))
    ));
    assert!(matches!(
        service.update_row(9, vec![RowUpdate::Mode(InputMode::Manual)]),
        Err(AppError::RowOutOfRange(9))
    ));
    Ok(())
}

#[test]
fn test_create_refuses_existing_file() -> Result<()> {
    let (service, _temp) = test_service()?;
    let result = SheetService::create(service.path(), SettlementSheet::new(), false);
    assert!(matches!(result, Err(AppError::SheetAlreadyExists(_))));

    let replaced = SheetService::create(service.path(), SettlementSheet::new(), true)?;
    assert_eq!(replaced.sheet().rows().len(), 1);
    Ok(())
}

#[test]
fn test_open_missing_and_invalid_files() -> Result<()> {
    let temp = tempfile::TempDir::new()?;

    let missing = temp.path().join("missing.json");
    assert!(matches!(
        SheetService::open(&missing),
        Err(AppError::SheetNotFound(_))
    ));

    let broken = temp.path().join("broken.json");
    std::fs::write(&broken, "{ not json")?;
    assert!(matches!(
        SheetService::open(&broken),
        Err(AppError::InvalidSheet { .. })
    ));
    Ok(())
}

#[test]
fn test_csv_export_import_round_trip() -> Result<()> {
    let (mut service, temp) = test_service()?;
    StandardRows::load_renovation(&mut service)?;
    service.update_row(1, vec![RowUpdate::Length(2.75)])?;

    let csv_path = temp.path().join("rows.csv");
    let count = export_rows_csv(File::create(&csv_path)?, service.sheet().rows())?;
    assert_eq!(count, 4);

    let result = import_rows_csv(File::open(&csv_path)?)?;
    assert!(result.is_clean());
    assert_eq!(result.rows.len(), 4);
    for (imported, original) in result.rows.iter().zip(service.sheet().rows()) {
        assert_ne!(imported.id, original.id);
        assert_eq!(imported.mode, original.mode);
        assert_eq!(imported.content, original.content);
        assert_eq!(imported.length, original.length);
        assert_eq!(imported.subtotal(), original.subtotal());
    }
    Ok(())
}

#[test]
fn test_render_outputs() -> Result<()> {
    let (mut service, _temp) = test_service()?;
    StandardRows::load_renovation(&mut service)?;
    service.sheet_mut().advance_amount = 610_000;
    service.sheet_mut().account_holder = "Nguyễn Văn An".into();

    let text = render_text(service.sheet());
    assert!(text.contains("5.610.000"));
    assert!(text.contains("ĐÃ TẠM ỨNG:"));
    assert!(text.contains("5.000.000"));
    assert!(text.contains("Năm triệu đồng chẵn"));
    assert!(text.contains("NGUYỄN VĂN AN"));
    assert!(text.contains("5 x 4"));

    let html = render_html(service.sheet());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("size: A4 landscape;"));
    assert!(html.contains("Vận chuyển, dọn dẹp"));
    assert!(html.contains("Năm triệu đồng chẵn"));
    Ok(())
}
