use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::domain::{Dong, RowId, RowUpdate, SettlementRow, SettlementSheet};
use crate::io::{read_sheet_json, write_sheet_json};

use super::AppError;

/// Application service for one settlement sheet document on disk.
/// This is the primary interface for any client (CLI, TUI, etc.).
/// Rows are addressed by their printed position (STT, starting at 1).
pub struct SheetService {
    path: PathBuf,
    sheet: SettlementSheet,
}

/// Totals as printed at the bottom of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub row_count: usize,
    pub total: Dong,
    pub advance: Dong,
    pub remaining: Dong,
    pub amount_to_read: Dong,
    pub money_text: String,
}

impl SheetService {
    /// Write a new sheet document to `path`. Refuses to replace an existing
    /// file unless `overwrite` is set.
    pub fn create(
        path: impl AsRef<Path>,
        sheet: SettlementSheet,
        overwrite: bool,
    ) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if path.exists() && !overwrite {
            return Err(AppError::SheetAlreadyExists(path.display().to_string()));
        }
        let service = Self { path, sheet };
        service.save()?;
        Ok(service)
    }

    /// Open an existing sheet document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(AppError::SheetNotFound(path.display().to_string()));
        }
        let file = File::open(&path)?;
        let sheet = read_sheet_json(BufReader::new(file)).map_err(|e| match e {
            AppError::Json(err) => AppError::InvalidSheet {
                path: path.display().to_string(),
                reason: err.to_string(),
            },
            other => other,
        })?;
        log::debug!(
            "opened sheet {} ({} row(s))",
            path.display(),
            sheet.rows().len()
        );
        Ok(Self { path, sheet })
    }

    pub fn save(&self) -> Result<(), AppError> {
        let file = File::create(&self.path)?;
        write_sheet_json(file, &self.sheet)?;
        log::debug!("saved sheet {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet(&self) -> &SettlementSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut SettlementSheet {
        &mut self.sheet
    }

    // ========================
    // Row operations
    // ========================

    /// Append a row, returning its printed position.
    pub fn add_row(&mut self, row: SettlementRow) -> usize {
        self.sheet.push_row(row);
        self.sheet.rows().len()
    }

    pub fn remove_row(&mut self, position: usize) -> Result<SettlementRow, AppError> {
        let id = self.row_id_at(position)?;
        Ok(self.sheet.remove_row(id)?)
    }

    /// Duplicate the row at `position`; the copy lands at `position + 1`.
    pub fn duplicate_row(&mut self, position: usize) -> Result<usize, AppError> {
        self.row_id_at(position)?;
        self.sheet.duplicate_row(position - 1)?;
        Ok(position + 1)
    }

    pub fn update_row(&mut self, position: usize, updates: Vec<RowUpdate>) -> Result<(), AppError> {
        let id = self.row_id_at(position)?;
        for update in updates {
            self.sheet.update_row(id, update)?;
        }
        Ok(())
    }

    /// Replace every row (e.g. from a CSV import).
    pub fn replace_rows(&mut self, rows: Vec<SettlementRow>) {
        self.sheet.set_rows(rows);
    }

    pub fn summary(&self) -> SheetSummary {
        summarize(&self.sheet)
    }

    fn row_id_at(&self, position: usize) -> Result<RowId, AppError> {
        position
            .checked_sub(1)
            .and_then(|index| self.sheet.rows().get(index))
            .map(|row| row.id)
            .ok_or(AppError::RowOutOfRange(position))
    }
}

pub fn summarize(sheet: &SettlementSheet) -> SheetSummary {
    SheetSummary {
        row_count: sheet.rows().len(),
        total: sheet.total_amount(),
        advance: sheet.advance_amount,
        remaining: sheet.remaining_amount(),
        amount_to_read: sheet.amount_to_read(),
        money_text: sheet.money_text(),
    }
}
