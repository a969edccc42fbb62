use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{dong_from_f64, dong_toward_zero, read_money_to_text, Dong, RowId, RowUpdate, SettlementRow};

pub const DEFAULT_TITLE: &str = "BẢNG QUYẾT TOÁN CÔNG VIỆC";

/// Placeholder printed when the sheet has no date.
pub const BLANK_DATE: &str = ".../.../20...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "landscape" => Some(Orientation::Landscape),
            "portrait" => Some(Orientation::Portrait),
            _ => None,
        }
    }

    /// Print rule selecting the A4 page orientation.
    pub fn page_css(&self) -> String {
        format!("@media print {{ @page {{ size: A4 {}; }} }}", self.as_str())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A settlement sheet: header, work rows, advance payment and the
/// payment/signature block printed at the bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementSheet {
    pub title: String,
    pub recipient: String,
    pub date: Option<NaiveDate>,
    pub advance_amount: Dong,
    pub bank_name: String,
    pub account_number: String,
    pub account_holder: String,
    pub creator_name: String,
    pub orientation: Orientation,
    rows: Vec<SettlementRow>,
}

impl SettlementSheet {
    /// A fresh sheet dated today with a single empty row.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            recipient: String::new(),
            date: Some(Local::now().date_naive()),
            advance_amount: 0,
            bank_name: String::new(),
            account_number: String::new(),
            account_holder: String::new(),
            creator_name: String::new(),
            orientation: Orientation::default(),
            rows: vec![SettlementRow::default()],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn with_advance(mut self, advance_amount: Dong) -> Self {
        self.advance_amount = advance_amount;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Replace all rows. An empty list leaves one blank row, since a sheet
    /// always has at least one line.
    pub fn with_rows(mut self, rows: Vec<SettlementRow>) -> Self {
        self.set_rows(rows);
        self
    }

    pub fn rows(&self) -> &[SettlementRow] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&SettlementRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn set_rows(&mut self, rows: Vec<SettlementRow>) {
        self.rows = rows;
        self.ensure_row();
    }

    /// Restore the "at least one row" invariant after deserialization.
    pub fn ensure_row(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(SettlementRow::default());
        }
    }

    /// Append a blank row and return its id.
    pub fn add_row(&mut self) -> RowId {
        self.push_row(SettlementRow::default())
    }

    pub fn push_row(&mut self, row: SettlementRow) -> RowId {
        let id = row.id;
        self.rows.push(row);
        id
    }

    /// Remove a row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self, id: RowId) -> Result<SettlementRow, SheetError> {
        if self.rows.len() <= 1 {
            return Err(SheetError::LastRow);
        }
        let index = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(SheetError::RowNotFound(id))?;
        Ok(self.rows.remove(index))
    }

    /// Clone the row at `index` and insert the copy right after it.
    pub fn duplicate_row(&mut self, index: usize) -> Result<RowId, SheetError> {
        let copy = self
            .rows
            .get(index)
            .ok_or(SheetError::IndexOutOfRange(index))?
            .duplicate();
        let id = copy.id;
        self.rows.insert(index + 1, copy);
        Ok(id)
    }

    pub fn update_row(&mut self, id: RowId, update: RowUpdate) -> Result<(), SheetError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SheetError::RowNotFound(id))?;
        row.apply(update);
        Ok(())
    }

    fn subtotal_sum(&self) -> f64 {
        self.rows.iter().map(SettlementRow::subtotal).sum()
    }

    /// Sum of all row subtotals, floored to whole đồng.
    pub fn total_amount(&self) -> Dong {
        dong_from_f64(self.subtotal_sum())
    }

    pub fn remaining_amount(&self) -> Dong {
        self.total_amount().saturating_sub(self.advance_amount)
    }

    /// The amount spelled out on the sheet: what is still owed when an
    /// advance was paid, otherwise the grand total. Computed from the
    /// unrounded subtotals, with the fraction dropped toward zero.
    pub fn amount_to_read(&self) -> Dong {
        let sum = self.subtotal_sum();
        if self.advance_amount > 0 {
            dong_toward_zero(sum - self.advance_amount as f64)
        } else {
            dong_toward_zero(sum)
        }
    }

    pub fn money_text(&self) -> String {
        read_money_to_text(self.amount_to_read())
    }

    /// Whether the advance and remaining lines are printed.
    pub fn shows_advance(&self) -> bool {
        self.advance_amount != 0
    }

    /// Example: 2025-03-05 -> "Ngày 5 tháng 3 năm 2025"
    pub fn formatted_date(&self) -> String {
        match self.date {
            Some(d) => format!("Ngày {} tháng {} năm {}", d.day(), d.month(), d.year()),
            None => BLANK_DATE.to_string(),
        }
    }
}

impl Default for SettlementSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    LastRow,
    RowNotFound(RowId),
    IndexOutOfRange(usize),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::LastRow => write!(f, "cannot remove the last row of a sheet"),
            SheetError::RowNotFound(id) => write!(f, "row not found: {}", id),
            SheetError::IndexOutOfRange(index) => write!(f, "no row at position {}", index + 1),
        }
    }
}

impl std::error::Error for SheetError {}
