use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Dong;

pub type RowId = Uuid;

/// How the amount of a settlement row is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Length x width x quantity x unit price (area based work)
    #[default]
    DimQty,
    /// Single size x quantity x unit price (linear work)
    SizeQty,
    /// Quantity x unit price
    Direct,
    /// Amount typed in by hand
    Manual,
}

impl InputMode {
    pub const ALL: [InputMode; 4] = [
        InputMode::DimQty,
        InputMode::SizeQty,
        InputMode::Direct,
        InputMode::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::DimQty => "dim_qty",
            InputMode::SizeQty => "size_qty",
            InputMode::Direct => "direct",
            InputMode::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dim_qty" => Some(InputMode::DimQty),
            "size_qty" => Some(InputMode::SizeQty),
            "direct" => Some(InputMode::Direct),
            "manual" => Some(InputMode::Manual),
            _ => None,
        }
    }

    /// Vietnamese label, shown in the `row list` mode column.
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::DimQty => "Dài x Rộng x SL",
            InputMode::SizeQty => "Kích thước x SL",
            InputMode::Direct => "Nhập số lượng & Đơn giá",
            InputMode::Manual => "Nhập tay hoàn toàn",
        }
    }

    /// Manual rows carry only a total; every other mode has a quantity.
    pub fn uses_quantity(&self) -> bool {
        !matches!(self, InputMode::Manual)
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of work on a settlement sheet.
/// Dimensions are in metres; prices and manual totals in đồng.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementRow {
    pub id: RowId,
    pub mode: InputMode,
    pub content: String,
    pub length: f64,
    pub width: f64,
    pub size: f64,
    pub quantity: f64,
    pub unit_price: Dong,
    pub manual_total: Dong,
}

impl SettlementRow {
    pub fn new(mode: InputMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            content: String::new(),
            length: 0.0,
            width: 0.0,
            size: 0.0,
            quantity: 1.0,
            unit_price: 0,
            manual_total: 0,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_dimensions(mut self, length: f64, width: f64) -> Self {
        self.length = length;
        self.width = width;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, unit_price: Dong) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_manual_total(mut self, manual_total: Dong) -> Self {
        self.manual_total = manual_total;
        self
    }

    /// Amount of the row before flooring to whole đồng.
    pub fn subtotal(&self) -> f64 {
        let price = self.unit_price as f64;
        match self.mode {
            InputMode::DimQty => self.length * self.width * self.quantity * price,
            InputMode::SizeQty => self.size * self.quantity * price,
            InputMode::Direct => self.quantity * price,
            InputMode::Manual => self.manual_total as f64,
        }
    }

    /// Total area in m², only meaningful for `DimQty` rows.
    pub fn area(&self) -> f64 {
        match self.mode {
            InputMode::DimQty => self.length * self.width * self.quantity,
            _ => 0.0,
        }
    }

    /// Copy of this row under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn apply(&mut self, update: RowUpdate) {
        match update {
            RowUpdate::Mode(mode) => self.mode = mode,
            RowUpdate::Content(content) => self.content = content,
            RowUpdate::Length(length) => self.length = length,
            RowUpdate::Width(width) => self.width = width,
            RowUpdate::Size(size) => self.size = size,
            RowUpdate::Quantity(quantity) => self.quantity = quantity,
            RowUpdate::UnitPrice(price) => self.unit_price = price,
            RowUpdate::ManualTotal(total) => self.manual_total = total,
        }
    }
}

impl Default for SettlementRow {
    fn default() -> Self {
        Self::new(InputMode::default())
    }
}

/// A single-field edit of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowUpdate {
    Mode(InputMode),
    Content(String),
    Length(f64),
    Width(f64),
    Size(f64),
    Quantity(f64),
    UnitPrice(Dong),
    ManualTotal(Dong),
}
