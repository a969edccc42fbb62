mod export;
mod import;

pub use export::*;
pub use import::*;

/// Column layout of a rows CSV file.
pub const ROW_COLUMNS: [&str; 8] = [
    "mode",
    "content",
    "length",
    "width",
    "size",
    "quantity",
    "unit_price",
    "manual_total",
];
