use thiserror::Error;

use crate::domain::SheetError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Sheet file not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet file already exists: {0}")]
    SheetAlreadyExists(String),

    #[error("Invalid sheet file {path}: {reason}")]
    InvalidSheet { path: String, reason: String },

    #[error("Invalid input mode '{0}'. Valid modes: dim_qty, size_qty, direct, manual")]
    InvalidMode(String),

    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
