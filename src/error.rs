//! Error types for the pavement-report library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pavement-report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error types that can occur while building a distress report.
///
/// Every variant is fatal to a report run. Annotations whose image has no
/// position in the index are not errors; they are dropped and counted in
/// [`crate::stats::ReportStats`].
#[derive(Error, Debug)]
pub enum ReportError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A position index or annotation file could not be read or parsed.
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A shape label outside the known defect classes.
    #[error("Unknown defect class: {label:?}")]
    UnknownDefectClass { label: String },

    /// Annotated or real-world dimensions that cannot produce a scale.
    #[error("Scale resolution failed: {0}")]
    ScaleResolution(String),

    /// A shape without the two corner points a measurement needs.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A pile key that cannot be offset numerically.
    #[error("Invalid pile: {0}")]
    InvalidPile(String),

    /// Report settings that cannot drive a run.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A report table is missing a required column.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A report table that cannot be laid out as a sheet.
    #[error("Invalid table: {0}")]
    InvalidDataFrame(String),

    /// Error raised by polars while assembling a table.
    #[error("Table error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Error raised while writing the spreadsheet.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    /// Build a [`ReportError::Parse`] for the given resource.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ReportError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
