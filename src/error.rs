//! Error types for the launch dashboard.
//!
//! Loading problems are fatal at startup; these variants carry enough
//! detail for the startup error chain to point at the offending row or
//! column.

use thiserror::Error;

/// Schema and validation failures raised while building the Data Store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// A required column is absent from the input.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// The outcome class is not 0 or 1.
    #[error("row {row}: outcome class must be 0 or 1, got '{value}'")]
    InvalidOutcome {
        /// Zero-based data row.
        row: usize,
        /// The offending raw value.
        value: String,
    },

    /// The payload mass is missing, non-numeric or not finite.
    #[error("row {row}: payload mass must be a finite number, got '{value}'")]
    InvalidPayload {
        /// Zero-based data row.
        row: usize,
        /// The offending raw value.
        value: String,
    },

    /// A required text cell is null.
    #[error("row {row}: column '{column}' is empty")]
    EmptyCell {
        /// Zero-based data row.
        row: usize,
        /// Column name.
        column: String,
    },

    /// A column's storage type cannot be read as a cell value.
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        /// Column name.
        column: String,
        /// Arrow type as printed by Arrow.
        data_type: String,
    },

    /// The input holds no rows.
    #[error("dataset contains no launch records")]
    EmptyDataset,

    /// The file extension is not one of the supported formats.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}
