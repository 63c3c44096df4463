//! Error types for schema mapping.

use thiserror::Error;

/// Errors that can occur while mapping a source table into the metric schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// No mapping is registered for the dataset.
    #[error("dataset '{dataset}' is not declared in the configuration")]
    UnknownDataset { dataset: String },

    /// Required columns are absent from the source header.
    ///
    /// `columns` is deduplicated and sorted.
    #[error("dataset '{dataset}' is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        dataset: String,
        columns: Vec<String>,
    },

    /// The source table has no data rows.
    #[error("dataset '{dataset}' is empty; cannot transform an empty table")]
    EmptyTable { dataset: String },

    /// A mandatory value cell is not a number.
    #[error("dataset '{dataset}': value '{value}' in column '{column}' at row {row} is not numeric")]
    NumericCoercion {
        dataset: String,
        column: String,
        row: usize,
        value: String,
    },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
