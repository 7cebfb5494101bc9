//! Error types for utility functions.

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Null in a required column.
    #[error("null value in column {column} at row {row}")]
    NullValue {
        /// Column name.
        column: &'static str,
        /// Row index after sorting.
        row: usize,
    },

    /// Epoch milliseconds outside the representable range.
    #[error("invalid timestamp in column {column}: {value}")]
    InvalidTimestamp {
        /// Column name.
        column: &'static str,
        /// Raw value.
        value: i64,
    },
}
