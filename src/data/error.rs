use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loader errors
// ---------------------------------------------------------------------------

/// Anything that prevents a file from becoming a [`Dataset`](super::model::Dataset).
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow conversion failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("row {row}: {detail}")]
    MalformedRow { row: usize, detail: String },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("file contains no columns")]
    NoColumns,
}

// ---------------------------------------------------------------------------
// Aggregation errors
// ---------------------------------------------------------------------------

/// Failures of the aggregation engine. None of these are fatal: the
/// dashboard renders a placeholder for the affected chart instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("correlation needs at least 2 numeric columns and 2 rows (got {columns} columns, {rows} rows)")]
    InsufficientData { columns: usize, rows: usize },

    #[error("no total_load column: heating_load and cooling_load are both required to derive it")]
    MissingTotalLoad,
}
