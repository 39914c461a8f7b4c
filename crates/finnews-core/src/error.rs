// crates/finnews-core/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("no data rows in {}", .0.display())]
    EmptyData(PathBuf),

    #[error("input table has no rows")]
    EmptyInput,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("could not parse '{value}' in column '{column}' as a timestamp")]
    DateParse { column: String, value: String },

    #[error("columns '{left}' and '{right}' both standardize to '{name}'")]
    ColumnCollision {
        left: String,
        right: String,
        name: String,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
