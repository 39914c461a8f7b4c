// crates/finnews-core/src/loader.rs

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::{error, info};

use crate::dates::DateHandling;
use crate::error::{PipelineError, Result};
use crate::preprocess;
use crate::schema::DATE_COLUMN;
use crate::validation;

/// Field values treated as missing on load, matched case-insensitively
/// after trimming.
const MISSING_MARKERS: &[&str] = &["nan", "na", "n/a", "null"];

/// Loads a headline CSV into a table. Columns load as strings; the `date`
/// column is coerced to naive timestamps (unparseable values become nulls)
/// whether or not validation runs.
pub fn load_data(path: impl AsRef<Path>, validate: bool) -> Result<DataFrame> {
    let path = path.as_ref();
    match load_inner(path, validate) {
        Ok(df) => Ok(df),
        Err(err) => {
            error!(path = %path.display(), "failed to load data: {err}");
            Err(err)
        }
    }
}

/// Reads the file into an all-string table without validating or typing
/// the date column. Fails on missing files and tables with no rows.
pub fn load_raw(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(PipelineError::FileNotFound(path.to_path_buf()));
    }

    let df = read_table(path)?;
    if df.width() == 0 || df.height() == 0 {
        return Err(PipelineError::EmptyData(path.to_path_buf()));
    }
    Ok(df)
}

fn load_inner(path: &Path, validate: bool) -> Result<DataFrame> {
    info!(path = %path.display(), "loading data");

    let df = load_raw(path)?;

    if validate {
        let outcome = validation::validate_data(&df);
        if let Some(reason) = outcome.reason() {
            return Err(PipelineError::Validation(reason.to_string()));
        }
    }

    // Validation sees the raw strings; the typed column is produced here
    // unconditionally so unvalidated loads still come back date-typed.
    let df = preprocess::parse_dates_with(&df, DATE_COLUMN, DateHandling::Coerce)?;

    info!(rows = df.height(), "successfully loaded data");
    Ok(df)
}

fn read_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, value) in record.iter().enumerate() {
            columns[idx].push(clean_field(value));
        }
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name.as_str().into(), values).into())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn clean_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return None;
    }
    Some(trimmed.to_string())
}
