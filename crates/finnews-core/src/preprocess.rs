// crates/finnews-core/src/preprocess.rs

use polars::prelude::*;
use tracing::{error, info, warn};

use crate::dates::{self, DateHandling};
use crate::error::{PipelineError, Result};
use crate::schema::{CRITICAL_COLUMNS, DATE_COLUMN, HEADLINE_COLUMN, HEADLINE_LENGTH_COLUMN};

/// Renames every column to lowercase with spaces replaced by underscores.
/// Two distinct names that standardize to the same target are an error
/// rather than a silent overwrite.
pub fn standardize_column_names(df: &DataFrame) -> Result<DataFrame> {
    let originals: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str().to_string())
        .collect();

    let mut renames: Vec<(String, String)> = Vec::with_capacity(originals.len());
    for original in originals {
        let standardized = original.to_lowercase().replace(' ', "_");
        if let Some((prev, _)) = renames.iter().find(|(_, target)| *target == standardized) {
            return Err(PipelineError::ColumnCollision {
                left: prev.clone(),
                right: original,
                name: standardized,
            });
        }
        renames.push((original, standardized));
    }

    let mut out = df.clone();
    for (original, standardized) in &renames {
        if original != standardized {
            out.rename(original, standardized.as_str().into())?;
        }
    }
    Ok(out)
}

/// Strict-mode date parsing: any unparseable value fails the operation.
pub fn parse_dates(df: &DataFrame, date_col: &str) -> Result<DataFrame> {
    parse_dates_with(df, date_col, DateHandling::Strict)
}

/// Parses a string column to naive microsecond timestamps under the given
/// failure policy. Timezone offsets are dropped, keeping wall-clock time,
/// so the resulting column is uniformly timezone-naive. Nulls pass through.
pub fn parse_dates_with(
    df: &DataFrame,
    date_col: &str,
    handling: DateHandling,
) -> Result<DataFrame> {
    match parse_dates_inner(df, date_col, handling) {
        Ok(out) => Ok(out),
        Err(err) => {
            error!(column = date_col, "failed to parse dates: {err}");
            Err(err)
        }
    }
}

fn parse_dates_inner(df: &DataFrame, date_col: &str, handling: DateHandling) -> Result<DataFrame> {
    let Ok(column) = df.column(date_col) else {
        return Err(PipelineError::ColumnNotFound(date_col.to_string()));
    };

    match column.dtype() {
        DataType::String => {}
        // Already parsed; nothing left to do.
        DataType::Datetime(_, None) => return Ok(df.clone()),
        other => {
            return Err(PipelineError::Validation(format!(
                "column '{date_col}' has unsupported dtype {other} for date parsing"
            )));
        }
    }

    let ca = column.str()?;
    let mut parsed: Vec<Option<i64>> = Vec::with_capacity(ca.len());
    for idx in 0..ca.len() {
        match ca.get(idx) {
            None => parsed.push(None),
            Some(raw) => match dates::parse_lenient_micros(raw) {
                Some(micros) => parsed.push(Some(micros)),
                None => match handling {
                    DateHandling::Strict => {
                        return Err(PipelineError::DateParse {
                            column: date_col.to_string(),
                            value: raw.to_string(),
                        });
                    }
                    DateHandling::Coerce => parsed.push(None),
                },
            },
        }
    }

    let series = Series::new(date_col.into(), parsed)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let mut out = df.clone();
    out.with_column(series)?;
    Ok(out)
}

/// Drops every row with a null in any of the given columns (defaults to
/// the critical set). Retained rows keep their relative order.
pub fn handle_missing_values(df: &DataFrame, required_cols: Option<&[&str]>) -> Result<DataFrame> {
    let required: Vec<&str> = match required_cols {
        Some(cols) => cols.to_vec(),
        None => CRITICAL_COLUMNS.to_vec(),
    };

    let mut keep = BooleanChunked::full("keep".into(), true, df.height());
    for name in &required {
        let column = df
            .column(name)
            .map_err(|_| PipelineError::ColumnNotFound(name.to_string()))?;
        keep = &keep & &column.as_materialized_series().is_not_null();
    }

    let kept = df.filter(&keep)?;
    let dropped = df.height() - kept.height();
    if dropped > 0 {
        warn!(rows = dropped, columns = ?required, "dropped rows with missing values");
    }
    Ok(kept)
}

/// Runs the full cleaning sequence over a fresh copy of the input:
/// standardize names, parse dates strictly, drop incomplete rows, append
/// the headline length column. The caller's table is never mutated.
pub fn preprocess_data(df: &DataFrame) -> Result<DataFrame> {
    match preprocess_inner(df) {
        Ok(out) => Ok(out),
        Err(err) => {
            error!("preprocessing failed: {err}");
            Err(err)
        }
    }
}

fn preprocess_inner(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(PipelineError::EmptyInput);
    }

    info!(rows = df.height(), "starting preprocessing");

    let out = standardize_column_names(df)?;
    let out = parse_dates(&out, DATE_COLUMN)?;
    let out = handle_missing_values(&out, None)?;
    let out = add_headline_length(&out)?;

    info!(rows = out.height(), "preprocessing complete");
    Ok(out)
}

fn add_headline_length(df: &DataFrame) -> Result<DataFrame> {
    if df.column(HEADLINE_COLUMN).is_err() {
        return Err(PipelineError::ColumnNotFound(HEADLINE_COLUMN.to_string()));
    }

    let out = df
        .clone()
        .lazy()
        .with_column(
            col(HEADLINE_COLUMN)
                .str()
                .len_chars()
                .alias(HEADLINE_LENGTH_COLUMN),
        )
        .collect()?;
    Ok(out)
}
