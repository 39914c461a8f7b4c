// crates/finnews-core/src/export.rs

use std::fs::File;
use std::path::Path;

use chrono::DateTime;
use polars::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};

/// Writes a cleaned table as CSV: header row first, nulls as empty fields,
/// timestamps rendered as `%Y-%m-%d %H:%M:%S`.
pub fn write_csv(df: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str().to_string())
        .collect();
    writer.write_record(&names)?;

    let rendered: Vec<Vec<String>> = df
        .get_columns()
        .iter()
        .map(render_column)
        .collect::<Result<_>>()?;

    for row in 0..df.height() {
        let record: Vec<&str> = rendered.iter().map(|column| column[row].as_str()).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = df.height(), "wrote cleaned table");
    Ok(())
}

fn render_column(column: &Column) -> Result<Vec<String>> {
    let series = column.as_materialized_series();
    match series.dtype() {
        DataType::String => {
            let ca = series.str()?;
            Ok((0..ca.len())
                .map(|idx| ca.get(idx).unwrap_or("").to_string())
                .collect())
        }
        DataType::Datetime(TimeUnit::Microseconds, None) => {
            let ca = series.datetime()?;
            Ok((0..ca.len())
                .map(|idx| ca.get(idx).map(format_micros).unwrap_or_default())
                .collect())
        }
        DataType::UInt32 => {
            let ca = series.u32()?;
            Ok((0..ca.len())
                .map(|idx| ca.get(idx).map(|v| v.to_string()).unwrap_or_default())
                .collect())
        }
        DataType::Int64 => {
            let ca = series.i64()?;
            Ok((0..ca.len())
                .map(|idx| ca.get(idx).map(|v| v.to_string()).unwrap_or_default())
                .collect())
        }
        DataType::Float64 => {
            let ca = series.f64()?;
            Ok((0..ca.len())
                .map(|idx| ca.get(idx).map(|v| v.to_string()).unwrap_or_default())
                .collect())
        }
        other => Err(PipelineError::Validation(format!(
            "unsupported dtype {other} in column '{}' for CSV export",
            column.name()
        ))),
    }
}

fn format_micros(micros: i64) -> String {
    DateTime::from_timestamp_micros(micros)
        .map(|dt| dt.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
