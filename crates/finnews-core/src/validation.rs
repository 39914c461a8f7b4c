// crates/finnews-core/src/validation.rs

use polars::prelude::*;
use serde::Serialize;

use crate::dates;
use crate::schema::{DATE_COLUMN, REQUIRED_COLUMNS};

const BAD_DATE_SAMPLE_LIMIT: usize = 5;

/// Outcome of a validation pass. Data-quality problems are reported here,
/// never as errors; the caller decides whether an invalid table is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    Valid,
    Invalid { reason: String },
}

impl Validation {
    fn invalid(reason: impl Into<String>) -> Self {
        Validation::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid { reason } => Some(reason),
        }
    }
}

/// Checks a loaded table against the required schema: column presence
/// first, then null counts, then date parseability. Does not mutate the
/// table and stops at the first failing check.
pub fn validate_data(df: &DataFrame) -> Validation {
    if let Some(outcome) = check_required_columns(df) {
        return outcome;
    }
    if let Some(outcome) = check_null_counts(df) {
        return outcome;
    }
    if let Some(outcome) = check_date_values(df) {
        return outcome;
    }
    Validation::Valid
}

fn check_required_columns(df: &DataFrame) -> Option<Validation> {
    let names: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !names.contains(required))
        .collect();

    if missing.is_empty() {
        return None;
    }
    Some(Validation::invalid(format!(
        "missing required columns: {missing:?}"
    )))
}

fn check_null_counts(df: &DataFrame) -> Option<Validation> {
    let mut affected: Vec<(&str, usize)> = Vec::new();
    for name in REQUIRED_COLUMNS {
        if let Ok(column) = df.column(name) {
            let nulls = column.null_count();
            if nulls > 0 {
                affected.push((name, nulls));
            }
        }
    }

    if affected.is_empty() {
        return None;
    }
    let rendered = affected
        .iter()
        .map(|(name, count)| format!("{name} ({count})"))
        .collect::<Vec<_>>()
        .join(", ");
    Some(Validation::invalid(format!(
        "found null values in columns: {rendered}"
    )))
}

/// Reports up to [`BAD_DATE_SAMPLE_LIMIT`] distinct unparseable raw values
/// in first-seen order. A date column that is already datetime-typed has
/// nothing left to check.
fn check_date_values(df: &DataFrame) -> Option<Validation> {
    let column = df.column(DATE_COLUMN).ok()?;
    if !matches!(column.dtype(), DataType::String) {
        return None;
    }
    let ca = column.str().ok()?;

    let mut bad: Vec<String> = Vec::new();
    let mut truncated = false;
    for idx in 0..ca.len() {
        let Some(raw) = ca.get(idx) else { continue };
        if dates::parse_lenient(raw).is_some() {
            continue;
        }
        if bad.iter().any(|seen| seen == raw) {
            continue;
        }
        if bad.len() < BAD_DATE_SAMPLE_LIMIT {
            bad.push(raw.to_string());
        } else {
            truncated = true;
            break;
        }
    }

    if bad.is_empty() {
        return None;
    }
    Some(Validation::invalid(format!(
        "some dates could not be parsed: {bad:?}{}",
        if truncated { " ..." } else { "" }
    )))
}
