// crates/finnews-core/src/summary.rs
//
// Diagnostic summaries over a cleaned table: headline-length distribution,
// most active publishers, and article counts per day.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate};
use polars::prelude::*;
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::schema::{DATE_COLUMN, HEADLINE_COLUMN, HEADLINE_LENGTH_COLUMN, PUBLISHER_COLUMN};

#[derive(Debug, Clone, Serialize)]
pub struct HeadlineLengthStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: u32,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherCount {
    pub publisher: String,
    pub articles: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub articles: usize,
}

/// Distribution of headline lengths. Uses the derived length column when
/// present, otherwise counts characters in `headline` directly.
pub fn headline_length_stats(df: &DataFrame) -> Result<HeadlineLengthStats> {
    let mut lengths = headline_lengths(df)?;
    if lengths.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    lengths.sort_unstable();

    let count = lengths.len();
    let mean = lengths.iter().map(|v| f64::from(*v)).sum::<f64>() / count as f64;
    let std = if count > 1 {
        let sum_sq = lengths
            .iter()
            .map(|v| {
                let delta = f64::from(*v) - mean;
                delta * delta
            })
            .sum::<f64>();
        (sum_sq / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    Ok(HeadlineLengthStats {
        count,
        mean,
        std,
        min: lengths[0],
        q25: quantile(&lengths, 0.25),
        median: quantile(&lengths, 0.5),
        q75: quantile(&lengths, 0.75),
        max: lengths[count - 1],
    })
}

/// Publishers by article count, descending, ties broken by name.
pub fn publisher_counts(df: &DataFrame, top: usize) -> Result<Vec<PublisherCount>> {
    let column = df
        .column(PUBLISHER_COLUMN)
        .map_err(|_| PipelineError::ColumnNotFound(PUBLISHER_COLUMN.to_string()))?;
    let ca = column.str()?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for idx in 0..ca.len() {
        if let Some(publisher) = ca.get(idx) {
            *counts.entry(publisher.to_string()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<PublisherCount> = counts
        .into_iter()
        .map(|(publisher, articles)| PublisherCount {
            publisher,
            articles,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.articles
            .cmp(&a.articles)
            .then_with(|| a.publisher.cmp(&b.publisher))
    });
    rows.truncate(top);
    Ok(rows)
}

/// Articles per calendar day, ascending. Requires the date column to be
/// timestamp-typed, i.e. a loaded or preprocessed table.
pub fn daily_counts(df: &DataFrame) -> Result<Vec<DailyCount>> {
    let column = df
        .column(DATE_COLUMN)
        .map_err(|_| PipelineError::ColumnNotFound(DATE_COLUMN.to_string()))?;
    if !matches!(column.dtype(), DataType::Datetime(_, _)) {
        return Err(PipelineError::Validation(format!(
            "column '{DATE_COLUMN}' must be timestamp-typed for daily counts"
        )));
    }
    let ca = column.datetime()?;

    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for idx in 0..ca.len() {
        let Some(micros) = ca.get(idx) else { continue };
        if let Some(dt) = DateTime::from_timestamp_micros(micros) {
            *counts.entry(dt.date_naive()).or_insert(0) += 1;
        }
    }

    Ok(counts
        .into_iter()
        .map(|(date, articles)| DailyCount { date, articles })
        .collect())
}

fn headline_lengths(df: &DataFrame) -> Result<Vec<u32>> {
    if let Ok(column) = df.column(HEADLINE_LENGTH_COLUMN) {
        let ca = column.u32()?;
        let mut lengths = Vec::with_capacity(ca.len());
        for idx in 0..ca.len() {
            if let Some(value) = ca.get(idx) {
                lengths.push(value);
            }
        }
        return Ok(lengths);
    }

    let column = df
        .column(HEADLINE_COLUMN)
        .map_err(|_| PipelineError::ColumnNotFound(HEADLINE_COLUMN.to_string()))?;
    let ca = column.str()?;
    let mut lengths = Vec::with_capacity(ca.len());
    for idx in 0..ca.len() {
        if let Some(headline) = ca.get(idx) {
            lengths.push(headline.chars().count() as u32);
        }
    }
    Ok(lengths)
}

/// Linearly interpolated quantile over a sorted slice.
fn quantile(sorted: &[u32], q: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * q;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    f64::from(sorted[lower]) * (1.0 - fraction) + f64::from(sorted[upper]) * fraction
}
