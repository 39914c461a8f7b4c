// crates/finnews-core/src/dates.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// What to do with a value the format table cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateHandling {
    /// Abort the whole operation on the first unparseable value.
    Strict,
    /// Replace unparseable values with nulls and keep going.
    Coerce,
}

static OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

static NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a raw date string to a timezone-naive timestamp, or `None` when
/// no format in the table matches. Offset-suffixed inputs keep their
/// wall-clock time; the offset is dropped rather than applied.
pub fn parse_lenient(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Same as [`parse_lenient`] but yields microseconds since the epoch, the
/// physical representation of a naive polars datetime column.
pub fn parse_lenient_micros(raw: &str) -> Option<i64> {
    parse_lenient(raw).map(|dt| dt.and_utc().timestamp_micros())
}
