// crates/finnews-core/src/schema.rs

/// Columns that must be present and fully populated for a table to pass
/// validation. Names are exact; raw source headers are only lowercased by
/// the separate preprocessing path.
pub const REQUIRED_COLUMNS: [&str; 5] = ["headline", "url", "publisher", "date", "stock"];

/// Columns a row must have populated to survive missing-value handling.
pub const CRITICAL_COLUMNS: [&str; 3] = ["date", "headline", "stock"];

pub const DATE_COLUMN: &str = "date";

pub const HEADLINE_COLUMN: &str = "headline";

pub const PUBLISHER_COLUMN: &str = "publisher";

pub const HEADLINE_LENGTH_COLUMN: &str = "headline_length";
