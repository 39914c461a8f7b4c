pub mod dates;
pub mod error;
pub mod export;
pub mod loader;
pub mod preprocess;
pub mod schema;
pub mod summary;
pub mod validation;

pub use dates::DateHandling;
pub use error::{PipelineError, Result};
pub use loader::{load_data, load_raw};
pub use preprocess::{
    handle_missing_values, parse_dates, parse_dates_with, preprocess_data,
    standardize_column_names,
};
pub use summary::{
    daily_counts, headline_length_stats, publisher_counts, DailyCount, HeadlineLengthStats,
    PublisherCount,
};
pub use validation::{validate_data, Validation};
