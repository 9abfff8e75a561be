mod analysis;
mod error;
mod fetcher;
mod pipeline;
mod types;
mod units;

pub use error::WeatherStatError;
pub use pipeline::*;
pub use units::*;

pub use analysis::analyzer::WeatherAnalyzer;
pub use analysis::cleaning::{
    check_row, clean, CleanRow, CleanedDataset, CleaningReport, RejectionReason,
};
pub use analysis::dataset::{Dataset, Row};
pub use analysis::export::{export_summary, load_summary};
pub use analysis::statistics::compute_statistics;

pub use types::bounds::*;
pub use types::field::Field;
pub use types::field_value::FieldValue;
pub use types::raw_reading::RawReading;
pub use types::summary::{FieldStatistics, SummaryStatistics};

pub use fetcher::openweather::{
    OpenWeatherFetcher, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_UNITS,
};
pub use fetcher::ReadingSource;

pub use analysis::error::{AnalysisError, ExportError, ValidationError};
pub use fetcher::error::{FetchError, FetchErrorKind};
