use crate::analysis::error::{AnalysisError, ExportError, ValidationError};
use crate::fetcher::error::FetchError;
use thiserror::Error;

/// Any error that can end a pipeline run.
#[derive(Debug, Error)]
pub enum WeatherStatError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
