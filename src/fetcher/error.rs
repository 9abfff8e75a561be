use reqwest::StatusCode;
use thiserror::Error;

/// The three failure kinds a caller of a [`crate::ReadingSource`] can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Transport failure, unexpected status or unusable payload.
    Fetch,
    /// Credentials were missing or rejected.
    Auth,
    /// The location is unknown to the provider.
    NotFound,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API key must be a non-empty string")]
    MissingApiKey,

    #[error("Location name must be a non-empty string")]
    InvalidLocation,

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for '{0}'")]
    Network(String, #[source] reqwest::Error),

    #[error("Invalid API key (HTTP 401)")]
    Auth,

    #[error("Location '{0}' not found (HTTP 404)")]
    NotFound(String),

    #[error("Request for '{location}' failed with status {status}")]
    HttpStatus {
        location: String,
        status: StatusCode,
    },

    #[error("Unexpected response for '{location}': {message}")]
    MalformedResponse { location: String, message: String },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::MissingApiKey | FetchError::Auth => FetchErrorKind::Auth,
            FetchError::InvalidLocation | FetchError::NotFound(_) => FetchErrorKind::NotFound,
            FetchError::ClientBuild(_)
            | FetchError::Network(_, _)
            | FetchError::HttpStatus { .. }
            | FetchError::MalformedResponse { .. } => FetchErrorKind::Fetch,
        }
    }
}
