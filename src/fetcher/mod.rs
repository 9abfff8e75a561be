//! Sources of raw readings.

pub mod error;
pub mod openweather;

use crate::fetcher::error::FetchError;
use crate::types::raw_reading::RawReading;

/// Anything that can produce a point-in-time reading for a named location.
///
/// Implementations must return one of the [`FetchError`] variants instead of
/// partial data. Credentials belong to the implementation and are never seen
/// by the analyzer.
pub trait ReadingSource {
    fn fetch(&self, location: &str) -> Result<RawReading, FetchError>;
}

impl<T: ReadingSource + ?Sized> ReadingSource for &T {
    fn fetch(&self, location: &str) -> Result<RawReading, FetchError> {
        (**self).fetch(location)
    }
}

impl<T: ReadingSource + ?Sized> ReadingSource for Box<T> {
    fn fetch(&self, location: &str) -> Result<RawReading, FetchError> {
        (**self).fetch(location)
    }
}
