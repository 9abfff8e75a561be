//! The `WeatherAnalyzer` ties dataset construction, cleaning, statistics and
//! export together behind one configured value.

use crate::analysis::cleaning::{clean, CleanedDataset, CleaningReport};
use crate::analysis::dataset::Dataset;
use crate::analysis::error::{AnalysisError, ExportError, ValidationError};
use crate::analysis::export::export_summary;
use crate::analysis::statistics::compute_statistics;
use crate::error::WeatherStatError;
use crate::types::bounds::PlausibilityBounds;
use crate::types::raw_reading::RawReading;
use crate::types::summary::SummaryStatistics;
use bon::Builder;
use std::path::Path;

/// Cleans batches of readings and summarizes them.
///
/// Built with [`WeatherAnalyzer::builder()`] or [`WeatherAnalyzer::default()`].
///
/// # Examples
///
/// ```
/// use weatherstat::{PlausibilityBounds, RawReading, WeatherAnalyzer};
///
/// let analyzer = WeatherAnalyzer::builder()
///     .bounds(PlausibilityBounds::default())
///     .round_to(2)
///     .build();
///
/// let batch = vec![
///     RawReading::for_city("Lviv").with("temp", 15).with("humidity", 70).with("pressure", 1010),
///     RawReading::for_city("Lviv").with("temp", 10).with("humidity", -5).with("pressure", 1015),
/// ];
/// let (report, summary) = analyzer.analyze(&batch)?;
/// assert_eq!(report.rows_removed, 1);
/// assert_eq!(summary.temp.mean, 15.0);
/// # Ok::<(), weatherstat::WeatherStatError>(())
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct WeatherAnalyzer {
    /// Limits outside of which a value is an anomaly.
    #[builder(default)]
    bounds: PlausibilityBounds,
    /// Decimal places to round statistics to. No rounding when unset.
    round_to: Option<u32>,
}

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> &PlausibilityBounds {
        &self.bounds
    }

    pub fn to_dataset(&self, readings: &[RawReading]) -> Result<Dataset, ValidationError> {
        Dataset::from_readings(readings)
    }

    pub fn clean(&self, dataset: &Dataset) -> Result<CleaningReport, AnalysisError> {
        clean(dataset, &self.bounds)
    }

    /// Computes statistics, rounded if the analyzer is configured to.
    pub fn summarize(&self, cleaned: &CleanedDataset) -> Result<SummaryStatistics, AnalysisError> {
        let summary = compute_statistics(cleaned)?;
        Ok(match self.round_to {
            Some(decimals) => summary.rounded(decimals),
            None => summary,
        })
    }

    pub fn export(
        &self,
        summary: &SummaryStatistics,
        path: impl AsRef<Path>,
    ) -> Result<(), ExportError> {
        export_summary(summary, path)
    }

    /// Runs construction, cleaning and statistics over one batch without writing anything.
    pub fn analyze(
        &self,
        readings: &[RawReading],
    ) -> Result<(CleaningReport, SummaryStatistics), WeatherStatError> {
        let dataset = self.to_dataset(readings)?;
        let report = self.clean(&dataset)?;
        let summary = self.summarize(&report.cleaned)?;
        Ok((report, summary))
    }
}
