//! One end-to-end run: fetch a batch for a location, clean it, summarize it
//! and persist the summary.
//!
//! A run either writes its output file or fails with a single error and
//! leaves the destination untouched.

use crate::analysis::analyzer::WeatherAnalyzer;
use crate::analysis::cleaning::RejectionReason;
use crate::error::WeatherStatError;
use crate::fetcher::ReadingSource;
use crate::types::raw_reading::RawReading;
use crate::types::summary::SummaryStatistics;
use bon::bon;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub readings: usize,
    pub rows_kept: usize,
    pub rows_removed: usize,
    pub rejections: BTreeMap<RejectionReason, usize>,
    pub summary: SummaryStatistics,
    pub output: PathBuf,
}

pub struct WeatherPipeline<S> {
    source: S,
    analyzer: WeatherAnalyzer,
}

#[bon]
impl<S: ReadingSource> WeatherPipeline<S> {
    pub fn new(source: S, analyzer: WeatherAnalyzer) -> Self {
        Self { source, analyzer }
    }

    pub fn analyzer(&self) -> &WeatherAnalyzer {
        &self.analyzer
    }

    /// Cleans and summarizes an already collected batch, then writes the summary to `output`.
    pub fn analyze(
        &self,
        readings: &[RawReading],
        output: impl AsRef<Path>,
    ) -> Result<PipelineReport, WeatherStatError> {
        let output = output.as_ref();
        let (report, summary) = self.analyzer.analyze(readings)?;
        self.analyzer.export(&summary, output)?;
        Ok(PipelineReport {
            readings: readings.len(),
            rows_kept: report.cleaned.len(),
            rows_removed: report.rows_removed,
            rejections: report.rejections,
            summary,
            output: output.to_path_buf(),
        })
    }

    /// Fetches `samples` readings for `location` and summarizes them into `output`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(..)`: **Required.** Name of the location to fetch.
    /// * `.output(..)`: **Required.** Path of the JSON summary to write.
    /// * `.samples(usize)`: Optional. Number of readings to fetch. Defaults to `1`.
    ///
    /// # Errors
    ///
    /// Fetch errors are returned as-is on the first failure, without retrying.
    /// Validation, analysis and export errors are returned as described on
    /// [`WeatherAnalyzer`].
    #[builder]
    pub fn run(
        &self,
        #[builder(into)] location: String,
        #[builder(into)] output: PathBuf,
        samples: Option<usize>,
    ) -> Result<PipelineReport, WeatherStatError> {
        let samples = samples.unwrap_or(1);
        info!("Collecting {} reading(s) for '{}'", samples, location);

        let readings = (0..samples)
            .map(|_| self.source.fetch(&location))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!("Fetching '{}' failed: {}", location, e))?;

        let report = self.analyze(&readings, &output)?;
        info!(
            "Summarized {} of {} reading(s) for '{}' into {:?}",
            report.rows_kept, report.readings, location, report.output
        );
        Ok(report)
    }
}
