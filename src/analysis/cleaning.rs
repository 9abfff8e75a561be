//! Anomaly filtering.
//!
//! A row survives only if `temp`, `humidity` and `pressure` are all present,
//! numeric and inside the configured [`PlausibilityBounds`]. Failing rows are
//! dropped whole; nothing is clamped or imputed.

use crate::analysis::dataset::{Dataset, Row};
use crate::analysis::error::AnalysisError;
use crate::types::bounds::PlausibilityBounds;
use crate::types::field::Field;
use crate::types::field_value::FieldValue;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;

/// Why a row was dropped. Only the first failing field is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectionReason {
    Missing(Field),
    NonNumeric(Field),
    OutOfRange(Field),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Missing(field) => write!(f, "missing {}", field),
            RejectionReason::NonNumeric(field) => write!(f, "non-numeric {}", field),
            RejectionReason::OutOfRange(field) => write!(f, "{} out of range", field),
        }
    }
}

/// A row that passed every rule, with plain numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub city: String,
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl CleanRow {
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Temp => self.temp,
            Field::Humidity => self.humidity,
            Field::Pressure => self.pressure,
        }
    }
}

/// Rows of a [`Dataset`] that passed cleaning, in their original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedDataset {
    rows: Vec<CleanRow>,
}

impl CleanedDataset {
    pub fn rows(&self) -> &[CleanRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, field: Field) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row.value(field))
    }
}

impl From<&CleanedDataset> for Dataset {
    fn from(cleaned: &CleanedDataset) -> Self {
        Dataset::from_rows(
            cleaned
                .rows
                .iter()
                .map(|r| Row::new(r.city.clone(), r.temp, r.humidity, r.pressure))
                .collect(),
        )
    }
}

/// Result of a cleaning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub cleaned: CleanedDataset,
    pub initial_rows: usize,
    pub rows_removed: usize,
    /// Number of dropped rows per reason.
    pub rejections: BTreeMap<RejectionReason, usize>,
}

/// Checks one row against the rules, in field order `temp`, `humidity`, `pressure`.
pub fn check_row(row: &Row, bounds: &PlausibilityBounds) -> Result<CleanRow, RejectionReason> {
    let mut values = [0.0; 3];
    for field in Field::ALL {
        let value = match row.value(field) {
            FieldValue::Present(v) => *v,
            FieldValue::Missing => return Err(RejectionReason::Missing(field)),
            FieldValue::Invalid(_) => return Err(RejectionReason::NonNumeric(field)),
        };
        if !bounds.range(field).contains(value) {
            return Err(RejectionReason::OutOfRange(field));
        }
        values[field.index()] = value;
    }
    Ok(CleanRow {
        city: row.city.clone(),
        temp: values[Field::Temp.index()],
        humidity: values[Field::Humidity.index()],
        pressure: values[Field::Pressure.index()],
    })
}

/// Drops every row that fails [`check_row`], returning a new dataset.
///
/// The input is left untouched. Filtering every row out is a valid outcome
/// and yields an empty [`CleanedDataset`].
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidBounds`] if a range in `bounds` is inverted
/// or NaN, and [`AnalysisError::MissingSchema`] if the dataset has rows but
/// none of the `temp`, `humidity` and `pressure` columns is defined.
pub fn clean(
    dataset: &Dataset,
    bounds: &PlausibilityBounds,
) -> Result<CleaningReport, AnalysisError> {
    if let Some(field) = bounds.first_invalid() {
        let range = bounds.range(field);
        return Err(AnalysisError::InvalidBounds {
            field,
            min: range.min,
            max: range.max,
        });
    }
    if !dataset.is_empty() && !Field::ALL.iter().any(|f| dataset.has_column(*f)) {
        return Err(AnalysisError::MissingSchema {
            rows: dataset.len(),
        });
    }

    let mut rows = Vec::with_capacity(dataset.len());
    let mut rejections = BTreeMap::new();
    for (index, row) in dataset.rows().iter().enumerate() {
        match check_row(row, bounds) {
            Ok(clean_row) => rows.push(clean_row),
            Err(reason) => {
                debug!("Dropping row {} ({}): {}", index, row.city, reason);
                *rejections.entry(reason).or_insert(0) += 1;
            }
        }
    }

    let initial_rows = dataset.len();
    let rows_removed = initial_rows - rows.len();
    if rows.is_empty() && initial_rows > 0 {
        warn!("Cleaning removed all {} rows", initial_rows);
    } else {
        info!(
            "Cleaning kept {} of {} rows ({} removed)",
            rows.len(),
            initial_rows,
            rows_removed
        );
    }

    Ok(CleaningReport {
        cleaned: CleanedDataset { rows },
        initial_rows,
        rows_removed,
        rejections,
    })
}
