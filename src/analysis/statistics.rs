use crate::analysis::cleaning::CleanedDataset;
use crate::analysis::error::AnalysisError;
use crate::types::field::Field;
use crate::types::summary::{FieldStatistics, SummaryStatistics};
use ordered_float::OrderedFloat;

/// Computes mean, min and max of every field over a cleaned dataset.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDataset`] when there are no rows; statistics
/// over an empty set are undefined rather than zero or NaN.
pub fn compute_statistics(cleaned: &CleanedDataset) -> Result<SummaryStatistics, AnalysisError> {
    if cleaned.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    Ok(SummaryStatistics {
        temp: field_statistics(cleaned, Field::Temp)?,
        humidity: field_statistics(cleaned, Field::Humidity)?,
        pressure: field_statistics(cleaned, Field::Pressure)?,
    })
}

fn field_statistics(
    cleaned: &CleanedDataset,
    field: Field,
) -> Result<FieldStatistics, AnalysisError> {
    let min = cleaned
        .column(field)
        .map(OrderedFloat)
        .min()
        .ok_or(AnalysisError::EmptyDataset)?
        .into_inner();
    let max = cleaned
        .column(field)
        .map(OrderedFloat)
        .max()
        .ok_or(AnalysisError::EmptyDataset)?
        .into_inner();
    let sum: f64 = cleaned.column(field).sum();
    // Summation error can push the mean of near-equal values past an extreme.
    let mean = (sum / cleaned.len() as f64).clamp(min, max);
    Ok(FieldStatistics { mean, min, max })
}
