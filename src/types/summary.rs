use crate::types::field::Field;
use serde::{Deserialize, Serialize};

/// Mean, minimum and maximum of one field over a cleaned batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FieldStatistics {
    /// Rounds all three values half away from zero to `decimals` places.
    ///
    /// Rounding is monotone, so `min <= mean <= max` still holds afterwards.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            mean: round_to(self.mean, decimals),
            min: round_to(self.min, decimals),
            max: round_to(self.max, decimals),
        }
    }
}

/// Summary of a cleaned batch, keyed by field.
///
/// Serializes to `{"temp": {...}, "humidity": {...}, "pressure": {...}}`, each
/// entry holding `mean`, `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub temp: FieldStatistics,
    pub humidity: FieldStatistics,
    pub pressure: FieldStatistics,
}

impl SummaryStatistics {
    pub fn get(&self, field: Field) -> &FieldStatistics {
        match field {
            Field::Temp => &self.temp,
            Field::Humidity => &self.humidity,
            Field::Pressure => &self.pressure,
        }
    }

    /// Iterates `(field, statistics)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldStatistics)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            temp: self.temp.rounded(decimals),
            humidity: self.humidity.rounded(decimals),
            pressure: self.pressure.rounded(decimals),
        }
    }
}

/// Past this many decimal places an `f64` has no digits left to round.
const MAX_ROUNDING_DECIMALS: u32 = 15;

fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals > MAX_ROUNDING_DECIMALS {
        return value;
    }
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let factor = 10f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
