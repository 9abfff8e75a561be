//! Plausibility limits used to flag anomalous readings.
//!
//! The defaults are fixed, documented thresholds rather than physical limits:
//! temperature −90..=60 °C covers recorded surface extremes with a margin,
//! humidity is a percentage, and pressure 850..=1085 hPa spans the lowest
//! tropical-cyclone and highest recorded sea-level values.

use crate::types::field::Field;

pub const DEFAULT_TEMP_MIN_C: f64 = -90.0;
pub const DEFAULT_TEMP_MAX_C: f64 = 60.0;
pub const DEFAULT_HUMIDITY_MIN: f64 = 0.0;
pub const DEFAULT_HUMIDITY_MAX: f64 = 100.0;
pub const DEFAULT_PRESSURE_MIN_HPA: f64 = 850.0;
pub const DEFAULT_PRESSURE_MAX_HPA: f64 = 1085.0;

/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "invalid range [{}, {}]", min, max);
        Self { min, max }
    }

    /// A range is usable when neither bound is NaN and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Whether `value` lies within the range, bounds included.
    ///
    /// # Examples
    ///
    /// ```
    /// use weatherstat::ValueRange;
    ///
    /// let humidity = ValueRange::new(0.0, 100.0);
    /// assert!(humidity.contains(0.0));
    /// assert!(humidity.contains(100.0));
    /// assert!(!humidity.contains(-5.0));
    /// ```
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-field limits a reading must respect to survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityBounds {
    pub temp: ValueRange,
    pub humidity: ValueRange,
    pub pressure: ValueRange,
}

impl PlausibilityBounds {
    pub fn range(&self, field: Field) -> ValueRange {
        match field {
            Field::Temp => self.temp,
            Field::Humidity => self.humidity,
            Field::Pressure => self.pressure,
        }
    }

    /// The first field whose range is not [valid](ValueRange::is_valid), if any.
    pub fn first_invalid(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| !self.range(*f).is_valid())
    }

    pub fn with_range(mut self, field: Field, range: ValueRange) -> Self {
        match field {
            Field::Temp => self.temp = range,
            Field::Humidity => self.humidity = range,
            Field::Pressure => self.pressure = range,
        }
        self
    }
}

impl Default for PlausibilityBounds {
    fn default() -> Self {
        Self {
            temp: ValueRange::new(DEFAULT_TEMP_MIN_C, DEFAULT_TEMP_MAX_C),
            humidity: ValueRange::new(DEFAULT_HUMIDITY_MIN, DEFAULT_HUMIDITY_MAX),
            pressure: ValueRange::new(DEFAULT_PRESSURE_MIN_HPA, DEFAULT_PRESSURE_MAX_HPA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let bounds = PlausibilityBounds::default();
        assert!(bounds.range(Field::Temp).contains(15.0));
        assert!(!bounds.range(Field::Temp).contains(500.0));
        assert!(!bounds.range(Field::Humidity).contains(100.5));
        assert!(bounds.range(Field::Pressure).contains(1010.0));
        assert!(!bounds.range(Field::Pressure).contains(0.0));
    }

    #[test]
    fn test_invalid_ranges_are_detected() {
        assert!(PlausibilityBounds::default().first_invalid().is_none());

        let inverted = PlausibilityBounds {
            pressure: ValueRange { min: 1085.0, max: 850.0 },
            ..PlausibilityBounds::default()
        };
        assert_eq!(inverted.first_invalid(), Some(Field::Pressure));

        let nan = PlausibilityBounds {
            humidity: ValueRange { min: f64::NAN, max: 100.0 },
            ..PlausibilityBounds::default()
        };
        assert_eq!(nan.first_invalid(), Some(Field::Humidity));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid range")]
    fn test_new_rejects_inverted_range_in_debug_builds() {
        let _ = ValueRange::new(60.0, -90.0);
    }

    #[test]
    fn test_with_range_replaces_one_field() {
        let bounds = PlausibilityBounds::default().with_range(Field::Temp, ValueRange::new(0.0, 10.0));
        assert!(!bounds.range(Field::Temp).contains(15.0));
        assert_eq!(bounds.pressure, PlausibilityBounds::default().pressure);
    }
}
