//! Conversion of raw readings into a typed, row-oriented dataset.

use crate::analysis::error::{json_kind, ValidationError};
use crate::types::field::Field;
use crate::types::field_value::FieldValue;
use crate::types::raw_reading::RawReading;
use serde_json::Value;

/// One reading with its numeric fields resolved to [`FieldValue`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub city: String,
    values: [FieldValue; 3],
}

impl Row {
    pub fn new(
        city: impl Into<String>,
        temp: impl Into<FieldValue>,
        humidity: impl Into<FieldValue>,
        pressure: impl Into<FieldValue>,
    ) -> Self {
        Self {
            city: city.into(),
            values: [temp.into(), humidity.into(), pressure.into()],
        }
    }

    pub fn value(&self, field: Field) -> &FieldValue {
        &self.values[field.index()]
    }

    fn from_reading(index: usize, reading: &RawReading) -> Result<Self, ValidationError> {
        let city = match reading.get(RawReading::CITY_KEY) {
            None => return Err(ValidationError::MissingCity { index }),
            Some(Value::String(city)) => city.clone(),
            Some(_) => return Err(ValidationError::InvalidCity { index }),
        };
        Ok(Self {
            city,
            values: Field::ALL.map(|f| FieldValue::from_json(reading.field(f))),
        })
    }
}

/// An ordered table with one row per input reading and the fixed columns
/// `city`, `temp`, `humidity` and `pressure`.
///
/// A column counts as defined when at least one source reading carried its
/// key, even with a `null` value. Cleaning uses this to tell a batch with a
/// malformed schema apart from one whose rows are merely all invalid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    defined: [bool; 3],
}

impl Dataset {
    /// Builds a dataset from readings, preserving their order.
    ///
    /// Every reading must carry a textual `city`. Absent numeric keys are
    /// recorded as [`FieldValue::Missing`], never defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCity`] or [`ValidationError::InvalidCity`]
    /// for the first reading with no usable `city`.
    ///
    /// # Examples
    ///
    /// ```
    /// use weatherstat::{Dataset, Field, FieldValue, RawReading};
    ///
    /// let readings = vec![
    ///     RawReading::for_city("Lviv").with("temp", 15).with("humidity", 70).with("pressure", 1010),
    ///     RawReading::for_city("Lviv").with("pressure", "N/A"),
    /// ];
    /// let dataset = Dataset::from_readings(&readings)?;
    ///
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.rows()[0].value(Field::Temp), &FieldValue::Present(15.0));
    /// assert_eq!(dataset.rows()[1].value(Field::Temp), &FieldValue::Missing);
    /// # Ok::<(), weatherstat::ValidationError>(())
    /// ```
    pub fn from_readings(readings: &[RawReading]) -> Result<Self, ValidationError> {
        let mut defined = [false; 3];
        let rows = readings
            .iter()
            .enumerate()
            .map(|(index, reading)| {
                for field in Field::ALL {
                    defined[field.index()] |= reading.contains_key(field.column_name());
                }
                Row::from_reading(index, reading)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows, defined })
    }

    /// Builds a dataset from an untyped JSON payload, which must be an array of objects.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let items = value
            .as_array()
            .ok_or_else(|| ValidationError::NotASequence(json_kind(value)))?;
        let readings = items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(RawReading::from(map.clone())),
                other => Err(ValidationError::NotAMapping {
                    index,
                    found: json_kind(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_readings(&readings)
    }

    /// Builds a dataset from already-typed rows. All columns count as defined.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            defined: [true; 3],
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, field: Field) -> bool {
        self.defined[field.index()]
    }

    /// Values of one column, in row order.
    pub fn column(&self, field: Field) -> impl Iterator<Item = &FieldValue> + '_ {
        self.rows.iter().map(move |row| row.value(field))
    }
}
