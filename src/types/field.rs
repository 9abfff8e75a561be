//! The three numeric columns every reading is cleaned and summarized over.

use std::fmt;

/// A numeric field of a reading.
///
/// The set of fields is fixed, so datasets store them positionally instead of
/// inferring a schema at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Air temperature, degrees Celsius.
    Temp,
    /// Relative humidity, percent.
    Humidity,
    /// Atmospheric pressure, hPa.
    Pressure,
}

impl Field {
    /// All numeric fields in the order rules are checked and columns are serialized.
    pub const ALL: [Field; 3] = [Field::Temp, Field::Humidity, Field::Pressure];

    /// Key of this field in a raw reading and in the exported summary.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Temp => "temp",
            Field::Humidity => "humidity",
            Field::Pressure => "pressure",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Field::Temp => 0,
            Field::Humidity => 1,
            Field::Pressure => 2,
        }
    }
}

/// Formats a `Field` using its column name.
///
/// # Examples
///
/// ```
/// use weatherstat::Field;
///
/// assert_eq!(Field::Humidity.to_string(), "humidity");
/// ```
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
