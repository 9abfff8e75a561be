use crate::types::field::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One point-in-time reading for a location, as delivered by a [`crate::ReadingSource`].
///
/// Values are kept exactly as received: `temp`, `humidity` and `pressure` may be
/// numbers, `null`, absent or arbitrary placeholders. They are only interpreted
/// when a [`crate::Dataset`] is built. Unknown extra keys are carried along and ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawReading {
    fields: Map<String, Value>,
}

impl RawReading {
    pub const CITY_KEY: &'static str = "city";
    pub const OBSERVED_AT_KEY: &'static str = "dt";

    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a reading for `city` with no measurements yet.
    pub fn for_city(city: impl Into<String>) -> Self {
        let mut reading = Self::new();
        reading.set(Self::CITY_KEY, Value::String(city.into()));
        reading
    }

    /// Sets a key, replacing any previous value. Chainable.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The raw value of a numeric field, if the key is present at all.
    pub fn field(&self, field: Field) -> Option<&Value> {
        self.get(field.column_name())
    }

    /// The city name, when present and textual.
    pub fn city(&self) -> Option<&str> {
        self.get(Self::CITY_KEY).and_then(Value::as_str)
    }

    /// Observation time from the `dt` unix timestamp, when the source provides one.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.get(Self::OBSERVED_AT_KEY)
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

impl From<Map<String, Value>> for RawReading {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_style_construction() {
        let reading = RawReading::for_city("Lviv")
            .with("temp", 15)
            .with("pressure", "N/A");

        assert_eq!(reading.city(), Some("Lviv"));
        assert_eq!(reading.field(Field::Temp), Some(&json!(15)));
        assert_eq!(reading.field(Field::Pressure), Some(&json!("N/A")));
        assert_eq!(reading.field(Field::Humidity), None);
    }

    #[test]
    fn test_deserializes_transparently() -> Result<(), serde_json::Error> {
        let reading: RawReading =
            serde_json::from_value(json!({"city": "Kyiv", "temp": 20.5, "extra": [1]}))?;
        assert_eq!(reading.city(), Some("Kyiv"));
        assert_eq!(reading.get("extra"), Some(&json!([1])));
        assert_eq!(serde_json::to_value(&reading)?, json!({"city": "Kyiv", "temp": 20.5, "extra": [1]}));
        Ok(())
    }

    #[test]
    fn test_observed_at() {
        let reading = RawReading::for_city("Lviv").with("dt", 1_700_000_000);
        let observed = reading.observed_at().unwrap();
        assert_eq!(observed.timestamp(), 1_700_000_000);
        assert_eq!(RawReading::for_city("Lviv").observed_at(), None);
    }
}
