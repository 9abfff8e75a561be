use serde_json::Value;

/// A numeric cell of a [`crate::Dataset`], resolved once when the dataset is built.
///
/// Cleaning only ever looks at this tag; the raw JSON value is kept for
/// invalid entries so rejections can be reported with what was actually received.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A finite number.
    Present(f64),
    /// The key was absent or `null`.
    Missing,
    /// The key held something that is not a number, e.g. `"N/A"`.
    Invalid(Value),
}

impl FieldValue {
    /// Resolves an optional raw JSON value into a tagged cell.
    ///
    /// Numbers and strings that parse as a finite number are `Present`,
    /// absent keys and `null` are `Missing`, everything else is `Invalid`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use weatherstat::FieldValue;
    ///
    /// assert_eq!(FieldValue::from_json(Some(&json!(1010))), FieldValue::Present(1010.0));
    /// assert_eq!(FieldValue::from_json(Some(&json!(" 15.5 "))), FieldValue::Present(15.5));
    /// assert_eq!(FieldValue::from_json(None), FieldValue::Missing);
    /// assert_eq!(FieldValue::from_json(Some(&json!(null))), FieldValue::Missing);
    /// assert_eq!(
    ///     FieldValue::from_json(Some(&json!("N/A"))),
    ///     FieldValue::Invalid(json!("N/A"))
    /// );
    /// ```
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => FieldValue::Present(v),
                _ => FieldValue::Invalid(Value::Number(n.clone())),
            },
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => FieldValue::Present(v),
                _ => FieldValue::Invalid(Value::String(s.clone())),
            },
            Some(other) => FieldValue::Invalid(other.clone()),
        }
    }

    /// The numeric value, if present.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Present(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            FieldValue::Present(value)
        } else {
            FieldValue::Invalid(Value::String(value.to_string()))
        }
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::from)
    }
}
