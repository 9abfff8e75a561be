//! Temperature unit conversions.

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// # Examples
///
/// ```
/// use weatherstat::celsius_to_kelvin;
///
/// assert_eq!(celsius_to_kelvin(0.0), 273.15);
/// ```
pub fn celsius_to_kelvin(temp_c: f64) -> f64 {
    temp_c + KELVIN_OFFSET
}

pub fn kelvin_to_celsius(temp_k: f64) -> f64 {
    temp_k - KELVIN_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(celsius_to_kelvin(-273.15), 0.0);
        assert!((kelvin_to_celsius(celsius_to_kelvin(21.5)) - 21.5).abs() < 1e-9);
    }
}
