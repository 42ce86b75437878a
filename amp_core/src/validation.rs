//! # Input Validation
//!
//! Field-identified checks shared by every calculator's `validate()`.
//! Each check tests finiteness first, so a NaN never reaches a range
//! comparison (where it would silently pass).

use crate::errors::{CalcError, CalcResult};

/// Value must be finite.
pub fn finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(field))
    }
}

/// Value must be finite and strictly positive.
pub fn positive(field: &str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive",
        ));
    }
    Ok(value)
}

/// Value must be finite and zero or greater.
pub fn non_negative(field: &str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value cannot be negative",
        ));
    }
    Ok(value)
}

/// Value must be finite and within `[min, max]`.
pub fn in_range(field: &str, value: f64, min: f64, max: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

/// Value must be finite, strictly positive and at most `max`.
pub fn positive_at_most(field: &str, value: f64, max: f64) -> CalcResult<f64> {
    positive(field, value)?;
    if value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value exceeds the supported maximum of {}", max),
        ));
    }
    Ok(value)
}

/// Power factor must lie in (0, 1].
pub fn power_factor(field: &str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value <= 0.0 || value > 1.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Power factor must be greater than 0 and at most 1",
        ));
    }
    Ok(value)
}

/// Integer value must be one of a closed set.
pub fn one_of(field: &str, value: u32, allowed: &[u32]) -> CalcResult<u32> {
    if allowed.contains(&value) {
        return Ok(value);
    }
    let expected: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
    let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
    Err(CalcError::unrecognized_option(field, value.to_string(), &expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_non_finite_not_in_range() {
        let err = in_range("pf", f64::NAN, 0.0, 1.0).unwrap_err();
        assert_eq!(err, CalcError::non_finite("pf"));
        let err = positive("load_kw", f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE");
    }

    #[test]
    fn test_positive_rejects_zero() {
        assert!(positive("length_m", 0.0).is_err());
        assert_eq!(positive("length_m", 0.5).unwrap(), 0.5);
        assert!(non_negative("surge", 0.0).is_ok());
    }

    #[test]
    fn test_power_factor_bounds() {
        assert!(power_factor("pf", 1.0).is_ok());
        assert!(power_factor("pf", 0.0).is_err());
        assert!(power_factor("pf", 1.01).is_err());
    }

    #[test]
    fn test_one_of_reports_expected_set() {
        assert_eq!(one_of("poles", 4, &[2, 4, 6, 8]).unwrap(), 4);
        match one_of("poles", 5, &[2, 4, 6, 8]).unwrap_err() {
            CalcError::UnrecognizedOption { field, value, expected } => {
                assert_eq!(field, "poles");
                assert_eq!(value, "5");
                assert_eq!(expected, "2, 4, 6, 8");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_positive_at_most() {
        assert!(positive_at_most("length_m", 10_001.0, 10_000.0).is_err());
        assert!(positive_at_most("length_m", 10_000.0, 10_000.0).is_ok());
    }
}
