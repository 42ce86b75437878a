//! Environmental Derating Curves
//!
//! Stepwise derating of generator output for site altitude and ambient
//! temperature. A curve is a list of `(up_to, factor)` breakpoints ascending
//! in `up_to`: the factor of the first breakpoint whose `up_to` is ≥ the site
//! value applies. Values at or below the first breakpoint get its factor
//! (normally 1.0, the rating baseline).
//!
//! ```text
//! factor
//!  1.00 ┤──────────┐
//!  0.96 ┤          └────┐
//!  0.92 ┤               └────┐
//!       └──────────┬────┬────┬──── altitude (m)
//!                1000 1500 2000
//! ```
//!
//! Factors must be non-increasing along the curve, which keeps the derating
//! monotone: a higher or hotter site never gets a larger factor.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::selector::ceiling_index_by;

/// One breakpoint of a derating curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Upper bound of the band (inclusive)
    pub up_to: f64,
    /// Multiplier applied within the band
    pub factor: f64,
}

/// Stepwise, monotone non-increasing derating curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeratingCurve {
    /// Name used in error payloads (e.g. "altitude derating")
    #[serde(default)]
    pub name: String,
    /// Breakpoints ascending in `up_to`
    pub points: Vec<CurvePoint>,
}

impl DeratingCurve {
    /// Build a curve from `(up_to, factor)` pairs
    pub fn from_pairs(name: impl Into<String>, pairs: &[(f64, f64)]) -> Self {
        DeratingCurve {
            name: name.into(),
            points: pairs
                .iter()
                .map(|&(up_to, factor)| CurvePoint { up_to, factor })
                .collect(),
        }
    }

    /// Factor for a site value.
    ///
    /// Returns `RangeExceeded` if the value lies beyond the last breakpoint.
    pub fn factor_at(&self, value: f64) -> CalcResult<f64> {
        let last = self.points.last().map(|p| p.up_to).unwrap_or(f64::NEG_INFINITY);
        ceiling_index_by(&self.points, |p| p.up_to, value)
            .map(|idx| self.points[idx].factor)
            .ok_or_else(|| CalcError::range_exceeded(self.name.clone(), value, last))
    }

    /// Check the curve is usable: non-empty, ascending bands, factors in
    /// (0, 1] and non-increasing.
    pub fn validate(&self) -> CalcResult<()> {
        if self.points.is_empty() {
            return Err(CalcError::invalid_input(
                self.name.clone(),
                "[]",
                "Derating curve needs at least one breakpoint",
            ));
        }
        for p in &self.points {
            if !(p.up_to.is_finite() && p.factor.is_finite()) || p.factor <= 0.0 || p.factor > 1.0 {
                return Err(CalcError::invalid_input(
                    self.name.clone(),
                    format!("({}, {})", p.up_to, p.factor),
                    "Breakpoints must be finite with factor in (0, 1]",
                ));
            }
        }
        for w in self.points.windows(2) {
            if w[1].up_to <= w[0].up_to || w[1].factor > w[0].factor {
                return Err(CalcError::invalid_input(
                    self.name.clone(),
                    format!(
                        "({}, {}) -> ({}, {})",
                        w[0].up_to, w[0].factor, w[1].up_to, w[1].factor
                    ),
                    "Breakpoints must ascend and factors must not increase",
                ));
            }
        }
        Ok(())
    }
}

/// Altitude derating (m above sea level): 4 % per 500 m band above 1000 m
pub const ALTITUDE_M: [(f64, f64); 9] = [
    (1000.0, 1.00),
    (1500.0, 0.96),
    (2000.0, 0.92),
    (2500.0, 0.88),
    (3000.0, 0.84),
    (3500.0, 0.80),
    (4000.0, 0.76),
    (4500.0, 0.72),
    (5000.0, 0.68),
];

/// Ambient temperature derating (°C): 3 % per 5 °C band above 40 °C
pub const TEMPERATURE_C: [(f64, f64); 5] = [
    (40.0, 1.00),
    (45.0, 0.97),
    (50.0, 0.94),
    (55.0, 0.91),
    (60.0, 0.88),
];

/// Default altitude curve
pub fn altitude_curve() -> DeratingCurve {
    DeratingCurve::from_pairs("altitude derating", &ALTITUDE_M)
}

/// Default temperature curve
pub fn temperature_curve() -> DeratingCurve {
    DeratingCurve::from_pairs("temperature derating", &TEMPERATURE_C)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curves_are_valid() {
        altitude_curve().validate().unwrap();
        temperature_curve().validate().unwrap();
    }

    #[test]
    fn test_baseline_and_bands() {
        let alt = altitude_curve();
        assert_eq!(alt.factor_at(-200.0).unwrap(), 1.0);
        assert_eq!(alt.factor_at(1000.0).unwrap(), 1.0);
        assert_eq!(alt.factor_at(1000.1).unwrap(), 0.96);
        assert_eq!(alt.factor_at(2000.0).unwrap(), 0.92);
        assert_eq!(alt.factor_at(5000.0).unwrap(), 0.68);
        assert!(alt.factor_at(5000.5).is_err());
    }

    #[test]
    fn test_temperature_monotone() {
        let t = temperature_curve();
        let mut prev = f64::INFINITY;
        let mut temp = -40.0;
        while temp <= 60.0 {
            let f = t.factor_at(temp).unwrap();
            assert!(f <= prev);
            prev = f;
            temp += 0.5;
        }
    }

    #[test]
    fn test_validate_rejects_increasing_factor() {
        let bad = DeratingCurve::from_pairs("bad", &[(10.0, 0.9), (20.0, 0.95)]);
        assert!(bad.validate().is_err());
        let bad = DeratingCurve::from_pairs("bad", &[(10.0, 1.0), (10.0, 0.9)]);
        assert!(bad.validate().is_err());
        let empty = DeratingCurve::from_pairs("empty", &[]);
        assert!(empty.validate().is_err());
    }
}
