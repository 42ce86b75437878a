//! # Standard Value Selection
//!
//! Ceiling selection over an ascending table: the smallest standard value
//! that is greater than or equal to a computed requirement. Implemented as a
//! binary search (`partition_point`), so tables must be sorted ascending on
//! the selection key. Every table in [`crate::tables`] is, and the tests in
//! that module check it.
//!
//! A requirement above the largest entry is never clamped: it is reported as
//! [`CalcError::RangeExceeded`] naming the table.

use crate::errors::{CalcError, CalcResult};
use crate::tables::StandardTable;

/// Index of the first entry whose key is ≥ `required`, if any.
///
/// # Example
/// ```rust
/// use amp_core::tables::selector::ceiling_index_by;
///
/// let ratings = [6.0, 10.0, 16.0, 20.0];
/// assert_eq!(ceiling_index_by(&ratings, |v| *v, 16.0), Some(2));
/// assert_eq!(ceiling_index_by(&ratings, |v| *v, 16.04), Some(3));
/// assert_eq!(ceiling_index_by(&ratings, |v| *v, 25.0), None);
/// ```
pub fn ceiling_index_by<T>(entries: &[T], key: impl Fn(&T) -> f64, required: f64) -> Option<usize> {
    let idx = entries.partition_point(|entry| key(entry) < required);
    (idx < entries.len()).then_some(idx)
}

/// Index of the first entry of `table` that is ≥ `required`.
pub fn select_ceiling_index(table: &StandardTable, required: f64) -> CalcResult<usize> {
    if required.is_nan() {
        return Err(CalcError::non_finite(format!("required {}", table.name)));
    }
    ceiling_index_by(table.values, |v| *v, required)
        .ok_or_else(|| CalcError::range_exceeded(table.name, required, table.max()))
}

/// Smallest standard value of `table` that is ≥ `required`.
///
/// # Example
/// ```rust
/// use amp_core::tables::{selector::select_ceiling, ratings::BREAKERS_A};
///
/// assert_eq!(select_ceiling(&BREAKERS_A, 16.04).unwrap(), 20.0);
/// assert_eq!(select_ceiling(&BREAKERS_A, 16.0).unwrap(), 16.0);
/// assert!(select_ceiling(&BREAKERS_A, 700.0).is_err());
/// ```
pub fn select_ceiling(table: &StandardTable, required: f64) -> CalcResult<f64> {
    select_ceiling_index(table, required).map(|idx| table.values[idx])
}
