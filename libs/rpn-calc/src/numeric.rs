//! Shared numeric helpers for the `f64` domain
//!
//! The engine works on `f64` only. Exact comparisons are used for the
//! preconditions callers can reason about (a divisor of exactly zero, an
//! integral combinatorics argument); the tolerance below is only for derived
//! results that are expected to be zero after rounding.

use crate::error::{CalcError, Result};

/// Tolerance for expected-zero checks on derived results
pub const EPSILON: f64 = 1e-12;

/// Relative/absolute closeness test
///
/// Absolute for values near zero, relative otherwise, so that both
/// `7.000000000000001 ≈ 7` and `1e-17 ≈ 0` hold.
pub fn approx_eq(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    diff <= EPSILON || diff <= EPSILON * a.abs().max(b.abs())
}

/// True when `value` is zero up to [`EPSILON`]
pub fn is_negligible(value: f64) -> bool {
    value.abs() <= EPSILON
}

/// True for finite values without a fractional part
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Reject a non-finite result produced from finite operands
pub fn finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::overflow(format!("{} is not representable", what)))
    }
}
