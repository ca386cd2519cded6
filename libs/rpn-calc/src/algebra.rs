//! Algebraic operators
//!
//! Pure functions on `f64`; the engine lifts them onto the stack. Binary
//! functions take `(left, right)` in stack order: `left` was second from
//! the top, `right` was the top.

use crate::error::{CalcError, Result};
use crate::numeric::{finite, is_integral};

pub fn sqrt(x: f64) -> Result<f64> {
    if x < 0.0 {
        return Err(CalcError::domain(format!(
            "square root of negative number {}",
            x
        )));
    }
    Ok(x.sqrt())
}

pub fn sq(x: f64) -> Result<f64> {
    finite(x * x, "square")
}

pub fn add(left: f64, right: f64) -> Result<f64> {
    finite(left + right, "sum")
}

pub fn subtract(left: f64, right: f64) -> Result<f64> {
    finite(left - right, "difference")
}

pub fn multiply(left: f64, right: f64) -> Result<f64> {
    finite(left * right, "product")
}

/// Divisor must not be exactly zero (no tolerance)
pub fn divide(left: f64, right: f64) -> Result<f64> {
    if right == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    finite(left / right, "quotient")
}

/// `base ^ exponent`
pub fn pow(base: f64, exponent: f64) -> Result<f64> {
    if base < 0.0 && !is_integral(exponent) {
        return Err(CalcError::domain(format!(
            "negative base {} with non-integer exponent {}",
            base, exponent
        )));
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::DivideByZero);
    }
    finite(base.powf(exponent), "power")
}

/// `percent` percent of `base`
pub fn percent(base: f64, percent: f64) -> Result<f64> {
    finite(base * percent / 100.0, "percentage")
}

pub fn one_over_x(x: f64) -> Result<f64> {
    if x == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    finite(1.0 / x, "reciprocal")
}

pub fn chs(x: f64) -> f64 {
    -x
}
