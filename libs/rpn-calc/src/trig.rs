//! Trigonometric operators and angle unit converters
//!
//! The forward functions read their operand in the current [`AngleMode`];
//! the inverse functions express their result in it.

use std::f64::consts::PI;

use crate::angle::AngleMode;
use crate::error::{CalcError, Result};
use crate::numeric::is_negligible;

pub fn sin(mode: AngleMode, angle: f64) -> f64 {
    mode.to_radians(angle).sin()
}

pub fn cos(mode: AngleMode, angle: f64) -> f64 {
    mode.to_radians(angle).cos()
}

/// Tangent; undefined where the cosine vanishes
pub fn tan(mode: AngleMode, angle: f64) -> Result<f64> {
    let radians = mode.to_radians(angle);
    if is_negligible(radians.cos()) {
        return Err(CalcError::domain(format!(
            "tangent undefined at {} {}",
            angle, mode
        )));
    }
    Ok(radians.tan())
}

pub fn asin(mode: AngleMode, x: f64) -> Result<f64> {
    check_unit_interval("arc sine", x)?;
    Ok(mode.from_radians(x.asin()))
}

pub fn acos(mode: AngleMode, x: f64) -> Result<f64> {
    check_unit_interval("arc cosine", x)?;
    Ok(mode.from_radians(x.acos()))
}

pub fn atan(mode: AngleMode, x: f64) -> f64 {
    mode.from_radians(x.atan())
}

/// Radians to degrees, regardless of mode
pub fn to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Degrees to radians, regardless of mode
pub fn to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn check_unit_interval(what: &str, x: f64) -> Result<()> {
    if (-1.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(CalcError::domain(format!(
            "{} argument {} outside [-1, 1]",
            what, x
        )))
    }
}
