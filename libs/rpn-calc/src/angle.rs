//! Angular unit mode

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Unit in which trigonometric operands and results are expressed
///
/// Changed only by the explicit `RAD` / `DEG` operators. The `toDEG` /
/// `toRAD` converters ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    /// Convert an angle expressed in this mode to radians
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle.to_radians(),
        }
    }

    /// Express an angle given in radians in this mode
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleMode::Radians => radians,
            AngleMode::Degrees => radians.to_degrees(),
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Radians => write!(f, "RAD"),
            AngleMode::Degrees => write!(f, "DEG"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rad" | "radians" => Ok(AngleMode::Radians),
            "deg" | "degrees" => Ok(AngleMode::Degrees),
            other => Err(CalcError::config(format!("Unknown angle mode: {}", other))),
        }
    }
}
