//! Running statistics over (x, y) data pairs
//!
//! Only the six sums are kept, never the samples: O(1) memory and O(1) per
//! accumulated pair. Every derived quantity is recomputed from the sums on
//! demand, so nothing can go stale between calls.
//!
//! The sums are plain running totals rather than Welford-style updates
//! because they are observable through the register file (registers 2..=7).

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::numeric::finite;

/// Snapshot of the statistics registers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSums {
    pub count: f64,
    pub sum_x: f64,
    pub sum_x2: f64,
    pub sum_y: f64,
    pub sum_y2: f64,
    pub sum_xy: f64,
}

/// Least-squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn estimate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl StatSums {
    /// Sums after folding in one more pair
    ///
    /// Fails with `Overflow` if any sum leaves the `f64` range; `self` is
    /// untouched either way.
    pub fn accumulate(&self, x: f64, y: f64) -> Result<StatSums> {
        Ok(StatSums {
            count: self.count + 1.0,
            sum_x: finite(self.sum_x + x, "Σx")?,
            sum_x2: finite(self.sum_x2 + x * x, "Σx²")?,
            sum_y: finite(self.sum_y + y, "Σy")?,
            sum_y2: finite(self.sum_y2 + y * y, "Σy²")?,
            sum_xy: finite(self.sum_xy + x * y, "Σxy")?,
        })
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn sum_x(&self) -> f64 {
        self.sum_x
    }

    pub fn sum_x2(&self) -> f64 {
        self.sum_x2
    }

    pub fn sum_y(&self) -> f64 {
        self.sum_y
    }

    pub fn sum_y2(&self) -> f64 {
        self.sum_y2
    }

    pub fn sum_xy(&self) -> f64 {
        self.sum_xy
    }

    /// `(x̄, ȳ)`
    pub fn means(&self) -> Result<(f64, f64)> {
        self.require(1)?;
        Ok((
            finite(self.sum_x / self.count, "mean x")?,
            finite(self.sum_y / self.count, "mean y")?,
        ))
    }

    /// Sample standard deviations `(sx, sy)`
    ///
    /// `sqrt((Σx² − (Σx)²/n) / (n − 1))`. Cancellation can leave the
    /// numerator a hair below zero for constant data; it is clamped to 0.
    pub fn std_devs(&self) -> Result<(f64, f64)> {
        self.require(2)?;
        let sx = sample_std_dev(self.sum_x, self.sum_x2, self.count, "variance x")?;
        let sy = sample_std_dev(self.sum_y, self.sum_y2, self.count, "variance y")?;
        Ok((sx, sy))
    }

    /// Least-squares fit of y on x
    ///
    /// Singular only when the denominator is exactly zero. Constant x values
    /// that are not exact binary fractions can round to a tiny non-zero
    /// denominator and yield a fit.
    pub fn regression(&self) -> Result<Regression> {
        self.require(1)?;
        let n = self.count;
        let denominator = finite(
            n * self.sum_x2 - self.sum_x * self.sum_x,
            "regression denominator",
        )?;
        if denominator == 0.0 {
            return Err(CalcError::SingularRegression);
        }
        let slope = finite(
            (n * self.sum_xy - self.sum_x * self.sum_y) / denominator,
            "regression slope",
        )?;
        let intercept = finite(
            self.sum_y / n - slope * self.sum_x / n,
            "regression intercept",
        )?;
        Ok(Regression { slope, intercept })
    }

    fn require(&self, needed: usize) -> Result<()> {
        if self.count < needed as f64 {
            return Err(CalcError::insufficient(needed, self.count as usize));
        }
        Ok(())
    }
}

fn sample_std_dev(sum: f64, sum_sq: f64, n: f64, what: &str) -> Result<f64> {
    let variance = finite((sum_sq - sum * sum / n) / (n - 1.0), what)?;
    Ok(variance.max(0.0).sqrt())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::numeric::approx_eq;

    const PAIRS: [(f64, f64); 5] = [
        (4.63, 0.0),
        (4.78, 20.0),
        (6.61, 40.0),
        (7.21, 60.0),
        (7.78, 80.0),
    ];

    fn sample_sums() -> StatSums {
        PAIRS
            .iter()
            .fold(StatSums::default(), |sums, (x, y)| {
                sums.accumulate(*x, *y).unwrap()
            })
    }

    #[test]
    fn test_single_pair_sums() {
        let sums = StatSums::default().accumulate(3.0, -2.0).unwrap();
        assert_eq!(sums.count(), 1.0);
        assert_eq!(sums.sum_x(), 3.0);
        assert_eq!(sums.sum_x2(), 9.0);
        assert_eq!(sums.sum_y(), -2.0);
        assert_eq!(sums.sum_y2(), 4.0);
        assert_eq!(sums.sum_xy(), -6.0);
    }

    #[test]
    fn test_means() {
        let (mx, my) = sample_sums().means().unwrap();
        assert!(approx_eq(mx, 31.01 / 5.0));
        assert!(approx_eq(my, 40.0));
    }

    #[test]
    fn test_std_devs() {
        let (sx, sy) = sample_sums().std_devs().unwrap();
        // Two-pass reference values
        let mean = 31.01 / 5.0;
        let ss: f64 = PAIRS.iter().map(|(x, _)| (x - mean).powi(2)).sum();
        assert!((sx - (ss / 4.0).sqrt()).abs() < 1e-9);
        assert!((sy - 1000.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_std_devs_constant_data() {
        let sums = (0..3).fold(StatSums::default(), |s, _| {
            s.accumulate(0.1, 0.1).unwrap()
        });
        let (sx, sy) = sums.std_devs().unwrap();
        assert!(sx.abs() < 1e-6 && sy.abs() < 1e-6);
        assert!(!sx.is_nan());
    }

    #[test]
    fn test_insufficient_data() {
        let empty = StatSums::default();
        assert_eq!(
            empty.means(),
            Err(CalcError::InsufficientData {
                needed: 1,
                count: 0
            })
        );
        let one = empty.accumulate(1.0, 1.0).unwrap();
        assert_eq!(
            one.std_devs(),
            Err(CalcError::InsufficientData {
                needed: 2,
                count: 1
            })
        );
    }

    #[test]
    fn test_regression_exact_line() {
        // y = 2x + 1
        let sums = [0.0, 1.0, 2.0, 3.0]
            .iter()
            .fold(StatSums::default(), |s, x| {
                s.accumulate(*x, 2.0 * x + 1.0).unwrap()
            });
        let fit = sums.regression().unwrap();
        assert!(approx_eq(fit.slope, 2.0));
        assert!(approx_eq(fit.intercept, 1.0));
        assert!(approx_eq(fit.estimate(10.0), 21.0));
    }

    #[test]
    fn test_regression_matches_closed_form() {
        let sums = sample_sums();
        let fit = sums.regression().unwrap();
        let n = 5.0;
        let sx: f64 = PAIRS.iter().map(|p| p.0).sum();
        let sy: f64 = PAIRS.iter().map(|p| p.1).sum();
        let sxx: f64 = PAIRS.iter().map(|p| p.0 * p.0).sum();
        let sxy: f64 = PAIRS.iter().map(|p| p.0 * p.1).sum();
        let m = (n * sxy - sx * sy) / (n * sxx - sx * sx);
        let b = sy / n - m * sx / n;
        assert!(approx_eq(fit.slope, m));
        assert!(approx_eq(fit.intercept, b));
        assert!(approx_eq(fit.estimate(70.0), m * 70.0 + b));
    }

    #[test]
    fn test_singular_regression() {
        let sums = StatSums::default()
            .accumulate(2.0, 1.0)
            .and_then(|s| s.accumulate(2.0, 5.0))
            .unwrap();
        assert_eq!(sums.regression(), Err(CalcError::SingularRegression));
        assert_eq!(
            StatSums::default().regression(),
            Err(CalcError::InsufficientData {
                needed: 1,
                count: 0
            })
        );
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let sums = StatSums::default().accumulate(1.0, 2.0).unwrap();
        let json = serde_json::to_value(sums).unwrap();
        assert_eq!(json["count"], 1.0);
        assert_eq!(json["sum_xy"], 2.0);
        assert_eq!(json["sum_y2"], 4.0);
    }

    fn sums_of(pairs: &[(f64, f64)]) -> StatSums {
        pairs.iter().fold(StatSums::default(), |sums, (x, y)| {
            sums.accumulate(*x, *y).unwrap()
        })
    }

    #[test]
    fn test_accumulate_rejects_overflowing_sums() {
        let sums = sums_of(&[(1.0, 2.0)]);
        assert!(matches!(
            sums.accumulate(1e200, 1.0),
            Err(CalcError::Overflow(_))
        ));
        assert!(matches!(
            sums.accumulate(1.0, -1e155),
            Err(CalcError::Overflow(_))
        ));
        assert!(matches!(
            sums.accumulate(f64::MAX, 0.0),
            Err(CalcError::Overflow(_))
        ));
        // the sums it was called on are unchanged
        assert_eq!(sums, sums_of(&[(1.0, 2.0)]));
    }

    #[test]
    fn test_derived_results_overflow_instead_of_nan() {
        // Σx² still fits, (Σx)² and n·Σx² do not
        let sums = sums_of(&[(9e153, 1.0), (9e153, 2.0)]);
        assert!(sums.sum_x2().is_finite());
        assert!(matches!(sums.std_devs(), Err(CalcError::Overflow(_))));
        assert!(matches!(sums.regression(), Err(CalcError::Overflow(_))));

        let (mx, my) = sums.means().unwrap();
        assert_eq!(mx, 9e153);
        assert_eq!(my, 1.5);
    }

    #[test]
    fn test_constant_x_rounding_is_not_singular() {
        // 0.7 is not an exact binary fraction; the denominator rounds to
        // about -1.8e-15 rather than 0
        let sums = sums_of(&[(0.7, 0.0), (0.7, 1.0), (0.7, 2.0), (0.7, 3.0), (0.7, 4.0)]);
        let fit = sums.regression().unwrap();
        assert!(fit.slope.is_finite());

        // exact binary fractions cancel to exactly zero
        let sums = sums_of(&[(0.5, 0.0), (0.5, 1.0), (0.5, 2.0)]);
        assert_eq!(sums.regression(), Err(CalcError::SingularRegression));
    }
}
