//! Permutations and combinations
//!
//! Neither count is computed through literal factorials. The product is
//! formed factor by factor in `u128` while it fits, which keeps every result
//! below 2^53 exact, and continues in `f64` once it does not.

use crate::error::{CalcError, Result};
use crate::numeric::{finite, is_integral};

/// P(n, r) = n! / (n − r)!
pub fn permu(n: f64, r: f64) -> Result<f64> {
    let (n, r) = validate("permutations", n, r)?;
    let mut exact: u128 = 1;
    for i in 0..r {
        match exact.checked_mul(u128::from(n - i)) {
            Some(next) => exact = next,
            None => return finite(permu_float(exact as f64, n, i, r), "permutation count"),
        }
    }
    Ok(exact as f64)
}

/// C(n, r) = n! / (r! (n − r)!)
pub fn combi(n: f64, r: f64) -> Result<f64> {
    let (n, r) = validate("combinations", n, r)?;
    // C(n, r) == C(n, n − r); the shorter product is cheaper and more exact
    let r = r.min(n - r);
    let mut exact: u128 = 1;
    for i in 1..=r {
        // exact * (n − r + i) / i stays integral: it is C(n − r + i, i)
        match exact.checked_mul(u128::from(n - r + i)) {
            Some(next) => exact = next / u128::from(i),
            None => return finite(combi_float(exact as f64, n, r, i), "combination count"),
        }
    }
    Ok(exact as f64)
}

fn permu_float(mut acc: f64, n: u64, from: u64, r: u64) -> f64 {
    for i in from..r {
        acc *= (n - i) as f64;
        if acc.is_infinite() {
            break;
        }
    }
    acc
}

fn combi_float(mut acc: f64, n: u64, r: u64, from: u64) -> f64 {
    for i in from..=r {
        acc = acc * (n - r + i) as f64 / i as f64;
        if acc.is_infinite() {
            break;
        }
    }
    acc
}

/// Both arguments must be non-negative integers with r ≤ n
fn validate(what: &str, n: f64, r: f64) -> Result<(u64, u64)> {
    if !is_integral(n) || !is_integral(r) {
        return Err(CalcError::domain(format!(
            "{} need integer arguments, got n = {}, r = {}",
            what, n, r
        )));
    }
    if n < 0.0 || r < 0.0 {
        return Err(CalcError::domain(format!(
            "{} need non-negative arguments, got n = {}, r = {}",
            what, n, r
        )));
    }
    if r > n {
        return Err(CalcError::domain(format!(
            "{} need r <= n, got n = {}, r = {}",
            what, n, r
        )));
    }
    // u64::MAX rounds up to 2^64 as f64
    if n >= u64::MAX as f64 {
        return Err(CalcError::overflow(format!("{} argument {} too large", what, n)));
    }
    Ok((n as u64, r as u64))
}
