//! Number and stack formatting
//!
//! Pure string rendering; colour is added by the caller.

use rpn_calc::{Calculator, StatRegister};

use crate::config::DisplayConfig;

/// Format one value in fixed notation, falling back to scientific
///
/// Scientific notation is used when `|value|` reaches the threshold or when a
/// non-zero value would otherwise print as all zeros.
pub fn format_value(value: f64, config: &DisplayConfig) -> String {
    if value == 0.0 {
        // no "-0.000"
        return format!("{:.*}", config.digits, 0.0);
    }
    let fixed = format!("{:.*}", config.digits, value);
    if value.abs() >= config.sci_threshold || prints_as_zero(&fixed) {
        format!("{:.*e}", config.digits, value)
    } else {
        fixed
    }
}

fn prints_as_zero(fixed: &str) -> bool {
    fixed
        .trim_start_matches('-')
        .chars()
        .all(|c| c == '0' || c == '.')
}

/// Stack lines, top last, each prefixed with its level (`1:` is the top)
pub fn stack_lines(stack: &[f64], config: &DisplayConfig) -> Vec<String> {
    let depth = stack.len();
    let width = depth.to_string().len();
    stack
        .iter()
        .enumerate()
        .map(|(i, value)| {
            format!(
                "{:>width$}: {}",
                depth - i,
                format_value(*value, config),
                width = width
            )
        })
        .collect()
}

/// Statistics registers 2..=7 as `R2 n = 5.000000`
pub fn register_lines(calc: &Calculator, config: &DisplayConfig) -> Vec<String> {
    StatRegister::ALL
        .iter()
        .map(|register| {
            format!(
                "R{} {:<4}= {}",
                register.index(),
                register.label(),
                format_value(calc.stat(*register), config)
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn fix(digits: usize) -> DisplayConfig {
        DisplayConfig {
            digits,
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_value(5.0, &fix(6)), "5.000000");
        assert_eq!(format_value(-2.25, &fix(2)), "-2.25");
        assert_eq!(format_value(270725.0, &fix(0)), "270725");
        assert_eq!(
            format_value(std::f64::consts::PI, &fix(15)),
            "3.141592653589793"
        );
    }

    #[test]
    fn test_zero_has_no_sign() {
        assert_eq!(format_value(-0.0, &fix(3)), "0.000");
        assert_eq!(format_value(0.0, &fix(0)), "0");
    }

    #[test]
    fn test_scientific_for_large_values() {
        assert_eq!(format_value(1e10, &fix(2)), "1.00e10");
        assert_eq!(format_value(-2.5e12, &fix(1)), "-2.5e12");
        assert_eq!(format_value(9_999_999_999.0, &fix(0)), "9999999999");
    }

    #[test]
    fn test_scientific_for_values_hidden_by_rounding() {
        assert_eq!(format_value(4.0e-16, &fix(6)), "4.000000e-16");
        assert_eq!(format_value(-1.5e-9, &fix(2)), "-1.50e-9");
        assert_eq!(format_value(0.25, &fix(2)), "0.25");
    }

    #[test]
    fn test_stack_lines_top_last() {
        let lines = stack_lines(&[1.0, 2.0, 3.0], &fix(1));
        assert_eq!(lines, vec!["3: 1.0", "2: 2.0", "1: 3.0"]);
        assert!(stack_lines(&[], &fix(1)).is_empty());
    }

    #[test]
    fn test_stack_lines_align_levels() {
        let stack: Vec<f64> = (0..10).map(f64::from).collect();
        let lines = stack_lines(&stack, &fix(0));
        assert_eq!(lines[0], "10: 0");
        assert_eq!(lines[9], " 1: 9");
    }

    #[test]
    fn test_register_lines() {
        let mut calc = Calculator::new();
        calc.evaluate("1 2 S+ 3 4 S+").unwrap();
        let lines = register_lines(&calc, &fix(1));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "R2 n   = 2.0");
        assert_eq!(lines[1], "R3 Σx  = 4.0");
        assert_eq!(lines[5], "R7 Σxy = 14.0");
    }
}
