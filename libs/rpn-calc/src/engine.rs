//! Calculator - the RPN engine
//!
//! Owns the operand stack, the register file and the angular mode. Every
//! operator is a method that validates its preconditions, computes its
//! result and only then mutates state, so an `Err` always leaves the engine
//! as it was.

use std::f64::consts::PI;

use tracing::debug;

use crate::algebra;
use crate::angle::AngleMode;
use crate::combinatorics;
use crate::config::EngineConfig;
use crate::error::{CalcError, Result};
use crate::numeric::finite;
use crate::op::{tokenize, Op, Token};
use crate::registers::{RegisterFile, StatRegister};
use crate::stack::Stack;
use crate::stats::StatSums;
use crate::trig;

/// RPN calculator engine
///
/// # Example
/// ```
/// use rpn_calc::Calculator;
///
/// let mut calc = Calculator::new();
/// calc.push(10.0).unwrap();
/// calc.push(4.0).unwrap();
/// calc.subtract().unwrap(); // 10 - 4
/// assert_eq!(calc.peek(), Some(6.0));
///
/// assert_eq!(calc.evaluate("52 4 COMBI").unwrap(), Some(270725.0));
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    stack: Stack,
    registers: RegisterFile,
    mode: AngleMode,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            stack: Stack::new(config.stack_capacity, config.overflow),
            registers: RegisterFile::new(config.register_count),
            mode: config.angle_mode,
        }
    }

    /// Create an engine from a validated configuration
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stack: Stack::new(config.stack_capacity, config.overflow),
            registers: RegisterFile::new(config.register_count),
            mode: config.angle_mode,
        })
    }

    // ========================================================================
    // Inspection (read-only, for display layers)
    // ========================================================================

    /// Stack contents ordered bottom to top (top last)
    pub fn stack(&self) -> &[f64] {
        self.stack.as_slice()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.stack.capacity()
    }

    pub fn peek(&self) -> Option<f64> {
        self.stack.peek()
    }

    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    /// Register value by index
    pub fn register(&self, index: usize) -> Result<f64> {
        self.registers.get(index)
    }

    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    /// Statistics sums by name
    pub fn stat(&self, register: StatRegister) -> f64 {
        self.registers.stat(register)
    }

    pub fn stats(&self) -> StatSums {
        self.registers.stat_sums()
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Apply one operator
    pub fn apply(&mut self, op: Op) -> Result<()> {
        let outcome = match op {
            Op::Sqrt => self.sqrt(),
            Op::Sq => self.sq(),
            Op::Add => self.add(),
            Op::Subtract => self.subtract(),
            Op::Multiply => self.multiply(),
            Op::Divide => self.divide(),
            Op::Pow => self.pow(),
            Op::Percent => self.percent(),
            Op::OneOverX => self.one_over_x(),
            Op::Chs => self.chs(),
            Op::Rad => {
                self.rad();
                Ok(())
            },
            Op::Deg => {
                self.deg();
                Ok(())
            },
            Op::Sin => self.sin(),
            Op::Cos => self.cos(),
            Op::Tan => self.tan(),
            Op::Asin => self.asin(),
            Op::Acos => self.acos(),
            Op::Atan => self.atan(),
            Op::ToDeg => self.to_deg(),
            Op::ToRad => self.to_rad(),
            Op::ClearStats => {
                self.clear_stats();
                Ok(())
            },
            Op::SigmaPlus => self.sigma_plus(),
            Op::MeanValues => self.mean_values(),
            Op::StdDev => self.std_dev(),
            Op::LinRegr => self.lin_regr(),
            Op::LinEstim => self.lin_estim(),
            Op::Permu => self.permu(),
            Op::Combi => self.combi(),
            Op::Dup => self.dup(),
            Op::Drop => self.drop_x().map(|_| ()),
            Op::Swap => self.swap(),
            Op::ClearStack => {
                self.clear_stack();
                Ok(())
            },
            Op::Pi => self.push_pi(),
            Op::Store(index) => self.store(index),
            Op::Recall(index) => self.recall(index),
        };

        match &outcome {
            Ok(()) => debug!(
                op = %op,
                depth = self.stack.len(),
                top = ?self.stack.peek(),
                "apply"
            ),
            Err(e) => debug!(op = %op, error = %e, "apply rejected"),
        }
        outcome
    }

    /// Tokenize `line` and apply it left to right
    ///
    /// Stops at the first failing token. Tokens before it stay applied; the
    /// failing one leaves no trace. Returns the top of stack afterwards.
    pub fn evaluate(&mut self, line: &str) -> Result<Option<f64>> {
        for token in tokenize(line)? {
            match token {
                Token::Number(value) => self.push(value)?,
                Token::Op(op) => self.apply(op)?,
            }
        }
        Ok(self.stack.peek())
    }

    // ========================================================================
    // Stack
    // ========================================================================

    pub fn push(&mut self, value: f64) -> Result<()> {
        self.stack.push(value)
    }

    pub fn pop(&mut self) -> Result<f64> {
        self.stack.pop()
    }

    /// Duplicate the top value (ENTER)
    pub fn dup(&mut self) -> Result<()> {
        let x = self.stack.top_n(1)?[0];
        self.stack.replace(1, &[x, x])
    }

    /// Discard the top value
    pub fn drop_x(&mut self) -> Result<f64> {
        self.stack.pop()
    }

    /// Exchange the top two values (X<>Y)
    pub fn swap(&mut self) -> Result<()> {
        let operands = self.stack.top_n(2)?;
        let (y, x) = (operands[0], operands[1]);
        self.stack.replace(2, &[x, y])
    }

    pub fn clear_stack(&mut self) {
        self.stack.clear();
    }

    pub fn push_pi(&mut self) -> Result<()> {
        self.stack.push(PI)
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    pub fn sqrt(&mut self) -> Result<()> {
        self.stack.unary(algebra::sqrt).map(|_| ())
    }

    pub fn sq(&mut self) -> Result<()> {
        self.stack.unary(algebra::sq).map(|_| ())
    }

    pub fn add(&mut self) -> Result<()> {
        self.stack.binary(algebra::add).map(|_| ())
    }

    pub fn subtract(&mut self) -> Result<()> {
        self.stack.binary(algebra::subtract).map(|_| ())
    }

    pub fn multiply(&mut self) -> Result<()> {
        self.stack.binary(algebra::multiply).map(|_| ())
    }

    pub fn divide(&mut self) -> Result<()> {
        self.stack.binary(algebra::divide).map(|_| ())
    }

    pub fn pow(&mut self) -> Result<()> {
        self.stack.binary(algebra::pow).map(|_| ())
    }

    /// `base percent %` → `base * percent / 100`, base consumed
    pub fn percent(&mut self) -> Result<()> {
        self.stack.binary(algebra::percent).map(|_| ())
    }

    pub fn one_over_x(&mut self) -> Result<()> {
        self.stack.unary(algebra::one_over_x).map(|_| ())
    }

    pub fn chs(&mut self) -> Result<()> {
        self.stack.unary(|x| Ok(algebra::chs(x))).map(|_| ())
    }

    // ========================================================================
    // Angular mode and trigonometry
    // ========================================================================

    pub fn rad(&mut self) {
        self.mode = AngleMode::Radians;
    }

    pub fn deg(&mut self) {
        self.mode = AngleMode::Degrees;
    }

    pub fn sin(&mut self) -> Result<()> {
        let mode = self.mode;
        self.stack.unary(|x| Ok(trig::sin(mode, x))).map(|_| ())
    }

    pub fn cos(&mut self) -> Result<()> {
        let mode = self.mode;
        self.stack.unary(|x| Ok(trig::cos(mode, x))).map(|_| ())
    }

    pub fn tan(&mut self) -> Result<()> {
        let mode = self.mode;
        self.stack.unary(|x| trig::tan(mode, x)).map(|_| ())
    }

    pub fn asin(&mut self) -> Result<()> {
        let mode = self.mode;
        self.stack.unary(|x| trig::asin(mode, x)).map(|_| ())
    }

    pub fn acos(&mut self) -> Result<()> {
        let mode = self.mode;
        self.stack.unary(|x| trig::acos(mode, x)).map(|_| ())
    }

    pub fn atan(&mut self) -> Result<()> {
        let mode = self.mode;
        self.stack.unary(|x| Ok(trig::atan(mode, x))).map(|_| ())
    }

    /// Radians to degrees; the mode is neither read nor changed
    pub fn to_deg(&mut self) -> Result<()> {
        self.stack.unary(|x| Ok(trig::to_deg(x))).map(|_| ())
    }

    /// Degrees to radians; the mode is neither read nor changed
    pub fn to_rad(&mut self) -> Result<()> {
        self.stack.unary(|x| Ok(trig::to_rad(x))).map(|_| ())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    pub fn clear_stats(&mut self) {
        self.registers.clear_stats();
    }

    /// Fold `x y` (x second from top, y on top) into the sums, push n
    pub fn sigma_plus(&mut self) -> Result<()> {
        let operands = self.stack.top_n(2)?;
        let (x, y) = (operands[0], operands[1]);
        let sums = self.registers.stat_sums().accumulate(x, y)?;
        self.stack.replace(2, &[sums.count])?;
        self.registers.commit_stats(&sums);
        debug!(n = sums.count, x, y, "sigma_plus");
        Ok(())
    }

    /// Push x̄ then ȳ (ȳ ends on top)
    pub fn mean_values(&mut self) -> Result<()> {
        let (mean_x, mean_y) = self.stats().means()?;
        self.stack.replace(0, &[mean_x, mean_y])
    }

    /// Push sample standard deviations sx then sy (sy ends on top)
    pub fn std_dev(&mut self) -> Result<()> {
        let (sx, sy) = self.stats().std_devs()?;
        self.stack.replace(0, &[sx, sy])
    }

    /// Push slope then intercept (intercept ends on top)
    pub fn lin_regr(&mut self) -> Result<()> {
        let fit = self.stats().regression()?;
        self.stack.replace(0, &[fit.slope, fit.intercept])
    }

    /// Replace x with the regression estimate for it
    pub fn lin_estim(&mut self) -> Result<()> {
        let x = self.stack.top_n(1)?[0];
        let fit = self.stats().regression()?;
        let y = finite(fit.estimate(x), "linear estimate")?;
        self.stack.replace(1, &[y])
    }

    // ========================================================================
    // Combinatorics
    // ========================================================================

    /// `n r PERMU` → P(n, r)
    pub fn permu(&mut self) -> Result<()> {
        self.stack.binary(combinatorics::permu).map(|_| ())
    }

    /// `n r COMBI` → C(n, r)
    pub fn combi(&mut self) -> Result<()> {
        self.stack.binary(combinatorics::combi).map(|_| ())
    }

    // ========================================================================
    // Registers
    // ========================================================================

    /// Copy the top value into a general-purpose register
    pub fn store(&mut self, index: usize) -> Result<()> {
        let x = self.stack.peek().ok_or(CalcError::underflow(1, 0))?;
        self.registers.set(index, x)
    }

    /// Push the value of any register
    pub fn recall(&mut self, index: usize) -> Result<()> {
        let value = self.registers.get(index)?;
        self.stack.push(value)
    }
}
