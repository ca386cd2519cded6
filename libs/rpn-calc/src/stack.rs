//! Fixed-capacity operand stack
//!
//! Storage is allocated once with the configured capacity and never grows.
//! All mutating helpers validate first and only then touch the storage, so a
//! failed call leaves the stack exactly as it was.
//!
//! Operand order: for a binary operator the second-from-top value is the
//! left operand and the top value is the right operand (`a b -` is `a - b`).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CalcError, Result};

/// What `push` does when the stack is full
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Refuse the push with `StackOverflow`, stack unchanged
    #[default]
    Reject,
    /// Evict the bottom element to make room
    DiscardOldest,
}

/// Operand stack
#[derive(Debug, Clone)]
pub struct Stack {
    /// Bottom at index 0, top at the end
    values: Vec<f64>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl Stack {
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            capacity,
            policy,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Snapshot ordered bottom to top (top last)
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Top of stack, if any
    pub fn peek(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn push(&mut self, value: f64) -> Result<()> {
        self.ensure_room(0, 1)?;
        self.lift(1);
        self.values.push(value);
        trace!(value, depth = self.values.len(), "push");
        Ok(())
    }

    pub fn pop(&mut self) -> Result<f64> {
        self.values.pop().ok_or(CalcError::underflow(1, 0))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The top `n` values, bottom-most first
    ///
    /// `top_n(2)` yields `[left, right]` for a binary operator.
    pub fn top_n(&self, n: usize) -> Result<&[f64]> {
        let depth = self.values.len();
        if depth < n {
            return Err(CalcError::underflow(n, depth));
        }
        Ok(&self.values[depth - n..])
    }

    /// Consume the top `consumed` values and push `results` in order
    ///
    /// Both the underflow and the overflow check happen before anything is
    /// removed.
    pub fn replace(&mut self, consumed: usize, results: &[f64]) -> Result<()> {
        self.top_n(consumed)?;
        self.ensure_room(consumed, results.len())?;
        let keep = self.values.len() - consumed;
        self.values.truncate(keep);
        self.lift(results.len());
        self.values.extend_from_slice(results);
        Ok(())
    }

    /// Replace the top value with `f(top)`
    pub fn unary<F>(&mut self, f: F) -> Result<f64>
    where
        F: FnOnce(f64) -> Result<f64>,
    {
        let x = self.top_n(1)?[0];
        let result = f(x)?;
        self.replace(1, &[result])?;
        Ok(result)
    }

    /// Replace the top two values `[left, right]` with `f(left, right)`
    pub fn binary<F>(&mut self, f: F) -> Result<f64>
    where
        F: FnOnce(f64, f64) -> Result<f64>,
    {
        let operands = self.top_n(2)?;
        let (left, right) = (operands[0], operands[1]);
        let result = f(left, right)?;
        self.replace(2, &[result])?;
        Ok(result)
    }

    /// Check that `incoming` values fit once `consumed` have been removed
    fn ensure_room(&self, consumed: usize, incoming: usize) -> Result<()> {
        let after = self.values.len() - consumed + incoming;
        if after <= self.capacity {
            return Ok(());
        }
        match self.policy {
            OverflowPolicy::Reject => Err(CalcError::overflow_stack(self.capacity)),
            OverflowPolicy::DiscardOldest if incoming <= self.capacity => Ok(()),
            OverflowPolicy::DiscardOldest => Err(CalcError::overflow_stack(self.capacity)),
        }
    }

    /// Evict bottom elements so that `incoming` more values fit
    fn lift(&mut self, incoming: usize) {
        let after = self.values.len() + incoming;
        if after > self.capacity {
            let excess = after - self.capacity;
            trace!(excess, "discarding oldest stack values");
            self.values.drain(..excess);
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn stack_of(values: &[f64]) -> Stack {
        let mut stack = Stack::new(4, OverflowPolicy::Reject);
        for v in values {
            stack.push(*v).unwrap();
        }
        stack
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = stack_of(&[1.0, 2.0, 3.0]);
        assert_eq!(stack.pop().unwrap(), 3.0);
        assert_eq!(stack.pop().unwrap(), 2.0);
        assert_eq!(stack.as_slice(), &[1.0]);
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = stack_of(&[]);
        assert_eq!(
            stack.pop(),
            Err(CalcError::StackUnderflow {
                needed: 1,
                depth: 0
            })
        );
    }

    #[test]
    fn test_reject_policy_keeps_stack() {
        let mut stack = stack_of(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            stack.push(5.0),
            Err(CalcError::StackOverflow { capacity: 4 })
        );
        assert_eq!(stack.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_discard_oldest_policy() {
        let mut stack = Stack::new(3, OverflowPolicy::DiscardOldest);
        for v in [1.0, 2.0, 3.0, 4.0] {
            stack.push(v).unwrap();
        }
        assert_eq!(stack.as_slice(), &[2.0, 3.0, 4.0]);

        // Two results after consuming nothing: evicts two
        stack.replace(0, &[5.0, 6.0]).unwrap();
        assert_eq!(stack.as_slice(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_binary_operand_order() {
        let mut stack = stack_of(&[10.0, 3.0]);
        let result = stack.binary(|a, b| Ok(a - b)).unwrap();
        assert_eq!(result, 7.0);
        assert_eq!(stack.as_slice(), &[7.0]);
    }

    #[test]
    fn test_failed_operator_leaves_stack() {
        let mut stack = stack_of(&[1.0, 0.0]);
        let err = stack
            .binary(|_, _| Err(CalcError::DivideByZero))
            .unwrap_err();
        assert_eq!(err, CalcError::DivideByZero);
        assert_eq!(stack.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_replace_checks_room_before_consuming() {
        let mut stack = stack_of(&[1.0, 2.0, 3.0, 4.0]);
        assert!(stack.replace(1, &[5.0, 6.0]).is_err());
        assert_eq!(stack.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_unary_underflow() {
        let mut stack = stack_of(&[]);
        assert_eq!(
            stack.unary(|x| Ok(-x)),
            Err(CalcError::StackUnderflow {
                needed: 1,
                depth: 0
            })
        );
    }
}
