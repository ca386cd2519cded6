//! Error types for rpn-calc

use thiserror::Error;

/// Calculation errors
///
/// Every operator checks its preconditions before touching the stack or the
/// registers, so receiving one of these means the engine state is exactly
/// what it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Stack underflow: needs {needed} operand(s), stack holds {depth}")]
    StackUnderflow { needed: usize, depth: usize },

    #[error("Stack overflow: capacity {capacity} reached")]
    StackOverflow { capacity: usize },

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Division by zero")]
    DivideByZero,

    #[error("Insufficient data: needs {needed} data pair(s), have {count}")]
    InsufficientData { needed: usize, count: usize },

    #[error("Singular regression: all x values are identical")]
    SingularRegression,

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Register {index} out of range (register file holds {size})")]
    RegisterOutOfRange { index: usize, size: usize },

    #[error("Register {0} is reserved for statistics")]
    ReservedRegister(usize),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    pub fn underflow(needed: usize, depth: usize) -> Self {
        Self::StackUnderflow { needed, depth }
    }

    pub fn overflow_stack(capacity: usize) -> Self {
        Self::StackOverflow { capacity }
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn insufficient(needed: usize, count: usize) -> Self {
        Self::InsufficientData { needed, count }
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken(token.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
