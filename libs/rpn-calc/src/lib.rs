//! rpn-calc - RPN scientific calculator engine
//!
//! A stack machine for an embedded calculator: fixed-capacity operand stack,
//! a bank of numbered registers, an angular mode and running statistics.
//!
//! # Features
//!
//! - **Algebra**: arithmetic, powers, roots, reciprocal, sign change, percent
//! - **Trigonometry**: mode-aware `SIN`..`ATAN`, explicit `TODEG` / `TORAD`
//! - **Statistics**: `S+` accumulation, means, standard deviations, linear regression
//! - **Combinatorics**: permutations and combinations without literal factorials
//!
//! # Example
//!
//! ```rust
//! use rpn_calc::{AngleMode, Calculator};
//!
//! let mut calc = Calculator::new();
//!
//! // Direct calls: second-from-top is the left operand
//! calc.push(7.0).unwrap();
//! calc.push(2.0).unwrap();
//! calc.subtract().unwrap();
//! assert_eq!(calc.peek(), Some(5.0));
//!
//! // Keyword lines
//! calc.evaluate("CLEAR DEG 45 TAN").unwrap();
//! assert_eq!(calc.mode(), AngleMode::Degrees);
//! assert!((calc.peek().unwrap() - 1.0).abs() < 1e-12);
//!
//! // Statistics
//! calc.evaluate("CLEAR CLSTATS 1 2 S+ 2 4 S+ 3 6 S+ CLEAR LINREGR").unwrap();
//! let fit = calc.stats().regression().unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! ```
//!
//! # Operators
//!
//! Stack pictures read bottom to top, `->` separates input from output.
//!
//! | Group | Keywords | Stack |
//! |-------|----------|-------|
//! | Algebra | `SQRT` `SQ` `1/X` `CHS` | `x -> f(x)` |
//! | Algebra | `+` `-` `*` `/` `POW` `%` | `a b -> a op b` |
//! | Mode | `RAD` `DEG` | unchanged |
//! | Trig | `SIN` `COS` `TAN` `ASIN` `ACOS` `ATAN` `TODEG` `TORAD` | `x -> f(x)` |
//! | Statistics | `CLSTATS` | unchanged, registers 2..=7 zeroed |
//! | Statistics | `S+` | `x y -> n` |
//! | Statistics | `MEAN` `SDEV` `LINREGR` | `-> x̄ ȳ`, `-> sx sy`, `-> m b` |
//! | Statistics | `LINESTIM` | `x -> m·x + b` |
//! | Combinatorics | `PERMU` `COMBI` | `n r -> P(n,r)`, `n r -> C(n,r)` |
//! | Stack | `DUP` `DROP` `SWAP` `CLEAR` `PI` | |
//! | Registers | `STO n` `RCL n` | `x -> x`, `-> Rn` |

pub mod algebra;
pub mod angle;
pub mod combinatorics;
pub mod config;
pub mod engine;
pub mod error;
pub mod numeric;
pub mod op;
pub mod registers;
pub mod stack;
pub mod stats;
pub mod trig;

// Re-exports for convenience
pub use angle::AngleMode;
pub use config::EngineConfig;
pub use engine::Calculator;
pub use error::{CalcError, Result};
pub use op::{tokenize, Op, Token, CATALOG};
pub use registers::{RegisterFile, StatRegister};
pub use stack::{OverflowPolicy, Stack};
pub use stats::{Regression, StatSums};
