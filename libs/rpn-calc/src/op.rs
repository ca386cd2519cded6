//! Operator catalog and line tokenizer
//!
//! Maps keywords (and the usual key-legend aliases) to [`Op`] values so that
//! a host dispatcher can drive the engine from text.

use std::fmt;

use crate::error::{CalcError, Result};

/// Every engine operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Algebra
    Sqrt,
    Sq,
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
    Percent,
    OneOverX,
    Chs,
    // Angular mode and trigonometry
    Rad,
    Deg,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    ToDeg,
    ToRad,
    // Statistics
    ClearStats,
    SigmaPlus,
    MeanValues,
    StdDev,
    LinRegr,
    LinEstim,
    // Combinatorics
    Permu,
    Combi,
    // Stack and registers
    Dup,
    Drop,
    Swap,
    ClearStack,
    Pi,
    Store(usize),
    Recall(usize),
}

/// `(keyword, summary)` for every operator, in help order
pub const CATALOG: &[(&str, &str)] = &[
    ("SQRT", "x -> square root of x"),
    ("SQ", "x -> x squared"),
    ("+", "a b -> a + b"),
    ("-", "a b -> a - b"),
    ("*", "a b -> a * b"),
    ("/", "a b -> a / b"),
    ("POW", "a b -> a to the power b"),
    ("%", "a b -> b percent of a"),
    ("1/X", "x -> reciprocal of x"),
    ("CHS", "x -> -x"),
    ("RAD", "angular mode: radians"),
    ("DEG", "angular mode: degrees"),
    ("SIN", "x -> sine (current mode)"),
    ("COS", "x -> cosine (current mode)"),
    ("TAN", "x -> tangent (current mode)"),
    ("ASIN", "x -> arc sine (current mode)"),
    ("ACOS", "x -> arc cosine (current mode)"),
    ("ATAN", "x -> arc tangent (current mode)"),
    ("TODEG", "x -> radians converted to degrees"),
    ("TORAD", "x -> degrees converted to radians"),
    ("CLSTATS", "zero the statistics registers"),
    ("S+", "x y -> n, accumulate a data pair"),
    ("MEAN", "-> mean x, mean y"),
    ("SDEV", "-> sample std dev x, std dev y"),
    ("LINREGR", "-> slope, intercept"),
    ("LINESTIM", "x -> estimated y"),
    ("PERMU", "n r -> permutations P(n, r)"),
    ("COMBI", "n r -> combinations C(n, r)"),
    ("DUP", "x -> x x"),
    ("DROP", "x ->"),
    ("SWAP", "a b -> b a"),
    ("CLEAR", "empty the stack"),
    ("PI", "-> 3.14159..."),
    ("STO n", "x -> x, copy x into register n"),
    ("RCL n", "-> register n"),
];

impl Op {
    /// Look up a parameterless keyword, case-insensitive
    ///
    /// `STO` and `RCL` take a register index and are handled by [`tokenize`].
    pub fn parse_keyword(word: &str) -> Option<Op> {
        let op = match word.to_ascii_uppercase().as_str() {
            "SQRT" => Op::Sqrt,
            "SQ" | "X^2" => Op::Sq,
            "+" | "ADD" => Op::Add,
            "-" | "SUB" | "SUBTRACT" => Op::Subtract,
            "*" | "MUL" | "MULTIPLY" => Op::Multiply,
            "/" | "DIV" | "DIVIDE" => Op::Divide,
            "POW" | "^" | "Y^X" => Op::Pow,
            "%" | "PERCENT" => Op::Percent,
            "1/X" | "INV" | "ONEOVERX" => Op::OneOverX,
            "CHS" | "NEG" => Op::Chs,
            "RAD" => Op::Rad,
            "DEG" => Op::Deg,
            "SIN" => Op::Sin,
            "COS" => Op::Cos,
            "TAN" => Op::Tan,
            "ASIN" => Op::Asin,
            "ACOS" => Op::Acos,
            "ATAN" => Op::Atan,
            "TODEG" | "->DEG" => Op::ToDeg,
            "TORAD" | "->RAD" => Op::ToRad,
            "CLSTATS" | "CLEARSTATS" | "CLΣ" => Op::ClearStats,
            "S+" | "Σ+" | "SIGMA+" | "SIGMAPLUS" => Op::SigmaPlus,
            "MEAN" | "MEANVALUES" => Op::MeanValues,
            "SDEV" | "STDDEV" => Op::StdDev,
            "LINREGR" | "LR" => Op::LinRegr,
            "LINESTIM" | "EST" => Op::LinEstim,
            "PERMU" | "PERM" | "NPR" => Op::Permu,
            "COMBI" | "COMB" | "NCR" => Op::Combi,
            "DUP" | "ENTER" => Op::Dup,
            "DROP" => Op::Drop,
            "SWAP" | "X<>Y" => Op::Swap,
            "CLEAR" | "CLST" => Op::ClearStack,
            "PI" | "Π" | "π" => Op::Pi,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Op::Sqrt => "SQRT",
            Op::Sq => "SQ",
            Op::Add => "+",
            Op::Subtract => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Pow => "POW",
            Op::Percent => "%",
            Op::OneOverX => "1/X",
            Op::Chs => "CHS",
            Op::Rad => "RAD",
            Op::Deg => "DEG",
            Op::Sin => "SIN",
            Op::Cos => "COS",
            Op::Tan => "TAN",
            Op::Asin => "ASIN",
            Op::Acos => "ACOS",
            Op::Atan => "ATAN",
            Op::ToDeg => "TODEG",
            Op::ToRad => "TORAD",
            Op::ClearStats => "CLSTATS",
            Op::SigmaPlus => "S+",
            Op::MeanValues => "MEAN",
            Op::StdDev => "SDEV",
            Op::LinRegr => "LINREGR",
            Op::LinEstim => "LINESTIM",
            Op::Permu => "PERMU",
            Op::Combi => "COMBI",
            Op::Dup => "DUP",
            Op::Drop => "DROP",
            Op::Swap => "SWAP",
            Op::ClearStack => "CLEAR",
            Op::Pi => "PI",
            Op::Store(_) => "STO",
            Op::Recall(_) => "RCL",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Store(index) | Op::Recall(index) => write!(f, "{} {}", self.keyword(), index),
            _ => write!(f, "{}", self.keyword()),
        }
    }
}

/// One unit of input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Op),
}

/// Split a line into numbers and operators
///
/// The whole line is tokenized before the caller executes anything, so a
/// typo late in the line cannot leave the engine half-way through it.
pub fn tokenize(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut words = line.split_whitespace();

    while let Some(word) = words.next() {
        if let Some(op) = Op::parse_keyword(word) {
            tokens.push(Token::Op(op));
            continue;
        }
        match word.to_ascii_uppercase().as_str() {
            "STO" => {
                let index = register_index(word, words.next())?;
                tokens.push(Token::Op(Op::Store(index)));
            },
            "RCL" => {
                let index = register_index(word, words.next())?;
                tokens.push(Token::Op(Op::Recall(index)));
            },
            _ => tokens.push(Token::Number(parse_number(word)?)),
        }
    }

    Ok(tokens)
}

fn register_index(keyword: &str, arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or_else(|| {
        CalcError::unknown_token(format!("{} needs a register index", keyword))
    })?;
    arg.parse::<usize>()
        .map_err(|_| CalcError::unknown_token(format!("{} {}", keyword, arg)))
}

/// Finite numeric literals only; `inf`/`nan` are not numbers here
fn parse_number(word: &str) -> Result<f64> {
    match word.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::unknown_token(word)),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keywords_parse() {
        for (keyword, _) in CATALOG {
            if keyword.contains(' ') {
                continue;
            }
            let op = Op::parse_keyword(keyword)
                .unwrap_or_else(|| panic!("catalog keyword {} does not parse", keyword));
            assert_eq!(op.keyword(), *keyword);
        }
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!(Op::parse_keyword("sqrt"), Some(Op::Sqrt));
        assert_eq!(Op::parse_keyword("Subtract"), Some(Op::Subtract));
        assert_eq!(Op::parse_keyword("oneOverX"), Some(Op::OneOverX));
        assert_eq!(Op::parse_keyword("sigmaPlus"), Some(Op::SigmaPlus));
        assert_eq!(Op::parse_keyword("x<>y"), Some(Op::Swap));
        assert_eq!(Op::parse_keyword("bogus"), None);
    }

    #[test]
    fn test_tokenize_mixed_line() {
        let tokens = tokenize("10 3.5 - -2 CHS 1e3 *").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(10.0),
                Token::Number(3.5),
                Token::Op(Op::Subtract),
                Token::Number(-2.0),
                Token::Op(Op::Chs),
                Token::Number(1000.0),
                Token::Op(Op::Multiply),
            ]
        );
    }

    #[test]
    fn test_tokenize_registers() {
        assert_eq!(
            tokenize("5 STO 0 RCL 9").unwrap(),
            vec![
                Token::Number(5.0),
                Token::Op(Op::Store(0)),
                Token::Op(Op::Recall(9)),
            ]
        );
        assert!(matches!(tokenize("STO"), Err(CalcError::UnknownToken(_))));
        assert!(matches!(tokenize("RCL x"), Err(CalcError::UnknownToken(_))));
    }

    #[test]
    fn test_tokenize_rejects_unknown_and_non_finite() {
        assert_eq!(
            tokenize("1 2 frob"),
            Err(CalcError::UnknownToken("frob".to_string()))
        );
        assert!(tokenize("inf").is_err());
        assert!(tokenize("NaN").is_err());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Op::Store(3).to_string(), "STO 3");
        assert_eq!(Op::SigmaPlus.to_string(), "S+");
    }
}
