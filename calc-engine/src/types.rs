//! Core types for the calculator engine
//!
//! This module defines the input events the classifier produces, the binary
//! operators the evaluator understands, and the error taxonomy shared by all
//! engine components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CalcError>;

/// Errors that can occur inside the engine
///
/// None of these ever escape [`crate::step`]: evaluation failures become the
/// `ERR` display token and interpreter defects degrade to a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("Malformed expression: {0:?}")]
    MalformedExpression(String),

    #[error("Result is not a finite number")]
    NonFiniteResult,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Map an operator symbol to its operator
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The symbol typed for this operator
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Apply the operator with ordinary double-precision semantics
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Semantic classification of one input character
///
/// `-` is deliberately not an [`Operator`] event: whether it is a sign or a
/// subtraction is decided by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Digit,
    Minus,
    Dot,
    Exponent,
    Operator(Operator),
    Equals,
    Delete,
    AllClear,
    Unrecognized,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Digit => write!(f, "digit"),
            Event::Minus => write!(f, "minus"),
            Event::Dot => write!(f, "dot"),
            Event::Exponent => write!(f, "exponent"),
            Event::Operator(op) => write!(f, "operator({})", op),
            Event::Equals => write!(f, "equals"),
            Event::Delete => write!(f, "delete"),
            Event::AllClear => write!(f, "all_clear"),
            Event::Unrecognized => write!(f, "unrecognized"),
        }
    }
}
