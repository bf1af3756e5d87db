//! Calculator Engine Library
//!
//! An incremental, character-at-a-time validator and evaluator for calculator
//! input: two operands, one binary operator, signed decimal or
//! scientific-notation numbers.
//!
//! # Architecture
//!
//! Input is modelled as two layered state machines:
//! - A number recognizer accepts the characters of one numeric literal
//! - A supervisor sequences first operand, operator, second operand and
//!   evaluation, asking the recognizer whether a `-` is a sign or an operator
//! - An interpreter executes the supervisor's actions on the session
//! - An evaluator computes the finished expression or yields `ERR`
//!
//! The library does NOT:
//! - Render anything or read keyboards
//! - Keep history beyond the undo log of the current expression
//! - Support precedence or more than one binary operation at a time
//!
//! Adapters live in the application layer (calc-cli).
//!
//! # Example Usage
//!
//! ```
//! use calc_engine::{step, Session, SupervisorState};
//!
//! let session = step("11-10", Session::new());
//! assert_eq!(session.expression, "11-10");
//!
//! let session = step("=", session);
//! assert_eq!(session.expression, "1");
//! assert_eq!(session.supervisor_state, SupervisorState::Evaluated);
//!
//! // A digit after a result starts a new first operand
//! let session = step("5", session);
//! assert_eq!(session.expression, "5");
//! ```

// Public modules
pub mod calculator;
pub mod classifier;
pub mod config;
pub mod evaluator;
pub mod number;
pub mod session;
pub mod supervisor;
pub mod types;

// Re-export main types for convenience
pub use calculator::{calculate, step, Calculator};
pub use classifier::{classify, Classifier};
pub use config::CalculatorConfig;
pub use evaluator::{evaluate, ERROR_TOKEN};
pub use number::NumberState;
pub use session::{LogEntry, Replaced, Session};
pub use supervisor::{Action, SupervisorState};
pub use types::{CalcError, Event, Operator, Result};

// Internal modules (not exposed in public API)
mod interpreter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh session evaluates a simple sum
        let session = calculate("2+2=");
        assert_eq!(session.expression, "4");
        assert!(session.log.is_empty());
    }
}
