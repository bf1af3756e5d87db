//! Main calculator API
//!
//! The [`Calculator`] is the entry point adapters talk to: it takes an input
//! burst and the previous [`Session`] and returns the next session. Bursts are
//! processed one character at a time, strictly left to right.

use crate::classifier::Classifier;
use crate::config::CalculatorConfig;
use crate::interpreter::Interpreter;
use crate::session::Session;
use crate::supervisor::{self, GuardInput};
use crate::types::{Event, Result};

/// The calculator engine - classifier plus both state machines
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator {
    classifier: Classifier,
}

impl Calculator {
    /// Create a calculator with the default markers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator from a configuration
    ///
    /// # Example
    /// ```
    /// use calc_engine::{Calculator, CalculatorConfig, Session};
    ///
    /// let config = CalculatorConfig::new().with_clear_marker('C');
    /// let calculator = Calculator::with_config(&config).unwrap();
    ///
    /// let session = calculator.step("12+3C", Session::new());
    /// assert_eq!(session.expression, "");
    /// ```
    pub fn with_config(config: &CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::from_config(config),
        })
    }

    /// Process an input burst
    ///
    /// The result is the fold of [`Calculator::process_char`] over the
    /// characters of `input`.
    pub fn step(&self, input: &str, session: Session) -> Session {
        input
            .chars()
            .fold(session, |session, c| self.process_char(c, session))
    }

    /// Process a single character
    ///
    /// Unrecognized characters return the session untouched. An interpreter
    /// defect is logged and the character is dropped.
    pub fn process_char(&self, c: char, session: Session) -> Session {
        let event = self.classifier.classify(c);
        if event == Event::Unrecognized {
            log::trace!("Dropping unrecognized character {:?}", c);
            return session;
        }

        let transition = supervisor::accept(
            event,
            session.supervisor_state,
            GuardInput {
                number_state: session.number_state,
                expression: &session.expression,
            },
        );

        let mut next = session.clone();
        match Interpreter::new(c, event, &mut next).execute(transition) {
            Ok(()) => {
                log::trace!(
                    "{:?} -> {:?} [{} / {}]",
                    c,
                    next.expression,
                    next.supervisor_state,
                    next.number_state
                );
                next
            }
            Err(e) => {
                log::error!("Failed to process {:?}: {}", c, e);
                session
            }
        }
    }
}

/// Process an input burst with the default markers
///
/// # Example
/// ```
/// use calc_engine::{step, Session};
///
/// let session = step("-1+2*3/3=", Session::new());
/// assert_eq!(session.expression, "1");
/// ```
pub fn step(input: &str, session: Session) -> Session {
    Calculator::new().step(input, session)
}

/// Process an input burst starting from a fresh session
pub fn calculate(input: &str) -> Session {
    step(input, Session::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::NumberState;
    use crate::supervisor::SupervisorState;

    #[test]
    fn test_unrecognized_characters_are_dropped() {
        let session = calculate("1 x2?");
        assert_eq!(session.expression, "12");
        assert_eq!(session.log.len(), 2);
    }

    #[test]
    fn test_burst_equals_fold_of_single_steps() {
        let input = "-3.5e2*2-1=";
        let burst = calculate(input);

        let calculator = Calculator::new();
        let mut session = Session::new();
        for c in input.chars() {
            session = calculator.process_char(c, session);
        }

        assert_eq!(burst, session);
        assert_eq!(burst.expression, "-701");
    }

    #[test]
    fn test_chained_after_evaluation() {
        let session = calculate("1/2=+");
        assert_eq!(session.expression, "0.5+");
        assert_eq!(session.number_state, NumberState::Start);
        assert_eq!(session.supervisor_state, SupervisorState::SecondOperand);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalculatorConfig::new().with_delete_marker('+');
        assert!(Calculator::with_config(&config).is_err());
    }

    #[test]
    fn test_custom_markers() {
        let config = CalculatorConfig::new()
            .with_delete_marker('<')
            .with_clear_marker('C');
        let calculator = Calculator::with_config(&config).unwrap();

        let session = calculator.step("12<", Session::new());
        assert_eq!(session.expression, "1");

        // 'd' no longer deletes
        let session = calculator.step("d", session);
        assert_eq!(session.expression, "1");
    }
}
