//! Action interpreter
//!
//! Executes the supervisor's decision for one character against the session.
//! Actions can expand into further actions (an evaluation followed by an
//! append, a delegation that yields an append), so they run off a small
//! pending stack. The stack depth is bounded by the fixed action set.

use crate::evaluator;
use crate::number::{self, NumberAction, NumberState};
use crate::session::{LogEntry, Replaced, Session};
use crate::supervisor::{Action, SupervisorState, Transition};
use crate::types::{CalcError, Event, Result};

/// Interpreter for a single character
pub(crate) struct Interpreter<'a> {
    session: &'a mut Session,
    char: char,
    event: Event,
    /// States before this character, recorded in the undo log
    supervisor_before: SupervisorState,
    number_before: NumberState,
    /// Content discarded earlier in this step, if any
    replaced: Option<Replaced>,
}

impl<'a> Interpreter<'a> {
    pub(crate) fn new(char: char, event: Event, session: &'a mut Session) -> Self {
        Self {
            supervisor_before: session.supervisor_state,
            number_before: session.number_state,
            session,
            char,
            event,
            replaced: None,
        }
    }

    /// Apply a supervisor transition
    ///
    /// The supervisor state moves to `transition.next` first; a successful
    /// delete then overrides it with the state recorded in the log.
    pub(crate) fn execute(mut self, transition: Transition) -> Result<()> {
        self.session.supervisor_state = transition.next;

        let mut pending = vec![transition.action];
        while let Some(action) = pending.pop() {
            log::trace!("{:?} ({}): {}", self.char, self.event, action);

            match action {
                Action::Ignore => {}
                Action::AppendChar => self.append(),
                Action::DelegateToNumber => {
                    let (next, number_action) =
                        number::accept(self.event, self.session.number_state);
                    self.session.number_state = next;
                    if let Some(follow) = follow_up(number_action)? {
                        pending.push(follow);
                    }
                }
                Action::StartSecondOperand => {
                    self.session.number_state = NumberState::Start;
                    pending.push(Action::AppendChar);
                }
                Action::Evaluate => self.evaluate(),
                Action::EvaluateThenAppend => {
                    self.evaluate();
                    if evaluator::is_number(&self.session.expression) {
                        pending.push(Action::AppendChar);
                    } else {
                        // No operator can follow ERR
                        self.session.supervisor_state = SupervisorState::Evaluated;
                    }
                }
                Action::ClearAll => self.clear(),
                Action::ClearThenDelegate => {
                    pending.push(Action::DelegateToNumber);
                    pending.push(Action::ClearAll);
                }
                Action::DeleteLast => self.delete_last(),
            }
        }

        Ok(())
    }

    fn append(&mut self) {
        self.session.expression.push(self.char);
        self.session.log.push(LogEntry {
            char: self.char,
            event: self.event,
            supervisor_state: self.supervisor_before,
            number_state: self.number_before,
            replaced: self.replaced.take(),
        });
    }

    fn evaluate(&mut self) {
        // A lone literal is a result being chained, not an expression
        let result = if evaluator::is_number(&self.session.expression) {
            self.session.expression.clone()
        } else {
            evaluator::evaluate(&self.session.expression)
        };

        self.discard();
        self.session.expression = result;
    }

    fn clear(&mut self) {
        self.discard();
    }

    /// Empty the buffer and the log, keeping them for the next log entry
    fn discard(&mut self) {
        let expression = std::mem::take(&mut self.session.expression);
        let log = std::mem::take(&mut self.session.log);
        if !expression.is_empty() || !log.is_empty() {
            self.replaced.get_or_insert(Replaced { expression, log });
        }
        self.session.number_state = NumberState::Start;
    }

    fn delete_last(&mut self) {
        match self.session.log.pop() {
            Some(entry) => {
                match entry.replaced {
                    Some(previous) => {
                        self.session.expression = previous.expression;
                        self.session.log = previous.log;
                    }
                    None => {
                        self.session.expression.pop();
                    }
                }
                self.session.number_state = entry.number_state;
                self.session.supervisor_state = entry.supervisor_state;
            }
            None => {
                // Nothing to undo (e.g. right after an evaluation)
                self.session.expression.clear();
                self.session.number_state = NumberState::Start;
            }
        }
    }
}

/// Map a number recognizer decision to the interpreter action it implies
fn follow_up(action: NumberAction) -> Result<Option<Action>> {
    match action {
        NumberAction::AppendChar => Ok(Some(Action::AppendChar)),
        NumberAction::Ignore => Ok(None),
        NumberAction::TreatAsOperator => Err(CalcError::UnknownAction(format!(
            "{:?} has no meaning inside a number delegation",
            action
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operator;

    fn run(session: &mut Session, c: char, event: Event, action: Action, next: SupervisorState) {
        Interpreter::new(c, event, session)
            .execute(Transition { action, next })
            .unwrap();
    }

    #[test]
    fn test_append_records_prior_states() {
        let mut session = Session::new();
        session.supervisor_state = SupervisorState::FirstOperand;
        session.number_state = NumberState::Integer;
        session.expression = "4".to_string();

        run(
            &mut session,
            '+',
            Event::Operator(Operator::Add),
            Action::StartSecondOperand,
            SupervisorState::SecondOperand,
        );

        assert_eq!(session.expression, "4+");
        assert_eq!(session.number_state, NumberState::Start);
        assert_eq!(session.supervisor_state, SupervisorState::SecondOperand);
        let entry = session.log.last().unwrap();
        assert_eq!(entry.supervisor_state, SupervisorState::FirstOperand);
        assert_eq!(entry.number_state, NumberState::Integer);
        assert_eq!(entry.replaced, None);
    }

    #[test]
    fn test_delegate_ignored_character_leaves_no_trace() {
        let mut session = Session::new();
        run(
            &mut session,
            '.',
            Event::Dot,
            Action::DelegateToNumber,
            SupervisorState::FirstOperand,
        );

        assert_eq!(session.expression, "");
        assert!(session.log.is_empty());
        assert_eq!(session.number_state, NumberState::Start);
    }

    #[test]
    fn test_evaluate_then_append_keeps_replaced_text() {
        let mut session = Session {
            expression: "6/3".to_string(),
            number_state: NumberState::Integer,
            supervisor_state: SupervisorState::SecondOperand,
            log: Vec::new(),
        };

        run(
            &mut session,
            '-',
            Event::Minus,
            Action::EvaluateThenAppend,
            SupervisorState::SecondOperand,
        );

        assert_eq!(session.expression, "2-");
        assert_eq!(session.log.len(), 1);
        let replaced = session.log[0].replaced.as_ref().unwrap();
        assert_eq!(replaced.expression, "6/3");
    }

    #[test]
    fn test_delete_after_evaluation_restores_discarded_log() {
        let mut session = crate::calculate("1+2");
        let before = session.clone();

        run(
            &mut session,
            '-',
            Event::Minus,
            Action::EvaluateThenAppend,
            SupervisorState::SecondOperand,
        );
        assert_eq!(session.expression, "3-");
        assert_eq!(session.log.len(), 1);

        run(
            &mut session,
            'd',
            Event::Delete,
            Action::DeleteLast,
            SupervisorState::FirstOperand,
        );
        assert_eq!(session, before);

        run(
            &mut session,
            'd',
            Event::Delete,
            Action::DeleteLast,
            SupervisorState::FirstOperand,
        );
        assert_eq!(session.expression, "1+");
        assert_eq!(session.supervisor_state, SupervisorState::SecondOperand);
    }

    #[test]
    fn test_evaluate_then_append_stops_at_error() {
        let mut session = Session {
            expression: "1/0".to_string(),
            number_state: NumberState::Integer,
            supervisor_state: SupervisorState::SecondOperand,
            log: Vec::new(),
        };

        run(
            &mut session,
            '+',
            Event::Operator(Operator::Add),
            Action::EvaluateThenAppend,
            SupervisorState::SecondOperand,
        );

        assert_eq!(session.expression, evaluator::ERROR_TOKEN);
        assert_eq!(session.supervisor_state, SupervisorState::Evaluated);
        assert_eq!(session.number_state, NumberState::Start);
        assert!(session.log.is_empty());
    }

    #[test]
    fn test_delete_with_empty_log_clears() {
        let mut session = Session {
            expression: "42".to_string(),
            number_state: NumberState::Start,
            supervisor_state: SupervisorState::Evaluated,
            log: Vec::new(),
        };

        run(
            &mut session,
            'd',
            Event::Delete,
            Action::DeleteLast,
            SupervisorState::FirstOperand,
        );

        assert_eq!(session.expression, "");
        assert_eq!(session.supervisor_state, SupervisorState::FirstOperand);
        assert_eq!(session.number_state, NumberState::Start);
    }

    #[test]
    fn test_treat_as_operator_is_unknown_action() {
        assert!(matches!(
            follow_up(NumberAction::TreatAsOperator),
            Err(CalcError::UnknownAction(_))
        ));
        assert_eq!(follow_up(NumberAction::Ignore).unwrap(), None);
    }
}
