//! Expression supervisor (outer state machine)
//!
//! Sequences "first operand → operator → second operand → evaluate" and picks
//! the interpreter action for every event. Some transitions are conditional:
//! a `-` is a sign while a number can still take one and a subtraction once a
//! number is complete. Those conditions are ordered [`Guard`] lists, checked
//! at call time; the first guard that holds wins.

use crate::evaluator;
use crate::number::NumberState;
use crate::types::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of the expression is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorState {
    #[default]
    Init,
    FirstOperand,
    SecondOperand,
    Evaluated,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupervisorState::Init => "init",
            SupervisorState::FirstOperand => "first_operand",
            SupervisorState::SecondOperand => "second_operand",
            SupervisorState::Evaluated => "evaluated",
        };
        write!(f, "{}", name)
    }
}

/// Decision of the supervisor, executed by the interpreter in the same step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ignore,
    AppendChar,
    DelegateToNumber,
    /// Reset the number recognizer and append the operator
    StartSecondOperand,
    Evaluate,
    /// Evaluate the pending expression, then append the operator
    EvaluateThenAppend,
    ClearAll,
    /// Drop the displayed result and start a fresh first operand
    ClearThenDelegate,
    DeleteLast,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Condition attached to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    /// The current number can still take a sign
    AcceptsSign,
    /// The current number is a finished literal
    IsComplete,
    /// The buffer holds one numeric literal (an evaluated result, not `ERR`)
    ResultIsNumber,
}

/// What the guards are allowed to look at
#[derive(Debug, Clone, Copy)]
pub struct GuardInput<'a> {
    pub number_state: NumberState,
    pub expression: &'a str,
}

impl Guard {
    pub fn holds(self, input: &GuardInput<'_>) -> bool {
        match self {
            Guard::Always => true,
            Guard::AcceptsSign => input.number_state.accepts_sign(),
            Guard::IsComplete => input.number_state.is_complete(),
            Guard::ResultIsNumber => evaluator::is_number(input.expression),
        }
    }
}

/// One guarded entry of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rule {
    guard: Guard,
    action: Action,
    next: SupervisorState,
}

const fn rule(guard: Guard, action: Action, next: SupervisorState) -> Rule {
    Rule { guard, action, next }
}

/// Result of feeding one event to the supervisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    pub next: SupervisorState,
}

use Action as A;
use Guard as G;
use SupervisorState as S;

const INIT_START: &[Rule] = &[rule(G::Always, A::DelegateToNumber, S::FirstOperand)];
const INIT_CLEAR: &[Rule] = &[rule(G::Always, A::ClearAll, S::Init)];

const FIRST_CLEAR: &[Rule] = &[rule(G::Always, A::ClearAll, S::Init)];
const FIRST_DELETE: &[Rule] = &[rule(G::Always, A::DeleteLast, S::FirstOperand)];
const FIRST_NUMBER: &[Rule] = &[rule(G::Always, A::DelegateToNumber, S::FirstOperand)];
const FIRST_MINUS: &[Rule] = &[
    rule(G::AcceptsSign, A::DelegateToNumber, S::FirstOperand),
    rule(G::IsComplete, A::StartSecondOperand, S::SecondOperand),
];
const FIRST_OPERATOR: &[Rule] = &[rule(G::IsComplete, A::StartSecondOperand, S::SecondOperand)];

const SECOND_CLEAR: &[Rule] = &[rule(G::Always, A::ClearAll, S::Init)];
const SECOND_DELETE: &[Rule] = &[rule(G::Always, A::DeleteLast, S::FirstOperand)];
const SECOND_NUMBER: &[Rule] = &[rule(G::Always, A::DelegateToNumber, S::SecondOperand)];
const SECOND_MINUS: &[Rule] = &[
    rule(G::AcceptsSign, A::DelegateToNumber, S::SecondOperand),
    rule(G::IsComplete, A::EvaluateThenAppend, S::SecondOperand),
];
const SECOND_OPERATOR: &[Rule] = &[rule(G::IsComplete, A::EvaluateThenAppend, S::SecondOperand)];
const SECOND_EQUALS: &[Rule] = &[rule(G::IsComplete, A::Evaluate, S::Evaluated)];

const EVALUATED_CLEAR: &[Rule] = &[rule(G::Always, A::ClearAll, S::Init)];
const EVALUATED_DELETE: &[Rule] = &[rule(G::Always, A::DeleteLast, S::FirstOperand)];
const EVALUATED_DIGIT: &[Rule] = &[rule(G::Always, A::ClearThenDelegate, S::FirstOperand)];
const EVALUATED_CHAIN: &[Rule] =
    &[rule(G::ResultIsNumber, A::EvaluateThenAppend, S::SecondOperand)];

/// The guarded rules for a state and event, in priority order
fn rules(state: SupervisorState, event: Event) -> &'static [Rule] {
    match (state, event) {
        (S::Init, Event::Minus | Event::Digit) => INIT_START,
        (S::Init, Event::AllClear) => INIT_CLEAR,

        (S::FirstOperand, Event::AllClear) => FIRST_CLEAR,
        (S::FirstOperand, Event::Delete) => FIRST_DELETE,
        (S::FirstOperand, Event::Digit | Event::Dot | Event::Exponent) => FIRST_NUMBER,
        (S::FirstOperand, Event::Minus) => FIRST_MINUS,
        (S::FirstOperand, Event::Operator(_)) => FIRST_OPERATOR,

        (S::SecondOperand, Event::AllClear) => SECOND_CLEAR,
        (S::SecondOperand, Event::Delete) => SECOND_DELETE,
        (S::SecondOperand, Event::Digit | Event::Dot | Event::Exponent) => SECOND_NUMBER,
        (S::SecondOperand, Event::Minus) => SECOND_MINUS,
        (S::SecondOperand, Event::Operator(_)) => SECOND_OPERATOR,
        (S::SecondOperand, Event::Equals) => SECOND_EQUALS,

        (S::Evaluated, Event::AllClear) => EVALUATED_CLEAR,
        (S::Evaluated, Event::Delete) => EVALUATED_DELETE,
        (S::Evaluated, Event::Digit) => EVALUATED_DIGIT,
        (S::Evaluated, Event::Minus | Event::Operator(_)) => EVALUATED_CHAIN,

        _ => &[],
    }
}

/// Feed one event to the supervisor
///
/// When no rule matches (or none of the guards hold) the event is ignored
/// and the state stays where it is.
pub fn accept(event: Event, state: SupervisorState, input: GuardInput<'_>) -> Transition {
    rules(state, event)
        .iter()
        .find(|rule| rule.guard.holds(&input))
        .map(|rule| Transition {
            action: rule.action,
            next: rule.next,
        })
        .unwrap_or(Transition {
            action: Action::Ignore,
            next: state,
        })
}
