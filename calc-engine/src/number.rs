//! Number recognizer (inner state machine)
//!
//! Accepts the characters of one signed, optionally fractional, optionally
//! exponential numeric literal. The supervisor never looks at the transition
//! table; it only asks [`NumberState::is_complete`] and
//! [`NumberState::accepts_sign`].

use crate::types::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of a numeric literal has been consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberState {
    #[default]
    Start,
    Signed,
    Integer,
    Fractional,
    ExponentMarker,
    ExponentSigned,
    Exponent,
}

/// Decision of the number recognizer for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberAction {
    /// The character extends the literal
    AppendChar,
    /// The character ends the literal and should be read as an operator
    TreatAsOperator,
    /// The character is not valid here
    Ignore,
}

impl NumberState {
    /// True when the consumed characters already form a valid number
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            NumberState::Integer | NumberState::Fractional | NumberState::Exponent
        )
    }

    /// True when a `-` here is the sign of the number rather than an operator
    pub fn accepts_sign(self) -> bool {
        matches!(self, NumberState::Start | NumberState::ExponentMarker)
    }
}

impl fmt::Display for NumberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberState::Start => "start",
            NumberState::Signed => "signed",
            NumberState::Integer => "integer",
            NumberState::Fractional => "fractional",
            NumberState::ExponentMarker => "exponent_marker",
            NumberState::ExponentSigned => "exponent_signed",
            NumberState::Exponent => "exponent",
        };
        write!(f, "{}", name)
    }
}

/// Feed one event into the recognizer
///
/// Returns the next state and the action for the interpreter. Pairs not in
/// the table keep the state and ignore the character.
pub fn accept(event: Event, state: NumberState) -> (NumberState, NumberAction) {
    use NumberState::*;

    let next = match (state, event) {
        (Start, Event::Digit) => Integer,
        (Start, Event::Minus) => Signed,

        (Signed, Event::Digit) => Integer,

        (Integer, Event::Digit) => Integer,
        (Integer, Event::Dot) => Fractional,
        (Integer, Event::Exponent) => ExponentMarker,

        (Fractional, Event::Digit) => Fractional,
        (Fractional, Event::Exponent) => ExponentMarker,

        (ExponentMarker, Event::Digit) => Exponent,
        (ExponentMarker, Event::Minus) => ExponentSigned,

        (ExponentSigned, Event::Digit) => Exponent,

        (Exponent, Event::Digit) => Exponent,

        _ => return (state, NumberAction::Ignore),
    };

    (next, NumberAction::AppendChar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    /// Fold a string through the recognizer, returning the accepted text
    fn recognize(input: &str) -> (String, NumberState) {
        let mut state = NumberState::Start;
        let mut accepted = String::new();
        for c in input.chars() {
            let (next, action) = accept(classify(c), state);
            state = next;
            if action == NumberAction::AppendChar {
                accepted.push(c);
            }
        }
        (accepted, state)
    }

    #[test]
    fn test_integer() {
        assert_eq!(recognize("123"), ("123".to_string(), NumberState::Integer));
    }

    #[test]
    fn test_signed_fraction() {
        assert_eq!(
            recognize("-12.5"),
            ("-12.5".to_string(), NumberState::Fractional)
        );
    }

    #[test]
    fn test_exponent_with_sign() {
        assert_eq!(
            recognize("1.5e-3"),
            ("1.5e-3".to_string(), NumberState::Exponent)
        );
        assert_eq!(
            recognize("2e10"),
            ("2e10".to_string(), NumberState::Exponent)
        );
    }

    #[test]
    fn test_redundant_characters_ignored() {
        assert_eq!(
            recognize("-.-12..3.4."),
            ("-12.34".to_string(), NumberState::Fractional)
        );
        assert_eq!(
            recognize("e-.-12..3e-e.4.e"),
            ("-12.3e-4".to_string(), NumberState::Exponent)
        );
    }

    #[test]
    fn test_sign_only_at_start_or_after_marker() {
        assert_eq!(accept(Event::Minus, NumberState::Signed).1, NumberAction::Ignore);
        assert_eq!(accept(Event::Minus, NumberState::Integer).1, NumberAction::Ignore);
        assert_eq!(accept(Event::Minus, NumberState::Fractional).1, NumberAction::Ignore);
        assert_eq!(accept(Event::Minus, NumberState::ExponentSigned).1, NumberAction::Ignore);
        assert_eq!(accept(Event::Minus, NumberState::Exponent).1, NumberAction::Ignore);
    }

    #[test]
    fn test_unlisted_pairs_keep_state() {
        let (state, action) = accept(Event::Equals, NumberState::Fractional);
        assert_eq!(state, NumberState::Fractional);
        assert_eq!(action, NumberAction::Ignore);

        let (state, action) = accept(Event::Dot, NumberState::Start);
        assert_eq!(state, NumberState::Start);
        assert_eq!(action, NumberAction::Ignore);
    }

    #[test]
    fn test_predicates() {
        let complete = [NumberState::Integer, NumberState::Fractional, NumberState::Exponent];
        let signable = [NumberState::Start, NumberState::ExponentMarker];
        for state in [
            NumberState::Start,
            NumberState::Signed,
            NumberState::Integer,
            NumberState::Fractional,
            NumberState::ExponentMarker,
            NumberState::ExponentSigned,
            NumberState::Exponent,
        ] {
            assert_eq!(state.is_complete(), complete.contains(&state), "{}", state);
            assert_eq!(state.accepts_sign(), signable.contains(&state), "{}", state);
        }
    }
}
