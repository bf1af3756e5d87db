//! Character classification
//!
//! Maps one input character to the [`Event`] the state machines consume.
//! The character classes are mutually exclusive, so the order of the match
//! arms carries no meaning.

use crate::config::{CalculatorConfig, DEFAULT_CLEAR_MARKER, DEFAULT_DELETE_MARKER};
use crate::types::{Event, Operator};

/// Classifier with configurable delete and all-clear markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    delete_marker: char,
    clear_marker: char,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            delete_marker: DEFAULT_DELETE_MARKER,
            clear_marker: DEFAULT_CLEAR_MARKER,
        }
    }
}

impl Classifier {
    /// Build a classifier from an already validated configuration
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self {
            delete_marker: config.delete_marker,
            clear_marker: config.clear_marker,
        }
    }

    /// Classify a single character
    pub fn classify(&self, c: char) -> Event {
        match c {
            '0'..='9' => Event::Digit,
            '-' => Event::Minus,
            '.' => Event::Dot,
            'e' => Event::Exponent,
            '=' => Event::Equals,
            '+' | '*' | '/' => Operator::from_symbol(c)
                .map(Event::Operator)
                .unwrap_or(Event::Unrecognized),
            c if c == self.delete_marker => Event::Delete,
            c if c == self.clear_marker => Event::AllClear,
            _ => Event::Unrecognized,
        }
    }
}

/// Classify a character using the default markers (`d` delete, `a` all clear)
pub fn classify(c: char) -> Event {
    Classifier::default().classify(c)
}
