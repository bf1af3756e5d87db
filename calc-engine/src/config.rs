//! Calculator configuration types
//!
//! The engine needs very little configuration: only the two marker characters
//! an adapter sends for "delete last character" and "all clear". Everything
//! else in the input alphabet is fixed.

use crate::types::{CalcError, Result};
use serde::{Deserialize, Serialize};

/// Default character for deleting the last input
pub const DEFAULT_DELETE_MARKER: char = 'd';

/// Default character for clearing the whole session
pub const DEFAULT_CLEAR_MARKER: char = 'a';

/// Characters with a fixed meaning that cannot be used as markers
const RESERVED: &[char] = &['-', '.', '+', '*', '/', '=', 'e'];

/// Configuration for the calculator engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Character that deletes the last accepted character
    #[serde(default = "default_delete_marker")]
    pub delete_marker: char,

    /// Character that clears the expression and resets both machines
    #[serde(default = "default_clear_marker")]
    pub clear_marker: char,
}

fn default_delete_marker() -> char {
    DEFAULT_DELETE_MARKER
}

fn default_clear_marker() -> char {
    DEFAULT_CLEAR_MARKER
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            delete_marker: DEFAULT_DELETE_MARKER,
            clear_marker: DEFAULT_CLEAR_MARKER,
        }
    }
}

impl CalculatorConfig {
    /// Create a new configuration with default markers
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the delete marker
    pub fn with_delete_marker(mut self, marker: char) -> Self {
        self.delete_marker = marker;
        self
    }

    /// Builder method: set the all-clear marker
    pub fn with_clear_marker(mut self, marker: char) -> Self {
        self.clear_marker = marker;
        self
    }

    /// Check that the markers are usable
    ///
    /// Markers must be distinct, and must not shadow a digit or any other
    /// character of the fixed alphabet.
    pub fn validate(&self) -> Result<()> {
        for (name, marker) in [("delete", self.delete_marker), ("clear", self.clear_marker)] {
            if marker.is_ascii_digit() || RESERVED.contains(&marker) {
                return Err(CalcError::InvalidConfig(format!(
                    "{} marker {:?} is already part of the input alphabet",
                    name, marker
                )));
            }
        }

        if self.delete_marker == self.clear_marker {
            return Err(CalcError::InvalidConfig(format!(
                "delete and clear markers are both {:?}",
                self.delete_marker
            )));
        }

        Ok(())
    }
}
