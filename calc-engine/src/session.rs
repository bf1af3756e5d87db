//! Session state threaded through every step
//!
//! A session is the whole calculator state: the visible expression, both
//! machine states and the undo log. It is passed into [`crate::step`] by
//! value and a new one comes back, so an adapter only ever holds the last
//! returned session.

use crate::number::NumberState;
use crate::supervisor::SupervisorState;
use crate::types::Event;
use serde::{Deserialize, Serialize};

/// Session content a step discarded (by evaluating or clearing) before appending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replaced {
    pub expression: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<LogEntry>,
}

/// One accepted character, recorded so it can be undone exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The appended character
    pub char: char,
    /// Its classification
    pub event: Event,
    /// Supervisor state before the character was processed
    pub supervisor_state: SupervisorState,
    /// Number state before the character was processed
    pub number_state: NumberState,
    /// What the same step discarded before appending, restored on undo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced: Option<Replaced>,
}

/// Complete calculator state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Text shown on the display
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub number_state: NumberState,
    #[serde(default)]
    pub supervisor_state: SupervisorState,
    /// Undo log, newest entry last
    #[serde(default)]
    pub log: Vec<LogEntry>,
}

impl Session {
    /// A fresh session: empty display, both machines at their start
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been typed since the last clear
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
            && self.log.is_empty()
            && self.number_state == NumberState::Start
            && self.supervisor_state == SupervisorState::Init
    }

    /// True when the display shows the evaluation error token
    pub fn is_error(&self) -> bool {
        self.expression == crate::evaluator::ERROR_TOKEN
    }
}
