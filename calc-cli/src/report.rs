//! Output rendering
//!
//! Renders a session for the terminal. The expression is always printed
//! verbatim; state details are optional.

use calc_engine::Session;
use serde_json::json;

use crate::config::OutputFormat;

/// Render a session in the requested format
pub fn render(session: &Session, format: OutputFormat, show_state: bool) -> String {
    match format {
        OutputFormat::Text => render_text(session, show_state),
        OutputFormat::Json => render_json(session, show_state),
    }
}

fn render_text(session: &Session, show_state: bool) -> String {
    if !show_state {
        return session.expression.clone();
    }

    format!(
        "{}\n  supervisor: {}  number: {}  undo: {}",
        session.expression,
        session.supervisor_state,
        session.number_state,
        session.log.len()
    )
}

fn render_json(session: &Session, show_state: bool) -> String {
    let value = if show_state {
        json!(session)
    } else {
        json!({ "expression": session.expression })
    };
    value.to_string()
}
