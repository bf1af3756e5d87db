//! Session persistence
//!
//! The engine keeps no state of its own; the CLI can store the last returned
//! session as JSON so that the next invocation continues from it.

use anyhow::{Context, Result};
use calc_engine::Session;
use std::fs;
use std::path::Path;

/// Load a session, or start a fresh one if the file does not exist yet
pub fn load_session(path: &Path) -> Result<Session> {
    if !path.exists() {
        log::debug!("No session file at {:?}, starting fresh", path);
        return Ok(Session::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {:?}", path))?;

    let session: Session = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse session file: {:?}", path))?;

    log::debug!("Loaded session {:?} from {:?}", session.expression, path);
    Ok(session)
}

/// Write a session to disk
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    let content = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write session file: {:?}", path))?;

    log::debug!("Saved session {:?} to {:?}", session.expression, path);
    Ok(())
}
