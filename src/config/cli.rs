use crate::utils::error::Result;
use crate::utils::validation::validate_path;
use std::path::Path;

/// Loads a saved event for local replay.
pub fn read_event_file(path: &str) -> Result<serde_json::Value> {
    validate_path("event", path)?;

    let content = std::fs::read_to_string(Path::new(path))?;
    let value = serde_json::from_str(&content)?;
    tracing::debug!("Loaded event from {}", path);
    Ok(value)
}
