//! # Rendering
//!
//! Serializes a configuration to the JSON text written next to the data file.

use crate::config::CrudApiConfiguration;
use crate::error::{AppError, AppResult};

/// Renders `config` as pretty-printed JSON (two-space indent, camelCase keys).
pub fn render_json(config: &CrudApiConfiguration) -> AppResult<String> {
    serde_json::to_string_pretty(config)
        .map_err(|e| AppError::General(format!("Failed to serialize configuration: {}", e)))
}
