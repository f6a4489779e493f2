//! Editor configuration.
//!
//! Every field has a default, so a JavaScript caller may pass a partial
//! object (`{ maxWidth: 1024 }`) through `serde_wasm_bindgen`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::history::DEFAULT_CAPACITY;

/// MIME types accepted for upload and editing by default.
pub const DEFAULT_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// 10 MB upload limit.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Raised by [`EditorConfig::validate`]; lists every problem found.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid editor configuration: {}", .problems.join("; "))]
pub struct ConfigError {
    pub problems: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Bounding box applied on load.
    pub max_width: u32,
    pub max_height: u32,
    /// Number of undo snapshots kept.
    pub history_capacity: usize,
    pub max_input_bytes: usize,
    pub allowed_mime_types: Vec<String>,
    /// Export quality in `[0, 1]` when the caller gives none.
    pub default_quality: f32,
    /// Resampling used when scaling on load and by `resize`.
    pub resample_filter: FilterType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
            history_capacity: DEFAULT_CAPACITY,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            allowed_mime_types: DEFAULT_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            default_quality: 0.9,
            resample_filter: FilterType::Bilinear,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the configuration can drive a session.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for zero bounds, zero capacity, an empty
    /// upload limit, or a default quality outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.max_width == 0 || self.max_height == 0 {
            problems.push(format!(
                "maximum dimensions must be non-zero (got {}x{})",
                self.max_width, self.max_height
            ));
        }
        if self.history_capacity == 0 {
            problems.push("history capacity must be at least 1".to_string());
        }
        if self.max_input_bytes == 0 {
            problems.push("maximum input size must be non-zero".to_string());
        }
        if !(0.0..=1.0).contains(&self.default_quality) {
            problems.push(format!(
                "default quality must be between 0 and 1 (got {})",
                self.default_quality
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { problems })
        }
    }

    /// Whether `mime_type` is in the allow-list (case-insensitive).
    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }
}
