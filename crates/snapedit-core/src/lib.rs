//! SnapEdit Core - Image editing library
//!
//! This crate provides the image editing pipeline behind SnapEdit: decoding
//! uploads, geometric transforms, colour and blur filters, bounded
//! undo/redo history, and export encoding.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filters;
pub mod history;
pub mod session;
pub mod transform;
pub mod upload;

pub use config::EditorConfig;
pub use decode::{ImageSource, PixelBuffer};
pub use encode::ExportFormat;
pub use error::EditError;
pub use filters::Preset;
pub use session::EditSession;
pub use transform::{apply_crop, apply_rotation, compute_rotated_bounds};

/// Colour and blur filter settings.
///
/// Colour values are percentages with 100 as neutral (roughly 0 to 200).
/// `blur` is a box-blur radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub blur: u32,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur: 0,
        }
    }
}

impl FilterParams {
    /// Create neutral filter settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if every filter would be skipped
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_filter_params_default_is_neutral() {
        let params = FilterParams::new();
        assert!(params.is_neutral());
        assert_eq!(params.brightness, 100.0);
        assert_eq!(params.blur, 0);
    }

    #[test]
    fn test_filter_params_not_neutral() {
        let params = FilterParams {
            blur: 1,
            ..FilterParams::default()
        };
        assert!(!params.is_neutral());
    }

    #[test]
    fn test_filter_params_partial_deserialize() {
        let value = serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
            [("contrast", 140.0f32)].into_iter(),
        );
        let params = FilterParams::deserialize(value).unwrap();
        assert_eq!(params.contrast, 140.0);
        assert_eq!(params.saturation, 100.0);
    }
}
