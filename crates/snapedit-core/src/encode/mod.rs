//! Export encoding for edited images.
//!
//! This module provides functionality for:
//! - Encoding a [`PixelBuffer`] as JPEG, PNG or WebP
//! - Wrapping encoded bytes in a `data:` URL
//!
//! # Architecture
//!
//! Quality follows the browser convention of a fraction in `[0, 1]`. Only
//! JPEG is lossy; PNG and WebP are written losslessly and ignore quality.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::encode::{encode, to_data_url, ExportFormat};
//!
//! let bytes = encode(&image, ExportFormat::Jpeg, 0.9)?;
//! let url = to_data_url(ExportFormat::Jpeg.mime_type(), &bytes);
//! assert!(url.starts_with("data:image/jpeg;base64,"));
//! ```

mod jpeg;
mod lossless;

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelBuffer;

pub use jpeg::encode_jpeg;
pub use lossless::{encode_png, encode_webp};

/// Errors that can occur during export encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output container for [`encode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Png => "image/png",
            ExportFormat::WebP => "image/webp",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Error for export format names that are not supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported export format '{0}'")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    /// Accepts MIME types (`image/png`) and bare names (`png`, `jpg`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("image/").unwrap_or(&lowered);

        match name {
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "png" => Ok(ExportFormat::Png),
            "webp" => Ok(ExportFormat::WebP),
            _ => Err(UnknownExportFormat(s.to_string())),
        }
    }
}

/// Map a `[0, 1]` quality fraction to the 1-100 scale of the JPEG encoder.
///
/// Out-of-range and NaN inputs are clamped.
pub fn jpeg_quality(quality: f32) -> u8 {
    let scaled = (quality.clamp(0.0, 1.0) * 100.0).round() as u8;
    scaled.clamp(1, 100)
}

/// Encode `image` in the requested format.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty buffer and
/// `EncodeError::EncodingFailed` if the codec rejects the data.
pub fn encode(
    image: &PixelBuffer,
    format: ExportFormat,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        ExportFormat::Jpeg => encode_jpeg(image, jpeg_quality(quality))?,
        ExportFormat::Png => encode_png(image)?,
        ExportFormat::WebP => encode_webp(image)?,
    };

    tracing::debug!(
        format = format.mime_type(),
        width = image.width(),
        height = image.height(),
        size = bytes.len(),
        "encoded export"
    );
    Ok(bytes)
}

/// Wrap encoded bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{payload}")
}
