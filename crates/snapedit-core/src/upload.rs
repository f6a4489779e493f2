//! Upload preparation helpers.
//!
//! Stateless functions used before an image reaches the editor: checking a
//! file against the upload policy, shrinking it for storage, and cutting a
//! square preview thumbnail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{EditorConfig, DEFAULT_MIME_TYPES};
use crate::decode::{self, sniff_mime_type, DecodeError, FilterType};
use crate::encode::{encode_jpeg, jpeg_quality, EncodeError};

pub use crate::decode::image_dimensions;

/// Longest edges used by [`compress_image`] callers that take the defaults.
pub const COMPRESS_MAX_WIDTH: u32 = 1920;
pub const COMPRESS_MAX_HEIGHT: u32 = 1080;
pub const COMPRESS_QUALITY: f32 = 0.8;

pub const THUMBNAIL_SIZE: u32 = 200;
pub const THUMBNAIL_QUALITY: f32 = 0.7;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Outcome of [`validate_upload`]. Empty `errors` means the file passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCheck {
    pub errors: Vec<String>,
}

impl UploadCheck {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check `bytes` against the default MIME allow-list and `max_size`.
///
/// The declared MIME type wins when present; otherwise the type is sniffed
/// from the file's magic number.
///
/// # Example
///
/// ```ignore
/// let check = validate_upload(&bytes, Some("image/tiff"), 10 * 1024 * 1024);
/// assert_eq!(check.errors, ["Invalid file type. Please upload a valid image."]);
/// ```
pub fn validate_upload(bytes: &[u8], declared_mime: Option<&str>, max_size: usize) -> UploadCheck {
    check(bytes, declared_mime, &DEFAULT_MIME_TYPES, max_size)
}

/// Like [`validate_upload`] but with the allow-list and limit from `config`.
pub fn validate_upload_with(
    config: &EditorConfig,
    bytes: &[u8],
    declared_mime: Option<&str>,
) -> UploadCheck {
    check(
        bytes,
        declared_mime,
        &config.allowed_mime_types,
        config.max_input_bytes,
    )
}

fn check<S: AsRef<str>>(
    bytes: &[u8],
    declared_mime: Option<&str>,
    allowed: &[S],
    max_size: usize,
) -> UploadCheck {
    let mut errors = Vec::new();

    let mime = declared_mime
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .or_else(|| sniff_mime_type(bytes));
    let allowed_type = mime.is_some_and(|mime| {
        allowed
            .iter()
            .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(mime))
    });
    if !allowed_type {
        errors.push("Invalid file type. Please upload a valid image.".to_string());
    }

    if bytes.len() > max_size {
        errors.push(format!(
            "File size too large. Maximum size is {}.",
            format_file_size(max_size as u64)
        ));
    }

    if !errors.is_empty() {
        tracing::warn!(?mime, size = bytes.len(), ?errors, "upload rejected");
    }
    UploadCheck { errors }
}

/// Human-readable byte count using 1024-based units.
///
/// Two decimals at most, trailing zeros dropped: `1536` is `"1.5 KB"`,
/// `10485760` is `"10 MB"`. Anything from 1024 GB upward stays in GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut exponent = 0;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[exponent])
}

/// Shrink an image to fit `max_width × max_height` and re-encode as JPEG.
///
/// Images that already fit are re-encoded at their own size.
///
/// # Errors
///
/// Returns `UploadError::Decode` for unreadable input.
pub fn compress_image(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
    quality: f32,
) -> Result<Vec<u8>, UploadError> {
    let image = decode::decode_image(bytes)?;
    let fitted = decode::fit_within(&image, max_width, max_height, FilterType::Bilinear)?;
    let jpeg = encode_jpeg(&fitted, jpeg_quality(quality))?;

    tracing::debug!(
        from = bytes.len(),
        to = jpeg.len(),
        width = fitted.width(),
        height = fitted.height(),
        "compressed upload"
    );
    Ok(jpeg)
}

/// Centre-square JPEG thumbnail of `size × size` pixels.
pub fn generate_thumbnail(bytes: &[u8], size: u32) -> Result<Vec<u8>, UploadError> {
    let image = decode::decode_image(bytes)?;
    let thumbnail = decode::square_thumbnail(&image, size)?;
    Ok(encode_jpeg(&thumbnail, jpeg_quality(THUMBNAIL_QUALITY))?)
}
