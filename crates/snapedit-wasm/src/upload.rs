//! Upload helper bindings.
//!
//! # Functions
//!
//! - [`validate_upload`] - Check type and size before uploading
//! - [`compress_image`] - Shrink and re-encode as JPEG for storage
//! - [`generate_thumbnail`] - Square JPEG preview
//! - [`image_dimensions`] - Read `[width, height]` from the header
//! - [`format_file_size`] - Human-readable byte counts
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const check = validate_upload(bytes, file.type);
//! if (!check.isValid) {
//!   showErrors(check.errors);
//!   return;
//! }
//! const stored = compress_image(bytes);
//! const preview = generate_thumbnail(bytes, 300);
//! ```

use serde::Serialize;
use snapedit_core::config::DEFAULT_MAX_INPUT_BYTES;
use snapedit_core::upload::{
    self, COMPRESS_MAX_HEIGHT, COMPRESS_MAX_WIDTH, COMPRESS_QUALITY, THUMBNAIL_SIZE,
};
use wasm_bindgen::prelude::*;

use crate::error::js_error;

/// Plain-object form of an upload check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadReport {
    is_valid: bool,
    errors: Vec<String>,
}

/// Check `bytes` against the allowed image types and a size limit
/// (10 MB unless `max_size` is given).
///
/// Returns `{ isValid: boolean, errors: string[] }`.
#[wasm_bindgen]
pub fn validate_upload(
    bytes: &[u8],
    mime_type: Option<String>,
    max_size: Option<usize>,
) -> Result<JsValue, JsValue> {
    let check = upload::validate_upload(
        bytes,
        mime_type.as_deref(),
        max_size.unwrap_or(DEFAULT_MAX_INPUT_BYTES),
    );
    let report = UploadReport {
        is_valid: check.is_valid(),
        errors: check.errors,
    };
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Scale an image to fit `maxWidth × maxHeight` (default 1920×1080) and
/// re-encode as JPEG (default quality 0.8).
#[wasm_bindgen]
pub fn compress_image(
    bytes: &[u8],
    max_width: Option<u32>,
    max_height: Option<u32>,
    quality: Option<f32>,
) -> Result<Vec<u8>, JsValue> {
    upload::compress_image(
        bytes,
        max_width.unwrap_or(COMPRESS_MAX_WIDTH),
        max_height.unwrap_or(COMPRESS_MAX_HEIGHT),
        quality.unwrap_or(COMPRESS_QUALITY),
    )
    .map_err(js_error)
}

/// Centre-square JPEG thumbnail, `size` pixels a side (default 200).
#[wasm_bindgen]
pub fn generate_thumbnail(bytes: &[u8], size: Option<u32>) -> Result<Vec<u8>, JsValue> {
    upload::generate_thumbnail(bytes, size.unwrap_or(THUMBNAIL_SIZE)).map_err(js_error)
}

/// Read `[width, height]` without decoding pixels.
#[wasm_bindgen]
pub fn image_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    upload::image_dimensions(bytes)
        .map(|(width, height)| vec![width, height])
        .map_err(js_error)
}

#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    upload::format_file_size(bytes.max(0.0) as u64)
}
