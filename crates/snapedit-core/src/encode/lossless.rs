//! Lossless PNG and WebP encoding.
//!
//! Both formats keep the alpha channel, so the pixels read back are exactly
//! the pixels written.

use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::PixelBuffer;

/// Encode a buffer to PNG bytes.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = checked_dimensions(image)?;
    let mut buffer = Cursor::new(Vec::new());

    PngEncoder::new(&mut buffer)
        .write_image(image.pixels(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a buffer to lossless WebP bytes.
pub fn encode_webp(image: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = checked_dimensions(image)?;
    let mut buffer = Cursor::new(Vec::new());

    WebPEncoder::new_lossless(&mut buffer)
        .write_image(image.pixels(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn checked_dimensions(image: &PixelBuffer) -> Result<(u32, u32), EncodeError> {
    match image.dimensions() {
        (0, height) => Err(EncodeError::InvalidDimensions { width: 0, height }),
        (width, 0) => Err(EncodeError::InvalidDimensions { width, height: 0 }),
        dims => Ok(dims),
    }
}
