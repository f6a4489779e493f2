//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so RGBA input is composited over black before
//! encoding. A translucent pixel therefore darkens in proportion to its
//! transparency.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::{PixelBuffer, CHANNELS};

/// Encode a buffer to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGBA source buffer
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 70-90: Good quality, the editor exports at 90 by default
/// * Below 60: Low quality, visible artifacts
///
/// # Example
///
/// ```ignore
/// use snapedit_core::{decode::PixelBuffer, encode::encode_jpeg};
///
/// let gray = PixelBuffer::filled(100, 100, [128, 128, 128, 255]);
/// let jpeg = encode_jpeg(&gray, 90).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let quality = quality.clamp(1, 100);
    let rgb = composite_over_black(image.pixels());

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Drop alpha by blending each pixel onto an opaque black background.
fn composite_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / CHANNELS * 3);

    for pixel in rgba.chunks_exact(CHANNELS) {
        let alpha = pixel[3] as u32;
        if alpha == 255 {
            rgb.extend_from_slice(&pixel[..3]);
        } else {
            for &channel in &pixel[..3] {
                rgb.push(((channel as u32 * alpha + 127) / 255) as u8);
            }
        }
    }

    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
