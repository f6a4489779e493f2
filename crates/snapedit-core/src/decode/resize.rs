//! Image resizing functions for the editor, thumbnails and compressed uploads.
//!
//! All functions return new `PixelBuffer` instances without modifying the input.

use super::{DecodeError, FilterType, PixelBuffer};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if either target dimension is zero.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(PixelBuffer::from_rgba_image(resized))
}

/// Scale an image down so it fits inside `max_width × max_height`.
///
/// Images that already fit are returned unchanged; nothing is ever upscaled.
/// Both dimensions are scaled by the same ratio,
/// `min(max_width / width, max_height / height)`.
pub fn fit_within(
    image: &PixelBuffer,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (width, height) = fit_dimensions(image.width(), image.height(), max_width, max_height);
    resize(image, width, height, filter)
}

/// Generate a square thumbnail from the centre of the image.
///
/// The largest centred square is cut out and scaled to `size × size`.
pub fn square_thumbnail(image: &PixelBuffer, size: u32) -> Result<PixelBuffer, DecodeError> {
    if size == 0 || image.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let side = image.width().min(image.height());
    let left = (image.width() - side) / 2;
    let top = (image.height() - side) / 2;
    let square = image::imageops::crop_imm(&rgba_image, left, top, side, side).to_image();

    let thumb = image::imageops::resize(
        &square,
        size,
        size,
        FilterType::Bilinear.to_image_filter(),
    );
    Ok(PixelBuffer::from_rgba_image(thumb))
}

/// Dimensions after fitting `width × height` inside the bounding box.
///
/// Scaled dimensions are truncated toward zero, the same way a canvas
/// truncates a fractional width, and never drop below one pixel.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    // The epsilon keeps exact fits like 700 * (600 / 700) from landing on 599.
    let scale = |dim: u32| ((dim as f64 * ratio + 1e-9).floor() as u32).max(1);

    (scale(width), scale(height))
}
