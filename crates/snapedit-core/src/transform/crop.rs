//! Image cropping in pixel coordinates.
//!
//! The crop rectangle must lie entirely inside the image; nothing is clamped.
//!
//! # Example
//!
//! ```ignore
//! // Crop a 50x50 square starting at (10, 10)
//! let cropped = apply_crop(&image, 10, 10, 50, 50)?;
//! ```

use super::TransformError;
use crate::decode::{PixelBuffer, CHANNELS};

/// Extract the `width × height` region whose top-left corner is `(x, y)`.
///
/// # Errors
///
/// Returns `TransformError::OutOfBounds` if the rectangle is empty or is not
/// fully contained in the image.
pub fn apply_crop(
    image: &PixelBuffer,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, TransformError> {
    let fits_horizontally = x.checked_add(width).is_some_and(|right| right <= image.width());
    let fits_vertically = y.checked_add(height).is_some_and(|bottom| bottom <= image.height());

    if width == 0 || height == 0 || !fits_horizontally || !fits_vertically {
        return Err(TransformError::OutOfBounds {
            x,
            y,
            width,
            height,
            image_width: image.width(),
            image_height: image.height(),
        });
    }

    if (x, y, width, height) == (0, 0, image.width(), image.height()) {
        return Ok(image.clone());
    }

    let row_bytes = width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * height as usize);

    // Copy pixel data row by row for efficiency
    for row in y..y + height {
        let start = image.index(x, row);
        output.extend_from_slice(&image.pixels()[start..start + row_bytes]);
    }

    Ok(PixelBuffer::from_parts(width, height, output))
}
