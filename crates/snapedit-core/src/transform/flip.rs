//! Mirror operations.

use crate::decode::{PixelBuffer, CHANNELS};

/// Mirror the image left-to-right.
pub fn flip_horizontal(image: &PixelBuffer) -> PixelBuffer {
    let row_bytes = image.width() as usize * CHANNELS;
    let mut output = Vec::with_capacity(image.pixels().len());

    if row_bytes > 0 {
        for row in image.pixels().chunks_exact(row_bytes) {
            for pixel in row.chunks_exact(CHANNELS).rev() {
                output.extend_from_slice(pixel);
            }
        }
    }

    PixelBuffer::from_parts(image.width(), image.height(), output)
}

/// Mirror the image top-to-bottom.
pub fn flip_vertical(image: &PixelBuffer) -> PixelBuffer {
    let row_bytes = image.width() as usize * CHANNELS;
    let mut output = Vec::with_capacity(image.pixels().len());

    if row_bytes > 0 {
        for row in image.pixels().chunks_exact(row_bytes).rev() {
            output.extend_from_slice(row);
        }
    }

    PixelBuffer::from_parts(image.width(), image.height(), output)
}
