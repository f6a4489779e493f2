//! Geometric transforms: rotation, flips, crop and resize.
//!
//! Every function is pure: it borrows the input buffer and returns a new one.
//! The editing session installs the result and records it in history.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are whole pixels
//! - Origin is top-left corner

mod crop;
mod flip;
mod rotation;

use thiserror::Error;

use crate::decode::{self, FilterType, PixelBuffer};

pub use crop::apply_crop;
pub use flip::{flip_horizontal, flip_vertical};
pub use rotation::{apply_rotation, compute_rotated_bounds};

/// Errors raised by geometric transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The crop rectangle is empty or not inside the image.
    #[error(
        "Crop rectangle {width}x{height} at ({x}, {y}) is outside the \
         {image_width}x{image_height} image"
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// A resize target has a zero dimension.
    #[error("Invalid resize target {width}x{height}: dimensions must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Resample an image to exact dimensions.
pub fn apply_resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    decode::resize(image, width, height, filter)
        .map_err(|_| TransformError::InvalidDimensions { width, height })
}
