//! Image decoding pipeline for SnapEdit.
//!
//! This module provides functionality for:
//! - Resolving editor input (bytes, data URLs, local paths) to encoded bytes
//! - Decoding JPEG, PNG, GIF and WebP into RGBA pixel buffers
//! - Resizing for the editor canvas, thumbnails and compressed uploads
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::decode::{decode_image, fit_within, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let canvas = fit_within(&image, 800, 600, FilterType::Bilinear).unwrap();
//! println!("Editing {}x{} image", canvas.width(), canvas.height());
//! ```

mod raster;
mod resize;
mod source;
mod types;

pub use raster::{decode_image, image_dimensions};
pub use resize::{fit_dimensions, fit_within, resize, square_thumbnail};
pub use source::{sniff_mime_type, ImageSource, ResolvedSource, SourceError};
pub use types::{
    DecodeError, FilterType, Orientation, PixelBuffer, PixelLengthMismatch, CHANNELS,
};

#[cfg(test)]
pub(crate) use raster::test_support;
