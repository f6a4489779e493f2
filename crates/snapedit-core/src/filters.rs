//! Colour and blur filters.
//!
//! Applies the four editor filters to RGBA pixel data.
//!
//! ## Filter Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Blur
//!
//! Each stage is skipped when its parameter is neutral. Colour stages leave
//! alpha untouched. Results are clamped to `[0, 255]` and rounded half to
//! even, which is how a clamped byte array stores a fractional value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decode::{PixelBuffer, CHANNELS};
use crate::FilterParams;

/// Apply all filters to a copy of `source`.
///
/// # Example
/// ```ignore
/// use snapedit_core::{FilterParams, decode::PixelBuffer, filters::apply_filters};
///
/// let gray = PixelBuffer::filled(1, 1, [128, 128, 128, 255]);
/// let params = FilterParams { brightness: 150.0, ..FilterParams::default() };
///
/// let bright = apply_filters(&gray, &params);
/// assert_eq!(bright.pixel(0, 0), [255, 255, 255, 255]);
/// ```
pub fn apply_filters(source: &PixelBuffer, params: &FilterParams) -> PixelBuffer {
    let mut output = source.clone();

    if params.brightness != 100.0 {
        adjust_brightness(output.pixels_mut(), params.brightness);
    }
    if params.contrast != 100.0 {
        adjust_contrast(output.pixels_mut(), params.contrast);
    }
    if params.saturation != 100.0 {
        adjust_saturation(output.pixels_mut(), params.saturation);
    }
    if params.blur > 0 {
        output = box_blur(&output, params.blur);
    }

    output
}

/// Add `(value - 100) * 2.55` to each colour channel.
pub fn adjust_brightness(pixels: &mut [u8], value: f32) {
    let adjustment = (value as f64 - 100.0) * 2.55;

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        for channel in &mut chunk[..3] {
            *channel = to_byte(*channel as f64 + adjustment);
        }
    }
}

/// Stretch or compress channels around the 128 midpoint.
///
/// Formula: `factor = 259(v + 255) / (255(259 - v))`,
/// `output = factor * (input - 128) + 128`
pub fn adjust_contrast(pixels: &mut [u8], value: f32) {
    let value = value as f64;
    let factor = (259.0 * (value + 255.0)) / (255.0 * (259.0 - value));

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        for channel in &mut chunk[..3] {
            *channel = to_byte(factor * (*channel as f64 - 128.0) + 128.0);
        }
    }
}

/// Move each channel toward (or away from) the pixel's gray value.
///
/// Gray uses ITU-R BT.601 luma weights. `value / 100` is the mix factor, so
/// 0 is grayscale and 200 doubles the colour distance.
pub fn adjust_saturation(pixels: &mut [u8], value: f32) {
    let saturation = value as f64 / 100.0;

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let (r, g, b) = (chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let gray = 0.299 * r + 0.587 * g + 0.114 * b;

        chunk[0] = to_byte(gray + saturation * (r - gray));
        chunk[1] = to_byte(gray + saturation * (g - gray));
        chunk[2] = to_byte(gray + saturation * (b - gray));
    }
}

/// Box blur with a square window of half-width `radius`.
///
/// Windows are clipped at the image border and divided by the number of
/// samples actually inside the image, so edge pixels average fewer
/// neighbours rather than reading padding. Alpha is copied through.
///
/// Per-channel summed-area tables keep this linear in the pixel count while
/// producing exactly the sums of the direct window scan.
pub fn box_blur(image: &PixelBuffer, radius: u32) -> PixelBuffer {
    if radius == 0 || image.is_empty() {
        return image.clone();
    }

    let width = image.width() as usize;
    let height = image.height() as usize;
    let radius = radius as usize;
    let src = image.pixels();

    // sums[c][(y + 1) * (width + 1) + (x + 1)] = sum of channel c over [0..=x] x [0..=y]
    let stride = width + 1;
    let mut sums = [
        vec![0u64; stride * (height + 1)],
        vec![0u64; stride * (height + 1)],
        vec![0u64; stride * (height + 1)],
    ];
    for y in 0..height {
        let mut row = [0u64; 3];
        for x in 0..width {
            let idx = (y * width + x) * CHANNELS;
            for (c, table) in sums.iter_mut().enumerate() {
                row[c] += src[idx + c] as u64;
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row[c];
            }
        }
    }

    let mut output = src.to_vec();
    for y in 0..height {
        let top = y.saturating_sub(radius);
        let bottom = y.saturating_add(radius).min(height - 1) + 1;
        for x in 0..width {
            let left = x.saturating_sub(radius);
            let right = x.saturating_add(radius).min(width - 1) + 1;
            let count = ((bottom - top) * (right - left)) as f64;

            let idx = (y * width + x) * CHANNELS;
            for (c, table) in sums.iter().enumerate() {
                let total = table[bottom * stride + right] + table[top * stride + left]
                    - table[top * stride + right]
                    - table[bottom * stride + left];
                output[idx + c] = to_byte(total as f64 / count);
            }
        }
    }

    PixelBuffer::from_parts(image.width(), image.height(), output)
}

#[inline]
fn to_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Named filter bundles offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Vintage,
    Vivid,
    Sepia,
    BlackWhite,
    Soft,
    Sharp,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Vintage,
        Preset::Vivid,
        Preset::Sepia,
        Preset::BlackWhite,
        Preset::Soft,
        Preset::Sharp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Vintage => "vintage",
            Preset::Vivid => "vivid",
            Preset::Sepia => "sepia",
            Preset::BlackWhite => "blackwhite",
            Preset::Soft => "soft",
            Preset::Sharp => "sharp",
        }
    }

    /// The filter parameters this preset stands for.
    pub fn params(self) -> FilterParams {
        let (brightness, contrast, saturation, blur) = match self {
            Preset::Vintage => (110.0, 90.0, 80.0, 0),
            Preset::Vivid => (105.0, 120.0, 130.0, 0),
            Preset::Sepia => (110.0, 90.0, 40.0, 0),
            Preset::BlackWhite => (100.0, 110.0, 0.0, 0),
            Preset::Soft => (105.0, 85.0, 95.0, 1),
            Preset::Sharp => (100.0, 130.0, 110.0, 0),
        };
        FilterParams {
            brightness,
            contrast,
            saturation,
            blur,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for preset names the editor does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "vintage" => Ok(Preset::Vintage),
            "vivid" => Ok(Preset::Vivid),
            "sepia" => Ok(Preset::Sepia),
            "blackwhite" | "blackandwhite" | "bw" => Ok(Preset::BlackWhite),
            "soft" => Ok(Preset::Soft),
            "sharp" => Ok(Preset::Sharp),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| PixelBuffer::new(w, h, pixels).unwrap())
        })
    }

    proptest! {
        /// Property: neutral parameters never change a pixel.
        #[test]
        fn prop_neutral_is_identity(img in buffer_strategy()) {
            prop_assert_eq!(apply_filters(&img, &FilterParams::default()), img);
        }

        /// Property: no filter ever touches alpha.
        #[test]
        fn prop_alpha_preserved(
            img in buffer_strategy(),
            brightness in 0.0f32..=200.0,
            contrast in 0.0f32..=200.0,
            saturation in 0.0f32..=200.0,
            blur in 0u32..=4,
        ) {
            let out = apply_filters(&img, &FilterParams { brightness, contrast, saturation, blur });
            prop_assert_eq!(out.dimensions(), img.dimensions());
            for (a, b) in out.pixels().chunks_exact(4).zip(img.pixels().chunks_exact(4)) {
                prop_assert_eq!(a[3], b[3]);
            }
        }

        /// Property: brightening never darkens a channel.
        #[test]
        fn prop_brightness_monotonic(img in buffer_strategy(), value in 100.0f32..=200.0) {
            let mut out = img.pixels().to_vec();
            adjust_brightness(&mut out, value);
            for (a, b) in out.iter().zip(img.pixels()) {
                prop_assert!(a >= b);
            }
        }

        /// Property: blurring a uniform image leaves it unchanged.
        #[test]
        fn prop_blur_uniform_stable(
            (w, h) in (1u32..=10, 1u32..=10),
            rgba in any::<[u8; 4]>(),
            radius in 1u32..=5,
        ) {
            let img = PixelBuffer::filled(w, h, rgba);
            prop_assert_eq!(box_blur(&img, radius), img);
        }
    }
}
