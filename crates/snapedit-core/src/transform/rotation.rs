//! Image rotation about the centre with canvas expansion.
//!
//! Quarter turns are exact pixel remaps. Any other angle uses inverse
//! mapping: for each pixel in the output we find the source position and
//! interpolate bilinearly in premultiplied alpha. Output pixels that map
//! outside the source stay fully transparent.
//!
//! Positive angles turn the picture clockwise, matching a canvas whose y axis
//! points down. For rotation by angle θ the inverse transform is:
//! ```text
//! src_x =  (dst_x - cx) * cos(θ) + (dst_y - cy) * sin(θ) + src_cx
//! src_y = -(dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + src_cy
//! ```

use crate::decode::{PixelBuffer, CHANNELS};

const ANGLE_EPSILON: f64 = 0.001;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// `new_w = |w·cos| + |h·sin|`, `new_h = |w·sin| + |h·cos|`, rounded to the
/// nearest pixel and never below one.
///
/// # Example
///
/// ```
/// use snapedit_core::transform::compute_rotated_bounds;
///
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!((w, h), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return if turns % 2 == 0 {
            (width, height)
        } else {
            (height, width)
        };
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image by `angle_degrees` (positive = clockwise).
///
/// The output canvas is expanded to hold the whole rotated image.
pub fn apply_rotation(image: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    if let Some(turns) = quarter_turns(angle_degrees) {
        return rotate_quarter_turns(image, turns);
    }

    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * CHANNELS];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work on pixel centres
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * CHANNELS;
            output[dst_idx..dst_idx + CHANNELS]
                .copy_from_slice(&sample_bilinear(image, src_x, src_y));
        }
    }

    PixelBuffer::from_parts(dst_w, dst_h, output)
}

/// Number of clockwise quarter turns (0..4) if the angle is a multiple of 90°.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let turns = (angle_degrees / 90.0).round();
    if (angle_degrees - turns * 90.0).abs() < ANGLE_EPSILON {
        Some((turns as i64).rem_euclid(4) as u8)
    } else {
        None
    }
}

fn rotate_quarter_turns(image: &PixelBuffer, turns: u8) -> PixelBuffer {
    let Some(rgba) = image.to_rgba_image() else {
        return image.clone();
    };
    let rotated = match turns {
        1 => image::imageops::rotate90(&rgba),
        2 => image::imageops::rotate180(&rgba),
        3 => image::imageops::rotate270(&rgba),
        _ => return image.clone(),
    };
    PixelBuffer::from_rgba_image(rotated)
}

/// Fetch a pixel as premultiplied `[r, g, b, a]`, or transparent when outside.
#[inline]
fn premultiplied(image: &PixelBuffer, px: i64, py: i64) -> [f64; 4] {
    if px < 0 || py < 0 || px >= image.width() as i64 || py >= image.height() as i64 {
        return [0.0; 4];
    }
    let idx = image.index(px as u32, py as u32);
    let p = &image.pixels()[idx..idx + CHANNELS];
    let a = p[3] as f64 / 255.0;
    [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, p[3] as f64]
}

/// Sample a pixel using bilinear interpolation.
///
/// Neighbours outside the image count as transparent so rotated edges fade
/// out instead of smearing the border colour.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    if x <= -1.0 || y <= -1.0 || x >= image.width() as f64 || y >= image.height() as f64 {
        return [0; 4];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x0 + 1, y0);
    let p01 = premultiplied(image, x0, y0 + 1);
    let p11 = premultiplied(image, x0 + 1, y0 + 1);

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3].clamp(0.0, 255.0);
    if alpha < 0.5 {
        return [0; 4];
    }
    let unpremultiply = 255.0 / alpha;
    [
        (acc[0] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[1] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[2] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        alpha.round() as u8,
    ]
}
