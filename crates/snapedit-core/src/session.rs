//! The editing session state machine.
//!
//! # Architecture
//!
//! A session is either empty or holds one loaded image:
//!
//! - `baseline`: the image as loaded and scaled; restored by `reset`
//! - `current`: what the caller sees and exports
//! - `history`: bounded snapshots of `current` for undo/redo
//! - `active_filters`: the last filter parameters applied
//!
//! Every operation computes its result completely before touching any of
//! these, so a failing call leaves the session exactly as it was.
//!
//! Filters are always recomputed from `baseline`. Geometric operations work
//! on `current` and commit a snapshot; filter changes do not commit until
//! the caller asks.
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::{EditSession, ImageSource, encode::ExportFormat};
//!
//! let mut session = EditSession::default();
//! session.load(&ImageSource::bytes(jpeg_bytes))?;
//! session.rotate(90.0)?;
//! session.apply_preset("vintage")?;
//! let url = session.data_url(ExportFormat::Jpeg, None)?;
//! ```

use std::sync::Arc;

use crate::config::EditorConfig;
use crate::decode::{self, DecodeError, ImageSource, PixelBuffer};
use crate::encode::{self, ExportFormat};
use crate::error::EditError;
use crate::filters::{self, Preset};
use crate::history::History;
use crate::transform;
use crate::upload::validate_upload_with;
use crate::FilterParams;

/// State that only exists while an image is loaded.
#[derive(Debug, Clone)]
struct LoadedImage {
    baseline: Arc<PixelBuffer>,
    current: Arc<PixelBuffer>,
    history: History,
    active_filters: FilterParams,
}

impl LoadedImage {
    fn new(image: PixelBuffer, history_capacity: usize) -> Self {
        let image = Arc::new(image);
        Self {
            baseline: Arc::clone(&image),
            current: Arc::clone(&image),
            history: History::new(image, history_capacity),
            active_filters: FilterParams::default(),
        }
    }

    fn commit(&mut self) {
        self.history.commit(Arc::clone(&self.current));
        tracing::debug!(
            index = self.history.index(),
            len = self.history.len(),
            "committed snapshot"
        );
    }

    /// Install a transformed buffer and record it.
    fn replace_and_commit(&mut self, image: PixelBuffer) {
        self.current = Arc::new(image);
        self.commit();
    }
}

/// An image editing session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    config: EditorConfig,
    image: Option<LoadedImage>,
}

impl EditSession {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Validation` if `config` fails
    /// [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            config,
            image: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Load an image, replacing whatever was loaded before.
    ///
    /// The source is resolved to bytes, checked against the upload policy,
    /// decoded, and scaled down to fit `max_width × max_height`. On success
    /// history holds the single loaded snapshot and filters are neutral. On
    /// failure the previous image, if any, is kept.
    ///
    /// # Errors
    ///
    /// - `UnsupportedInput` if the source cannot be resolved to bytes
    /// - `Validation` if the bytes break the size limit or declare a MIME
    ///   type outside the allow-list
    /// - `Decode` if the bytes are not a readable image, including bytes
    ///   with no declared type and no recognisable signature
    pub fn load(&mut self, source: &ImageSource) -> Result<(), EditError> {
        let resolved = source.resolve()?;

        // Undeclared bytes with no known signature are a decode failure, not
        // a policy violation.
        if resolved.declared_mime.is_none() && decode::sniff_mime_type(&resolved.bytes).is_none()
        {
            tracing::warn!(size = resolved.bytes.len(), "unrecognised image bytes");
            return Err(DecodeError::InvalidFormat.into());
        }

        let check = validate_upload_with(
            &self.config,
            &resolved.bytes,
            resolved.declared_mime.as_deref(),
        );
        if !check.is_valid() {
            return Err(EditError::Validation(check.errors));
        }

        let decoded = decode::decode_image(&resolved.bytes)?;
        let scaled = decode::fit_within(
            &decoded,
            self.config.max_width,
            self.config.max_height,
            self.config.resample_filter,
        )?;

        tracing::debug!(
            source_width = decoded.width(),
            source_height = decoded.height(),
            width = scaled.width(),
            height = scaled.height(),
            "loaded image"
        );

        self.image = Some(LoadedImage::new(scaled, self.config.history_capacity));
        Ok(())
    }

    /// Recompute `current` from the baseline with `params`.
    ///
    /// Does not commit; call [`commit`](Self::commit) to keep the result in
    /// history.
    pub fn apply_filters(&mut self, params: FilterParams) -> Result<(), EditError> {
        let image = self.loaded_mut()?;
        let filtered = filters::apply_filters(&image.baseline, &params);

        image.current = Arc::new(filtered);
        image.active_filters = params;
        Ok(())
    }

    /// Apply a named preset and commit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Validation` for an unknown name, leaving the
    /// session untouched.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), EditError> {
        self.loaded()?;
        let preset: Preset = name.parse().inspect_err(|_| {
            tracing::warn!(name, "unknown preset");
        })?;

        self.apply_filters(preset.params())?;
        self.commit()
    }

    /// Rotate `current` clockwise by `degrees` and commit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Validation` for a NaN or infinite angle.
    pub fn rotate(&mut self, degrees: f64) -> Result<(), EditError> {
        let image = self.loaded_mut()?;
        if !degrees.is_finite() {
            return Err(EditError::validation(format!(
                "Rotation angle must be a finite number of degrees (got {degrees})"
            )));
        }
        let rotated = transform::apply_rotation(&image.current, degrees);
        image.replace_and_commit(rotated);
        Ok(())
    }

    pub fn flip_horizontal(&mut self) -> Result<(), EditError> {
        let image = self.loaded_mut()?;
        let flipped = transform::flip_horizontal(&image.current);
        image.replace_and_commit(flipped);
        Ok(())
    }

    pub fn flip_vertical(&mut self) -> Result<(), EditError> {
        let image = self.loaded_mut()?;
        let flipped = transform::flip_vertical(&image.current);
        image.replace_and_commit(flipped);
        Ok(())
    }

    /// Crop `current` to a rectangle in pixel coordinates and commit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::OutOfBounds` unless the rectangle is non-empty and
    /// lies entirely inside the image.
    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<(), EditError> {
        let image = self.loaded_mut()?;
        let cropped = transform::apply_crop(&image.current, x, y, width, height)
            .inspect_err(|err| tracing::warn!(%err, "crop rejected"))?;
        image.replace_and_commit(cropped);
        Ok(())
    }

    /// Resample `current` to `width × height` and commit.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EditError> {
        let filter = self.config.resample_filter;
        let image = self.loaded_mut()?;
        let resized = transform::apply_resize(&image.current, width, height, filter)
            .inspect_err(|err| tracing::warn!(%err, "resize rejected"))?;
        image.replace_and_commit(resized);
        Ok(())
    }

    /// Record `current` as a new history entry, dropping any redo entries.
    pub fn commit(&mut self) -> Result<(), EditError> {
        self.loaded_mut()?.commit();
        Ok(())
    }

    /// Step back one snapshot. Returns `false` if already at the oldest.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        let image = self.loaded_mut()?;
        Ok(match image.history.undo() {
            Some(snapshot) => {
                image.current = snapshot;
                true
            }
            None => false,
        })
    }

    /// Step forward one snapshot. Returns `false` if already at the newest.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        let image = self.loaded_mut()?;
        Ok(match image.history.redo() {
            Some(snapshot) => {
                image.current = snapshot;
                true
            }
            None => false,
        })
    }

    /// Restore the baseline, clear filters, and commit.
    pub fn reset(&mut self) -> Result<(), EditError> {
        let image = self.loaded_mut()?;
        image.current = Arc::clone(&image.baseline);
        image.active_filters = FilterParams::default();
        image.commit();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.image.as_ref().is_some_and(|i| i.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.image.as_ref().is_some_and(|i| i.history.can_redo())
    }

    /// Number of history entries; 0 when nothing is loaded.
    pub fn history_len(&self) -> usize {
        self.image.as_ref().map_or(0, |i| i.history.len())
    }

    /// Cursor position in history; `None` when nothing is loaded.
    pub fn history_index(&self) -> Option<usize> {
        self.image.as_ref().map(|i| i.history.index())
    }

    pub fn current(&self) -> Result<&PixelBuffer, EditError> {
        Ok(self.loaded()?.current.as_ref())
    }

    pub fn baseline(&self) -> Result<&PixelBuffer, EditError> {
        Ok(self.loaded()?.baseline.as_ref())
    }

    pub fn active_filters(&self) -> Result<FilterParams, EditError> {
        Ok(self.loaded()?.active_filters)
    }

    /// Encode `current`. `quality` defaults to the configured quality.
    pub fn encoded_bytes(
        &self,
        format: ExportFormat,
        quality: Option<f32>,
    ) -> Result<Vec<u8>, EditError> {
        let image = self.loaded()?;
        let quality = quality.unwrap_or(self.config.default_quality);
        Ok(encode::encode(&image.current, format, quality)?)
    }

    /// Encode `current` as a `data:` URL.
    pub fn data_url(&self, format: ExportFormat, quality: Option<f32>) -> Result<String, EditError> {
        let bytes = self.encoded_bytes(format, quality)?;
        Ok(encode::to_data_url(format.mime_type(), &bytes))
    }

    /// Release the loaded image and its history.
    pub fn cleanup(&mut self) {
        if self.image.take().is_some() {
            tracing::debug!("session cleaned up");
        }
    }

    fn loaded(&self) -> Result<&LoadedImage, EditError> {
        self.image.as_ref().ok_or(EditError::SessionNotInitialized)
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedImage, EditError> {
        self.image.as_mut().ok_or(EditError::SessionNotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::{encoded_gradient, encoded_solid_png};
    use image::ImageFormat;

    const MID_GRAY: [u8; 4] = [128, 128, 128, 255];

    fn loaded_session(width: u32, height: u32) -> EditSession {
        let mut session = EditSession::default();
        session
            .load(&ImageSource::bytes(encoded_gradient(width, height, ImageFormat::Png)))
            .unwrap();
        session
    }

    fn gray_session(width: u32, height: u32) -> EditSession {
        let mut session = EditSession::default();
        session
            .load(&ImageSource::bytes(encoded_solid_png(width, height, MID_GRAY)))
            .unwrap();
        session
    }

    // ===== Load =====

    #[test]
    fn test_load_scales_into_bounding_box() {
        let session = gray_session(1000, 500);
        assert_eq!(session.current().unwrap().dimensions(), (800, 400));
        assert_eq!(session.baseline().unwrap().dimensions(), (800, 400));
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.history_index(), Some(0));
        assert_eq!(session.active_filters().unwrap(), FilterParams::default());
    }

    #[test]
    fn test_load_small_image_unscaled() {
        let session = loaded_session(120, 90);
        assert_eq!(session.current().unwrap().dimensions(), (120, 90));
    }

    #[test]
    fn test_load_respects_config_bounds() {
        let config = EditorConfig {
            max_width: 100,
            max_height: 100,
            ..EditorConfig::default()
        };
        let mut session = EditSession::new(config).unwrap();
        session
            .load(&ImageSource::bytes(encoded_gradient(300, 150, ImageFormat::Png)))
            .unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (100, 50));
    }

    #[test]
    fn test_load_from_data_url() {
        let png = encoded_solid_png(4, 3, MID_GRAY);
        let url = encode::to_data_url("image/png", &png);
        let mut session = EditSession::default();
        session.load(&ImageSource::reference(url)).unwrap();
        assert_eq!(session.current().unwrap().pixel(0, 0), MID_GRAY);
    }

    #[test]
    fn test_load_remote_reference_unsupported() {
        let mut session = EditSession::default();
        let err = session
            .load(&ImageSource::reference("https://example.com/cat.jpg"))
            .unwrap_err();
        assert_eq!(err.kind(), "UnsupportedInputError");
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_load_empty_reference_unsupported() {
        let mut session = EditSession::default();
        let err = session.load(&ImageSource::reference("")).unwrap_err();
        assert!(matches!(err, EditError::UnsupportedInput(_)));
    }

    #[test]
    fn test_load_unknown_bytes_is_decode_error() {
        let mut session = EditSession::default();
        let err = session
            .load(&ImageSource::bytes(b"definitely not an image".to_vec()))
            .unwrap_err();
        assert!(matches!(err, EditError::Decode(DecodeError::InvalidFormat)));
        assert_eq!(err.kind(), "DecodeError");
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_load_bmp_bytes_is_decode_error() {
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0u8; 52]);
        let mut session = EditSession::default();
        let err = session.load(&ImageSource::bytes(bmp)).unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_load_declared_garbage_is_decode_error() {
        let mut session = EditSession::default();
        let err = session
            .load(&ImageSource::bytes_with_mime(
                b"definitely not an image".to_vec(),
                "image/png",
            ))
            .unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_load_declared_disallowed_type_is_validation_error() {
        let png = encoded_solid_png(2, 2, MID_GRAY);
        let mut session = EditSession::default();
        let err = session
            .load(&ImageSource::bytes_with_mime(png, "image/tiff"))
            .unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
    }

    #[test]
    fn test_load_corrupt_image_is_decode_error() {
        let mut png = encoded_gradient(20, 20, ImageFormat::Png);
        png.truncate(40);
        let mut session = EditSession::default();
        let err = session.load(&ImageSource::bytes(png)).unwrap_err();
        assert!(matches!(err, EditError::Decode(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_oversized_rejected() {
        let config = EditorConfig {
            max_input_bytes: 16,
            ..EditorConfig::default()
        };
        let mut session = EditSession::new(config).unwrap();
        let err = session
            .load(&ImageSource::bytes(encoded_gradient(20, 20, ImageFormat::Png)))
            .unwrap_err();
        match err {
            EditError::Validation(errors) => {
                assert_eq!(errors, ["File size too large. Maximum size is 16 Bytes."]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let mut session = loaded_session(30, 20);
        session.rotate(90.0).unwrap();
        let before = session.current().unwrap().clone();

        assert!(session.load(&ImageSource::bytes(vec![0u8; 10])).is_err());

        assert_eq!(session.current().unwrap(), &before);
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_reload_resets_history_and_filters() {
        let mut session = loaded_session(30, 20);
        session.apply_preset("vivid").unwrap();
        session
            .load(&ImageSource::bytes(encoded_gradient(10, 10, ImageFormat::Png)))
            .unwrap();
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.active_filters().unwrap(), FilterParams::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EditorConfig {
            history_capacity: 0,
            ..EditorConfig::default()
        };
        let err = EditSession::new(config).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    // ===== Filters =====

    #[test]
    fn test_brightness_on_mid_gray() {
        let mut session = gray_session(1000, 500);
        session
            .apply_filters(FilterParams {
                brightness: 150.0,
                ..FilterParams::default()
            })
            .unwrap();
        let current = session.current().unwrap();
        assert!(current
            .pixels()
            .chunks_exact(4)
            .all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_neutral_filters_restore_baseline() {
        let mut session = loaded_session(40, 30);
        session
            .apply_filters(FilterParams {
                saturation: 10.0,
                ..FilterParams::default()
            })
            .unwrap();
        session.apply_filters(FilterParams::default()).unwrap();
        assert_eq!(session.current().unwrap(), session.baseline().unwrap());
    }

    #[test]
    fn test_filters_do_not_compound() {
        let mut session = gray_session(10, 10);
        let params = FilterParams {
            brightness: 110.0,
            ..FilterParams::default()
        };
        session.apply_filters(params).unwrap();
        let once = session.current().unwrap().clone();
        session.apply_filters(params).unwrap();
        assert_eq!(session.current().unwrap(), &once);
    }

    #[test]
    fn test_filters_do_not_commit() {
        let mut session = loaded_session(10, 10);
        session
            .apply_filters(FilterParams {
                contrast: 150.0,
                ..FilterParams::default()
            })
            .unwrap();
        assert_eq!(session.history_len(), 1);
        assert!(!session.can_undo());

        session.commit().unwrap();
        assert_eq!(session.history_len(), 2);
        assert!(session.can_undo());
    }

    #[test]
    fn test_filters_use_baseline_geometry() {
        let mut session = loaded_session(40, 20);
        session.rotate(90.0).unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (20, 40));

        session
            .apply_filters(FilterParams {
                brightness: 120.0,
                ..FilterParams::default()
            })
            .unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (40, 20));
    }

    #[test]
    fn test_preset_applies_and_commits() {
        let mut session = loaded_session(16, 16);
        session.apply_preset("Black-and-White").unwrap();

        assert_eq!(session.active_filters().unwrap(), Preset::BlackWhite.params());
        assert_eq!(session.history_len(), 2);
        let p = session.current().unwrap().pixel(5, 5);
        assert_eq!((p[0], p[1]), (p[1], p[2]));
    }

    #[test]
    fn test_unknown_preset_leaves_state() {
        let mut session = loaded_session(16, 16);
        let before = session.current().unwrap().clone();

        let err = session.apply_preset("neon").unwrap_err();

        assert_eq!(err.kind(), "ValidationError");
        assert_eq!(session.current().unwrap(), &before);
        assert_eq!(session.history_len(), 1);
    }

    // ===== History =====

    #[test]
    fn test_undo_at_start_returns_false() {
        let mut session = gray_session(1000, 500);
        let before = session.current().unwrap().clone();
        assert!(!session.undo().unwrap());
        assert_eq!(session.current().unwrap(), &before);
    }

    #[test]
    fn test_undo_redo_restore_pixels() {
        let mut session = loaded_session(30, 20);
        let original = session.current().unwrap().clone();
        session.flip_horizontal().unwrap();
        let flipped = session.current().unwrap().clone();

        assert!(session.undo().unwrap());
        assert_eq!(session.current().unwrap(), &original);

        assert!(session.redo().unwrap());
        assert_eq!(session.current().unwrap(), &flipped);
        assert!(!session.redo().unwrap());
    }

    #[test]
    fn test_history_bounded() {
        let mut session = loaded_session(8, 8);
        for _ in 0..21 {
            session.rotate(90.0).unwrap();
        }
        assert_eq!(session.history_len(), 20);
        assert_eq!(session.history_index(), Some(19));

        let mut undos = 0;
        while session.undo().unwrap() {
            undos += 1;
        }
        assert_eq!(undos, 19);
        // 21 quarter turns left 20 entries: turns 2..=21, so the oldest
        // reachable entry is two turns from the original.
        let original = session.baseline().unwrap().clone();
        let two_turns = transform::apply_rotation(&original, 180.0);
        assert_eq!(session.current().unwrap(), &two_turns);
    }

    #[test]
    fn test_commit_after_undo_drops_redo() {
        let mut session = loaded_session(12, 8);
        session.flip_vertical().unwrap();
        session.undo().unwrap();
        assert!(session.can_redo());

        session.rotate(180.0).unwrap();
        assert!(!session.can_redo());
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_reset_restores_baseline_and_commits() {
        let mut session = loaded_session(30, 20);
        session.crop(0, 0, 10, 10).unwrap();
        session
            .apply_filters(FilterParams {
                blur: 2,
                ..FilterParams::default()
            })
            .unwrap();

        session.reset().unwrap();

        assert_eq!(session.current().unwrap(), session.baseline().unwrap());
        assert_eq!(session.active_filters().unwrap(), FilterParams::default());
        assert_eq!(session.history_len(), 3);
        assert!(session.undo().unwrap());
        assert_eq!(session.current().unwrap().dimensions(), (10, 10));
    }

    // ===== Transforms =====

    #[test]
    fn test_rotate_round_trip_restores_dimensions() {
        let mut session = loaded_session(40, 25);
        session.rotate(90.0).unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (25, 40));
        session.rotate(-90.0).unwrap();
        assert_eq!(session.current().unwrap(), session.baseline().unwrap());
    }

    #[test]
    fn test_rotate_arbitrary_angle_grows_canvas() {
        let mut session = loaded_session(100, 50);
        session.rotate(45.0).unwrap();
        // |100 cos 45| + |50 sin 45| = 106.07 -> 106
        assert_eq!(session.current().unwrap().dimensions(), (106, 106));
    }

    #[test]
    fn test_rotate_non_finite_angle_rejected() {
        let mut session = loaded_session(30, 20);
        for degrees in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = session.rotate(degrees).unwrap_err();
            assert!(matches!(err, EditError::Validation(_)));
        }
        assert_eq!(session.current().unwrap().dimensions(), (30, 20));
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_double_flip_is_identity() {
        let mut session = loaded_session(17, 9);
        session.flip_horizontal().unwrap();
        session.flip_horizontal().unwrap();
        session.flip_vertical().unwrap();
        session.flip_vertical().unwrap();
        assert_eq!(session.current().unwrap(), session.baseline().unwrap());
        assert_eq!(session.history_len(), 5);
    }

    #[test]
    fn test_crop_out_of_bounds_leaves_state() {
        let mut session = loaded_session(40, 40);
        session.flip_vertical().unwrap();
        let before = session.current().unwrap().clone();

        let err = session.crop(10, 10, 50, 50).unwrap_err();

        assert_eq!(err.kind(), "OutOfBoundsError");
        assert_eq!(session.current().unwrap(), &before);
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.history_index(), Some(1));
    }

    #[test]
    fn test_crop_commits() {
        let mut session = loaded_session(40, 40);
        session.crop(5, 5, 20, 10).unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (20, 10));
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_resize() {
        let mut session = loaded_session(40, 40);
        session.resize(13, 7).unwrap();
        assert_eq!(session.current().unwrap().dimensions(), (13, 7));

        let err = session.resize(0, 7).unwrap_err();
        assert!(matches!(err, EditError::OutOfBounds(_)));
        assert_eq!(session.current().unwrap().dimensions(), (13, 7));
    }

    #[test]
    fn test_resize_uses_configured_filter() {
        let config = EditorConfig {
            resample_filter: decode::FilterType::Nearest,
            ..EditorConfig::default()
        };
        let edge = PixelBuffer::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        let mut session = EditSession::new(config).unwrap();
        session
            .load(&ImageSource::bytes(encode::encode_png(&edge).unwrap()))
            .unwrap();

        session.resize(4, 1).unwrap();
        let current = session.current().unwrap();
        assert_eq!(current.pixel(1, 0), [0, 0, 0, 255]);
        assert_eq!(current.pixel(2, 0), [255, 255, 255, 255]);
    }

    // ===== Export =====

    #[test]
    fn test_export_round_trip_dimensions() {
        let mut session = loaded_session(64, 48);
        session.rotate(90.0).unwrap();

        for format in [ExportFormat::Jpeg, ExportFormat::Png, ExportFormat::WebP] {
            let bytes = session.encoded_bytes(format, None).unwrap();
            let decoded = decode::decode_image(&bytes).unwrap();
            assert_eq!(decoded.dimensions(), (48, 64), "{format}");
        }
    }

    #[test]
    fn test_png_export_is_exact() {
        let session = loaded_session(20, 10);
        let bytes = session.encoded_bytes(ExportFormat::Png, None).unwrap();
        assert_eq!(&decode::decode_image(&bytes).unwrap(), session.current().unwrap());
    }

    #[test]
    fn test_data_url_prefix() {
        let session = loaded_session(8, 8);
        let url = session.data_url(ExportFormat::Jpeg, Some(0.5)).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,/9j/"));
    }

    #[test]
    fn test_export_does_not_change_state() {
        let session = loaded_session(8, 8);
        let before = session.current().unwrap().clone();
        session.encoded_bytes(ExportFormat::WebP, None).unwrap();
        assert_eq!(session.current().unwrap(), &before);
        assert_eq!(session.history_len(), 1);
    }

    // ===== Cleanup =====

    #[test]
    fn test_operations_before_load_fail() {
        let mut session = EditSession::default();
        assert!(matches!(session.rotate(90.0), Err(EditError::SessionNotInitialized)));
        assert!(matches!(session.undo(), Err(EditError::SessionNotInitialized)));
        assert!(matches!(
            session.encoded_bytes(ExportFormat::Png, None),
            Err(EditError::SessionNotInitialized)
        ));
        assert!(!session.can_undo());
        assert_eq!(session.history_index(), None);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_cleanup_releases_everything() {
        let mut session = loaded_session(8, 8);
        session.flip_horizontal().unwrap();

        session.cleanup();

        assert!(!session.is_loaded());
        assert_eq!(session.history_index(), None);
        for result in [
            session.apply_preset("vivid"),
            session.crop(0, 0, 1, 1),
            session.reset(),
            session.commit(),
        ] {
            assert!(matches!(result, Err(EditError::SessionNotInitialized)));
        }

        // Load still works afterwards
        session
            .load(&ImageSource::bytes(encoded_gradient(4, 4, ImageFormat::Png)))
            .unwrap();
        assert!(session.is_loaded());
    }
}
