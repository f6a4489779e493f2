//! Editing session bindings.
//!
//! `JsEditSession` wraps the core `EditSession` one-to-one. Methods are
//! synchronous; hosts that want a responsive page call them from a Web
//! Worker and post the results back.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession, FilterParams } from '@snapedit/wasm';
//!
//! const session = new JsEditSession({ maxWidth: 1024 });
//! session.load(new Uint8Array(await file.arrayBuffer()), file.type);
//!
//! session.rotate(90);
//! const params = new FilterParams();
//! params.brightness = 120;
//! session.applyFilters(params);
//! session.commit();
//!
//! const image = new ImageData(
//!   new Uint8ClampedArray(session.pixels().buffer),
//!   session.width,
//!   session.height,
//! );
//! const url = session.dataUrl('image/jpeg', 0.9);
//! ```

use js_sys::{ArrayBuffer, Uint8Array};
use snapedit_core::{EditError, EditSession, EditorConfig, ExportFormat, ImageSource};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::js_error;
use crate::filters::FilterParams;
use crate::types::JsPixelBuffer;

#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session. `config` is an optional plain object such as
    /// `{ maxWidth: 800, maxHeight: 600, historyCapacity: 20 }`; missing
    /// fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| js_error(EditError::validation(e.to_string())))?
        };
        Self::with_config(config)
    }

    /// Load an image from a `Uint8Array`, an `ArrayBuffer`, or a reference
    /// string (`data:` URL). `mimeType` is the declared type, e.g. `file.type`.
    pub fn load(&mut self, input: JsValue, mime_type: Option<String>) -> Result<(), JsValue> {
        let source = source_from_js(&input, mime_type).map_err(js_error)?;
        self.inner.load(&source).map_err(js_error)
    }

    /// Load from raw encoded bytes.
    #[wasm_bindgen(js_name = loadBytes)]
    pub fn load_bytes(&mut self, bytes: &[u8], mime_type: Option<String>) -> Result<(), JsValue> {
        let source = match mime_type {
            Some(mime) => ImageSource::bytes_with_mime(bytes, mime),
            None => ImageSource::bytes(bytes),
        };
        self.inner.load(&source).map_err(js_error)
    }

    #[wasm_bindgen(js_name = applyFilters)]
    pub fn apply_filters(&mut self, params: &FilterParams) -> Result<(), JsValue> {
        self.inner.apply_filters(params.inner()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = applyPreset)]
    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.apply_preset(name).map_err(js_error)
    }

    /// Rotate clockwise by `degrees`.
    pub fn rotate(&mut self, degrees: f64) -> Result<(), JsValue> {
        self.inner.rotate(degrees).map_err(js_error)
    }

    #[wasm_bindgen(js_name = flipHorizontal)]
    pub fn flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.inner.flip_horizontal().map_err(js_error)
    }

    #[wasm_bindgen(js_name = flipVertical)]
    pub fn flip_vertical(&mut self) -> Result<(), JsValue> {
        self.inner.flip_vertical().map_err(js_error)
    }

    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner.crop(x, y, width, height).map_err(js_error)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner.resize(width, height).map_err(js_error)
    }

    pub fn commit(&mut self) -> Result<(), JsValue> {
        self.inner.commit().map_err(js_error)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        self.inner.undo().map_err(js_error)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        self.inner.redo().map_err(js_error)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner.reset().map_err(js_error)
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(getter, js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// History cursor, or -1 when nothing is loaded.
    #[wasm_bindgen(getter, js_name = historyIndex)]
    pub fn history_index(&self) -> i32 {
        self.inner
            .history_index()
            .map_or(-1, |index| i32::try_from(index).unwrap_or(i32::MAX))
    }

    #[wasm_bindgen(getter, js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.inner.history_len()
    }

    /// Current width in pixels, 0 when nothing is loaded.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.current().map_or(0, |image| image.width())
    }

    /// Current height in pixels, 0 when nothing is loaded.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.current().map_or(0, |image| image.height())
    }

    /// RGBA pixels of the current image (a copy).
    pub fn pixels(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .current()
            .map(|image| image.pixels().to_vec())
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = currentImage)]
    pub fn current_image(&self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .current()
            .map(JsPixelBuffer::from)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = activeFilters)]
    pub fn active_filters(&self) -> Result<FilterParams, JsValue> {
        self.inner
            .active_filters()
            .map(FilterParams::from)
            .map_err(js_error)
    }

    /// Encode the current image. `format` is a MIME type or bare name
    /// (`'image/png'`, `'jpeg'`); `quality` in `[0, 1]` applies to JPEG.
    #[wasm_bindgen(js_name = encodedBytes)]
    pub fn encoded_bytes(&self, format: &str, quality: Option<f32>) -> Result<Vec<u8>, JsValue> {
        let format = format.parse::<ExportFormat>().map_err(js_error)?;
        self.inner.encoded_bytes(format, quality).map_err(js_error)
    }

    /// Encode the current image as a `data:` URL.
    #[wasm_bindgen(js_name = dataUrl)]
    pub fn data_url(&self, format: &str, quality: Option<f32>) -> Result<String, JsValue> {
        let format = format.parse::<ExportFormat>().map_err(js_error)?;
        self.inner.data_url(format, quality).map_err(js_error)
    }

    /// Release the image and its history.
    pub fn cleanup(&mut self) {
        self.inner.cleanup();
    }
}

impl JsEditSession {
    fn with_config(config: EditorConfig) -> Result<JsEditSession, JsValue> {
        EditSession::new(config)
            .map(|inner| JsEditSession { inner })
            .map_err(js_error)
    }
}

/// Turn the loosely typed JS input into an `ImageSource`.
fn source_from_js(input: &JsValue, mime_type: Option<String>) -> Result<ImageSource, EditError> {
    let bytes = if let Some(array) = input.dyn_ref::<Uint8Array>() {
        array.to_vec()
    } else if let Some(buffer) = input.dyn_ref::<ArrayBuffer>() {
        Uint8Array::new(buffer).to_vec()
    } else if let Some(reference) = input.as_string() {
        return Ok(ImageSource::reference(reference));
    } else {
        return Err(EditError::UnsupportedInput(
            "expected a Uint8Array, ArrayBuffer or string".to_string(),
        ));
    };

    Ok(match mime_type {
        Some(mime) => ImageSource::bytes_with_mime(bytes, mime),
        None => ImageSource::bytes(bytes),
    })
}
