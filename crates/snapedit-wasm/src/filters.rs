//! Filter parameter bindings.
//!
//! This module exposes the core `FilterParams` type to JavaScript, plus a
//! lookup for the named presets.

use snapedit_core::filters::Preset;
use wasm_bindgen::prelude::*;

use crate::error::js_error;

/// Filter settings for `JsEditSession.applyFilters`.
///
/// Defaults are neutral: brightness, contrast and saturation 100, blur 0.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct FilterParams {
    inner: snapedit_core::FilterParams,
}

#[wasm_bindgen]
impl FilterParams {
    /// Create neutral filter settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> FilterParams {
        FilterParams {
            inner: snapedit_core::FilterParams::default(),
        }
    }

    /// Get brightness value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    /// Set brightness value
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    /// Get contrast value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    /// Set contrast value
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Get saturation value
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    /// Set saturation value
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Get blur radius in pixels
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> u32 {
        self.inner.blur
    }

    /// Set blur radius in pixels
    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: u32) {
        self.inner.blur = value;
    }

    /// Check if every filter is at its neutral value
    #[wasm_bindgen(js_name = isNeutral)]
    pub fn is_neutral(&self) -> bool {
        self.inner.is_neutral()
    }

    /// Serialize to a plain object
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build from a plain object; missing fields stay neutral
    #[wasm_bindgen(js_name = fromJSON)]
    pub fn from_json(value: JsValue) -> Result<FilterParams, JsValue> {
        let inner: snapedit_core::FilterParams =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterParams {
    pub(crate) fn inner(&self) -> snapedit_core::FilterParams {
        self.inner
    }
}

impl From<snapedit_core::FilterParams> for FilterParams {
    fn from(inner: snapedit_core::FilterParams) -> Self {
        Self { inner }
    }
}

/// Look up the parameters behind a preset name.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = preset_params('vintage');
/// console.log(params.brightness); // 110
/// ```
#[wasm_bindgen]
pub fn preset_params(name: &str) -> Result<FilterParams, JsValue> {
    let preset = name.parse::<Preset>().map_err(js_error)?;
    Ok(preset.params().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_neutral() {
        let params = FilterParams::new();
        assert!(params.is_neutral());
        assert_eq!(params.brightness(), 100.0);
        assert_eq!(params.blur(), 0);
    }

    #[test]
    fn test_setters() {
        let mut params = FilterParams::default();
        params.set_brightness(150.0);
        params.set_contrast(80.0);
        params.set_saturation(0.0);
        params.set_blur(3);

        let inner = params.inner();
        assert_eq!(inner.brightness, 150.0);
        assert_eq!(inner.contrast, 80.0);
        assert_eq!(inner.saturation, 0.0);
        assert_eq!(inner.blur, 3);
        assert!(!params.is_neutral());
    }

    #[test]
    fn test_preset_lookup() {
        let params = preset_params("sharp").ok().unwrap();
        assert_eq!(params.contrast(), 130.0);
        assert_eq!(params.saturation(), 110.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_json_round_trip() {
        let mut params = FilterParams::new();
        params.set_blur(2);
        let json = params.to_json().unwrap();
        let back = FilterParams::from_json(json).unwrap();
        assert_eq!(back.blur(), 2);
        assert_eq!(back.brightness(), 100.0);
    }

    #[wasm_bindgen_test]
    fn test_unknown_preset_is_validation_error() {
        assert!(preset_params("neon").is_err());
    }
}
