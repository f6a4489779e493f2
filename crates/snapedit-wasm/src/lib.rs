//! SnapEdit WASM - WebAssembly bindings for SnapEdit
//!
//! This crate provides WASM bindings to expose the snapedit-core editing
//! pipeline to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - `JsEditSession`, the stateful editor (load, edit, undo, export)
//! - `filters` - `FilterParams` and preset lookup
//! - `types` - WASM-compatible wrapper types for image data
//! - `upload` - Upload validation, compression and thumbnails
//! - `error` - Conversion of core errors into named JavaScript errors
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@snapedit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.load(new Uint8Array(await file.arrayBuffer()), file.type);
//! session.applyPreset('vintage');
//! console.log(`Editing ${session.width}x${session.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod error;
mod filters;
mod session;
mod types;
mod upload;

// Re-export public types
pub use filters::{preset_params, FilterParams};
pub use session::JsEditSession;
pub use types::JsPixelBuffer;
pub use upload::{
    compress_image, format_file_size, generate_thumbnail, image_dimensions, validate_upload,
};

/// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(concat!(
        "snapedit-wasm ",
        env!("CARGO_PKG_VERSION"),
        " ready"
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
