//! Conversion of core errors into JavaScript exceptions.
//!
//! Every failure crosses the boundary as a `js_sys::Error` whose `name` is the
//! error kind (`OutOfBoundsError`, `ValidationError`, ...), so callers can
//! branch on `err.name` instead of parsing messages. The failure is also
//! written to the browser console.

use snapedit_core::EditError;
use wasm_bindgen::prelude::*;

/// Build the JavaScript error for `err` and log it.
pub(crate) fn js_error(err: impl Into<EditError>) -> JsValue {
    let err = err.into();
    let message = err.to_string();

    web_sys::console::error_1(&JsValue::from_str(&format!("{}: {message}", err.kind())));

    let error = js_sys::Error::new(&message);
    error.set_name(err.kind());
    error.into()
}
