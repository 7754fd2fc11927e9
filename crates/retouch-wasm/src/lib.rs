//! Retouch WASM - WebAssembly bindings for the Retouch photo editor
//!
//! This crate exposes retouch-core to JavaScript/TypeScript so the editor can
//! run entirely in the browser.
//!
//! # Module Structure
//!
//! - `editor` - The stateful `Editor` session (upload, adjust, transform, reset)
//! - `adjustments` - Slider values and the stateless render function
//! - `transform` - Rotate, flip and grayscale
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings
//! - `encode` - PNG encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor, SliderAdjustments } from '@retouch/wasm';
//!
//! await init();
//!
//! const editor = new Editor();
//! editor.upload(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod editor;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{apply_adjustments, slider_ranges, SliderAdjustments};
pub use decode::decode_image;
pub use editor::Editor;
pub use encode::encode_png;
pub use transform::apply_transform;
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Report a soft failure. Goes to the browser console under WASM.
#[cfg(target_arch = "wasm32")]
pub(crate) fn report(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn report(message: &str) {
    tracing::warn!("{message}");
}
