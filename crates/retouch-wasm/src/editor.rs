//! Browser-side editing session.
//!
//! `Editor` runs the whole editor inside WASM: it holds the original, base
//! and displayed images and keeps the prepared download as PNG bytes in
//! memory, since the browser has no temp directory.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new Editor();
//! editor.upload(new Uint8Array(await file.arrayBuffer()));
//!
//! slider.addEventListener('change', () => {
//!   const adj = new SliderAdjustments();
//!   adj.brightness = Number(slider.value);
//!   editor.adjust(adj);
//!   draw(editor.image());
//! });
//!
//! rotateButton.onclick = () => { editor.transform('rotate_right'); draw(editor.image()); };
//! ```

use crate::adjustments::SliderAdjustments;
use crate::report;
use crate::types::JsRasterImage;
use retouch_core::{EditorSession, MemoryStore, TransformOp};
use wasm_bindgen::prelude::*;

/// One editing session held in WASM memory.
#[wasm_bindgen]
pub struct Editor {
    session: EditorSession<MemoryStore>,
}

#[wasm_bindgen]
impl Editor {
    /// Create an empty editor
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor {
            session: EditorSession::new(MemoryStore),
        }
    }

    /// Load an image file. Returns false, and empties the editor, if the
    /// file can't be decoded.
    pub fn upload(&mut self, bytes: &[u8]) -> bool {
        let loaded = self.session.upload_bytes(bytes).has_image();
        if !loaded {
            report("Failed to decode upload");
        }
        loaded
    }

    /// Load raw RGB pixels, e.g. from a canvas. Returns false, and empties the
    /// editor, if the buffer doesn't match the dimensions.
    pub fn upload_pixels(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> bool {
        let loaded = self.session.upload_raw(width, height, pixels).has_image();
        if !loaded {
            report("Failed to convert pixels to an image");
        }
        loaded
    }

    /// Re-render from the base image with new slider values.
    ///
    /// Returns whether a download is available afterwards.
    pub fn adjust(&mut self, adjustments: &SliderAdjustments) -> bool {
        let view = self.session.adjust(*adjustments.inner());
        let available = view.download.is_visible();
        if view.has_image() && !available {
            report("Download could not be prepared");
        }
        available
    }

    /// Apply a transform by name (`rotate_right`, `flip_h`, `flip_v`,
    /// `grayscale`) and commit it.
    pub fn transform(&mut self, op: &str) -> Result<(), JsValue> {
        let op: TransformOp = op
            .parse()
            .map_err(|e: retouch_core::UnknownTransform| JsValue::from_str(&e.to_string()))?;
        self.apply(op);
        Ok(())
    }

    pub fn rotate_right(&mut self) {
        self.apply(TransformOp::RotateRight);
    }

    pub fn flip_horizontal(&mut self) {
        self.apply(TransformOp::FlipHorizontal);
    }

    pub fn flip_vertical(&mut self) {
        self.apply(TransformOp::FlipVertical);
    }

    pub fn grayscale(&mut self) {
        self.apply(TransformOp::Grayscale);
    }

    /// Go back to the uploaded image
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// The displayed image, or undefined before the first upload
    pub fn image(&self) -> Option<JsRasterImage> {
        self.session
            .displayed()
            .cloned()
            .map(JsRasterImage::from_raster)
    }

    /// Current slider values (neutral after a transform or reset)
    pub fn adjustments(&self) -> SliderAdjustments {
        SliderAdjustments::from_inner(self.session.adjustments())
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.session.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn download_visible(&self) -> bool {
        self.session.download().is_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn download_label(&self) -> Option<String> {
        self.session.download().label().map(str::to_string)
    }

    /// PNG bytes of the prepared download, or undefined when hidden
    pub fn download_bytes(&self) -> Option<Vec<u8>> {
        self.session.download().handle().cloned()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    fn apply(&mut self, op: TransformOp) {
        self.session.transform(op);
    }
}
