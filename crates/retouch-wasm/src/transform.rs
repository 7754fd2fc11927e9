//! WASM bindings for the discrete transforms.

use crate::types::JsRasterImage;
use retouch_core::{apply_transform as core_transform, TransformOp};
use wasm_bindgen::prelude::*;

/// Apply a discrete transform by name.
///
/// # Arguments
///
/// * `image` - Source image
/// * `op` - One of `rotate_right`, `flip_h`, `flip_v`, `grayscale`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = apply_transform(image, "rotate_right");
/// ```
#[wasm_bindgen]
pub fn apply_transform(image: &JsRasterImage, op: &str) -> Result<JsRasterImage, JsValue> {
    let op: TransformOp = op.parse().map_err(|e: retouch_core::UnknownTransform| {
        JsValue::from_str(&e.to_string())
    })?;
    Ok(transform_image(image, op))
}

pub(crate) fn transform_image(image: &JsRasterImage, op: TransformOp) -> JsRasterImage {
    JsRasterImage::from_raster(core_transform(image.raster(), op))
}
