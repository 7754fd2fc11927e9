//! Slider adjustment WASM bindings.
//!
//! This module provides JavaScript bindings for the SliderAdjustments type,
//! allowing slider values to be passed in from TypeScript.

use std::collections::BTreeMap;

use crate::types::JsRasterImage;
use retouch_core::{
    apply_slider_adjustments, BLUR_RANGE, BRIGHTNESS_RANGE, CONTRAST_RANGE, SATURATION_RANGE,
    SHARPNESS_RANGE,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Slider values wrapper for JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct SliderAdjustments {
    inner: retouch_core::SliderAdjustments,
}

#[wasm_bindgen]
impl SliderAdjustments {
    /// Create new slider values, all neutral
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: retouch_core::SliderAdjustments::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> f32 {
        self.inner.sharpness
    }

    #[wasm_bindgen(setter)]
    pub fn set_sharpness(&mut self, value: f32) {
        self.inner.sharpness = value;
    }

    /// Gaussian blur sigma in pixels
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f32 {
        self.inner.blur
    }

    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f32) {
        self.inner.blur = value;
    }

    /// Check if all sliders are at their neutral values
    pub fn is_neutral(&self) -> bool {
        self.inner.is_neutral()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; missing fields are neutral
    pub fn from_json(value: JsValue) -> Result<SliderAdjustments, JsValue> {
        let inner: retouch_core::SliderAdjustments =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for SliderAdjustments {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderAdjustments {
    pub(crate) fn inner(&self) -> &retouch_core::SliderAdjustments {
        &self.inner
    }

    pub(crate) fn from_inner(inner: retouch_core::SliderAdjustments) -> Self {
        Self { inner }
    }
}

/// Slider ranges for building the UI, keyed by slider name.
///
/// Each entry has `min`, `max`, `step` and `neutral`.
#[wasm_bindgen]
pub fn slider_ranges() -> Result<JsValue, JsValue> {
    let ranges = [
        ("brightness", BRIGHTNESS_RANGE),
        ("contrast", CONTRAST_RANGE),
        ("saturation", SATURATION_RANGE),
        ("sharpness", SHARPNESS_RANGE),
        ("blur", BLUR_RANGE),
    ];
    let map: BTreeMap<_, _> = ranges.into_iter().collect();
    map.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply slider values to an image.
///
/// Returns a new image; the source is left untouched.
///
/// # Example (TypeScript)
/// ```typescript
/// const adj = new SliderAdjustments();
/// adj.brightness = 1.2;
/// adj.blur = 0.6;
///
/// const adjusted = apply_adjustments(baseImage, adj);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(image: &JsRasterImage, adjustments: &SliderAdjustments) -> JsRasterImage {
    let adjusted = apply_slider_adjustments(image.raster(), &adjustments.inner().clamped());
    JsRasterImage::from_raster(adjusted)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_json_round_trip() {
        let mut adj = SliderAdjustments::new();
        adj.set_sharpness(2.5);
        let value = adj.to_json().unwrap();
        let back = SliderAdjustments::from_json(value).unwrap();
        assert_eq!(back.sharpness(), 2.5);
    }

    #[wasm_bindgen_test]
    fn test_slider_ranges() {
        assert!(slider_ranges().unwrap().is_object());
    }
}
