//! Retouch Core - Image editing library
//!
//! This crate provides the core image editing functionality for Retouch:
//! decoding uploads, the slider adjustment pipeline, discrete transforms,
//! download preparation and the per-session state holder that ties them
//! together.

pub mod adjustments;
pub mod decode;
pub mod encode;
pub mod export;
pub mod luminance;
pub mod session;
pub mod transform;

use std::fmt;
use std::str::FromStr;

pub use adjustments::apply_slider_adjustments;
pub use decode::{decode_image, DecodeError, RasterImage};
pub use encode::{encode_png, EncodeError};
pub use export::{DownloadStore, ExportError, MemoryStore};
#[cfg(feature = "tempfile")]
pub use export::TempFileStore;
pub use session::{DownloadButton, EditorSession, EditorView, DEFAULT_DOWNLOAD_LABEL};
pub use transform::apply_transform;

/// Valid range of a single slider.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Value at which the adjustment is a no-op
    pub neutral: f32,
}

impl SliderRange {
    const fn new(min: f32, max: f32, step: f32, neutral: f32) -> Self {
        Self {
            min,
            max,
            step,
            neutral,
        }
    }

    /// Clamp a value into range. NaN and infinities fall back to neutral.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.neutral
        }
    }
}

pub const BRIGHTNESS_RANGE: SliderRange = SliderRange::new(0.0, 3.0, 0.05, 1.0);
pub const CONTRAST_RANGE: SliderRange = SliderRange::new(0.0, 3.0, 0.05, 1.0);
pub const SATURATION_RANGE: SliderRange = SliderRange::new(0.0, 3.0, 0.05, 1.0);
pub const SHARPNESS_RANGE: SliderRange = SliderRange::new(-2.0, 5.0, 0.1, 1.0);
pub const BLUR_RANGE: SliderRange = SliderRange::new(0.0, 10.0, 0.2, 0.0);

/// The five slider values of the editor.
///
/// Brightness, contrast, saturation and sharpness are blend factors where
/// 1.0 leaves the image untouched. Blur is a Gaussian sigma in pixels where
/// 0.0 disables the blur.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SliderAdjustments {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub sharpness: f32,
    pub blur: f32,
}

impl Default for SliderAdjustments {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl SliderAdjustments {
    /// All sliders at their neutral values.
    pub const NEUTRAL: Self = Self {
        brightness: BRIGHTNESS_RANGE.neutral,
        contrast: CONTRAST_RANGE.neutral,
        saturation: SATURATION_RANGE.neutral,
        sharpness: SHARPNESS_RANGE.neutral,
        blur: BLUR_RANGE.neutral,
    };

    /// Create a new SliderAdjustments with neutral values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are neutral
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Copy with every value clamped into its slider range.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: BRIGHTNESS_RANGE.clamp(self.brightness),
            contrast: CONTRAST_RANGE.clamp(self.contrast),
            saturation: SATURATION_RANGE.clamp(self.saturation),
            sharpness: SHARPNESS_RANGE.clamp(self.sharpness),
            blur: BLUR_RANGE.clamp(self.blur),
        }
    }
}

/// Discrete, destructive image operation triggered by a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    /// Rotate 90 degrees clockwise.
    RotateRight,
    /// Mirror left to right.
    #[serde(rename = "flip_h")]
    FlipHorizontal,
    /// Mirror top to bottom.
    #[serde(rename = "flip_v")]
    FlipVertical,
    /// Reduce to luma.
    Grayscale,
}

impl TransformOp {
    pub const ALL: [TransformOp; 4] = [
        TransformOp::RotateRight,
        TransformOp::FlipHorizontal,
        TransformOp::FlipVertical,
        TransformOp::Grayscale,
    ];

    /// Wire name used by the HTTP and WASM front ends.
    pub fn as_str(self) -> &'static str {
        match self {
            TransformOp::RotateRight => "rotate_right",
            TransformOp::FlipHorizontal => "flip_h",
            TransformOp::FlipVertical => "flip_v",
            TransformOp::Grayscale => "grayscale",
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a transform name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown transform operation: {0}")]
pub struct UnknownTransform(pub String);

impl FromStr for TransformOp {
    type Err = UnknownTransform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownTransform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_adjustments_default_is_neutral() {
        let adj = SliderAdjustments::new();
        assert!(adj.is_neutral());
        assert_eq!(adj.brightness, 1.0);
        assert_eq!(adj.blur, 0.0);
    }

    #[test]
    fn test_slider_adjustments_not_neutral() {
        let mut adj = SliderAdjustments::new();
        adj.blur = 0.2;
        assert!(!adj.is_neutral());
    }

    #[test]
    fn test_clamped_limits_each_slider() {
        let adj = SliderAdjustments {
            brightness: 7.0,
            contrast: -1.0,
            saturation: 2.5,
            sharpness: -9.0,
            blur: 42.0,
        };
        let clamped = adj.clamped();
        assert_eq!(clamped.brightness, 3.0);
        assert_eq!(clamped.contrast, 0.0);
        assert_eq!(clamped.saturation, 2.5);
        assert_eq!(clamped.sharpness, -2.0);
        assert_eq!(clamped.blur, 10.0);
    }

    #[test]
    fn test_clamped_non_finite_becomes_neutral() {
        let mut adj = SliderAdjustments::new();
        adj.contrast = f32::NAN;
        adj.blur = f32::INFINITY;
        assert!(adj.clamped().is_neutral());
    }

    #[test]
    fn test_missing_json_fields_default_to_neutral() {
        let adj: SliderAdjustments = serde_json::from_str(r#"{"brightness": 1.5}"#).unwrap();
        assert_eq!(adj.brightness, 1.5);
        assert_eq!(adj.contrast, 1.0);
        assert_eq!(adj.blur, 0.0);
    }

    #[test]
    fn test_transform_op_round_trips_wire_names() {
        for op in TransformOp::ALL {
            assert_eq!(op.as_str().parse::<TransformOp>(), Ok(op));
        }
    }

    #[test]
    fn test_transform_op_unknown_name() {
        let err = "rotate_left".parse::<TransformOp>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown transform operation: rotate_left");
    }

    #[test]
    fn test_transform_op_serde_matches_wire_names() {
        for op in TransformOp::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }
}
