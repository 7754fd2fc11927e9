//! Discrete image transforms: rotation, mirroring and grayscale.
//!
//! Unlike slider adjustments these are destructive. The session commits
//! the result as the new base image and resets the sliders, so transforms
//! compose by repetition rather than through parameters.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Rotation is always 90 degrees clockwise and swaps width and height

use image::{imageops, RgbImage};

use crate::decode::RasterImage;
use crate::luminance::luma_u8;
use crate::TransformOp;

/// Apply one discrete transform, returning a new image.
pub fn apply_transform(image: &RasterImage, op: TransformOp) -> RasterImage {
    let src = image.as_rgb_image();
    let out = match op {
        TransformOp::RotateRight => imageops::rotate90(src),
        TransformOp::FlipHorizontal => imageops::flip_horizontal(src),
        TransformOp::FlipVertical => imageops::flip_vertical(src),
        TransformOp::Grayscale => grayscale(src),
    };
    RasterImage::from_rgb_image(out)
}

/// Replace every pixel with its luma on all three channels.
fn grayscale(src: &RgbImage) -> RgbImage {
    let mut out = src.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b] = pixel.0;
        let gray = luma_u8(r, g, b);
        pixel.0 = [gray; 3];
    }
    out
}


// ============================================================================
// Property-Based Tests
// ============================================================================
