//! Slider adjustment pipeline.
//!
//! Applies the five slider values to a base image and returns a new image.
//! The base image is never modified, so moving a slider back always gets
//! back to the same pixels.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Sharpness
//! 5. Blur
//!
//! ## Enhancers
//!
//! The first four steps are enhancers: each one interpolates between a
//! *degenerate* version of the image and the image itself,
//!
//! ```text
//! out = degenerate + factor * (image - degenerate)
//! ```
//!
//! so factor 1.0 is the identity, 0.0 yields the degenerate image and values
//! above 1.0 extrapolate away from it.
//!
//! | step       | degenerate image                        |
//! |------------|-----------------------------------------|
//! | brightness | black                                   |
//! | contrast   | flat gray at the mean luma              |
//! | saturation | per-pixel luma                          |
//! | sharpness  | 3x3 smoothed image, borders left as-is  |

use image::{imageops, RgbImage};

use crate::decode::RasterImage;
use crate::luminance::{luma_u8, mean_luma};
use crate::{
    SliderAdjustments, BRIGHTNESS_RANGE, CONTRAST_RANGE, SATURATION_RANGE, SHARPNESS_RANGE,
};

/// 3x3 smoothing kernel used as the sharpness degenerate, row-major.
const SMOOTH_KERNEL: [u32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
const SMOOTH_KERNEL_SUM: u32 = 13;

/// Apply all slider adjustments to a base image.
///
/// Steps whose factor is exactly neutral are skipped, as is the blur when
/// its radius is not positive. All-neutral sliders return a pixel-identical
/// copy of the base.
///
/// # Example
/// ```
/// use retouch_core::{apply_slider_adjustments, RasterImage, SliderAdjustments};
///
/// let base = RasterImage::from_raw(1, 1, vec![64, 64, 64]).unwrap();
/// let mut adj = SliderAdjustments::default();
/// adj.brightness = 2.0;
///
/// let out = apply_slider_adjustments(&base, &adj);
/// assert_eq!(out.pixels(), &[128, 128, 128]);
/// ```
pub fn apply_slider_adjustments(
    base: &RasterImage,
    adjustments: &SliderAdjustments,
) -> RasterImage {
    let mut img = base.as_rgb_image().clone();

    // Early exit if no adjustments
    if adjustments.is_neutral() {
        return RasterImage::from_rgb_image(img);
    }

    if adjustments.brightness != BRIGHTNESS_RANGE.neutral {
        enhance_brightness(&mut img, adjustments.brightness);
    }
    if adjustments.contrast != CONTRAST_RANGE.neutral {
        enhance_contrast(&mut img, adjustments.contrast);
    }
    if adjustments.saturation != SATURATION_RANGE.neutral {
        enhance_saturation(&mut img, adjustments.saturation);
    }
    if adjustments.sharpness != SHARPNESS_RANGE.neutral {
        enhance_sharpness(&mut img, adjustments.sharpness);
    }
    if adjustments.blur > 0.0 {
        img = imageops::blur(&img, adjustments.blur);
    }

    RasterImage::from_rgb_image(img)
}

/// Interpolate from `degenerate` towards `value` by `factor`.
///
/// The result is clamped to the u8 range and truncated.
#[inline]
fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let degenerate = degenerate as f32;
    (degenerate + factor * (value as f32 - degenerate)).clamp(0.0, 255.0) as u8
}

/// Brightness: blend against black.
fn enhance_brightness(img: &mut RgbImage, factor: f32) {
    for v in img.iter_mut() {
        *v = blend(0, *v, factor);
    }
}

/// Contrast: blend against a flat image at the mean luma.
fn enhance_contrast(img: &mut RgbImage, factor: f32) {
    let mean = mean_luma(img.as_raw());
    for v in img.iter_mut() {
        *v = blend(mean, *v, factor);
    }
}

/// Saturation: blend each pixel against its own luma.
fn enhance_saturation(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        let [r, g, b] = pixel.0;
        let gray = luma_u8(r, g, b);
        pixel.0 = [
            blend(gray, r, factor),
            blend(gray, g, factor),
            blend(gray, b, factor),
        ];
    }
}

/// Sharpness: blend against a smoothed copy.
fn enhance_sharpness(img: &mut RgbImage, factor: f32) {
    let smoothed = smooth(img);
    for (v, s) in img.iter_mut().zip(smoothed.iter()) {
        *v = blend(*s, *v, factor);
    }
}

/// 3x3 smoothing filter.
///
/// The outermost rows and columns are copied unchanged, and images smaller
/// than the kernel come back as a plain copy.
fn smooth(img: &RgbImage) -> RgbImage {
    let mut out = img.clone();
    let (width, height) = img.dimensions();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0u32; 3];
            for (k, weight) in SMOOTH_KERNEL.iter().enumerate() {
                let sx = x + (k as u32 % 3) - 1;
                let sy = y + (k as u32 / 3) - 1;
                let src = img.get_pixel(sx, sy);
                for (sum, channel) in sums.iter_mut().zip(src.0) {
                    *sum += weight * channel as u32;
                }
            }
            let dst = out.get_pixel_mut(x, y);
            for (channel, sum) in dst.0.iter_mut().zip(sums) {
                // Kernel sum is odd, so this is round-to-nearest with no ties
                *channel = ((sum + SMOOTH_KERNEL_SUM / 2) / SMOOTH_KERNEL_SUM) as u8;
            }
        }
    }
    out
}


// ============================================================================
// Property-Based Tests
// ============================================================================
