//! Luma calculation using ITU-R BT.601 weights.
//!
//! Grayscale conversion, the saturation enhancer and the contrast enhancer
//! all share this definition so that a grayscale image has zero saturation
//! left to remove.

/// BT.601 red weight in 16.16 fixed point (0.299).
pub const LUMA_R: u32 = 19595;

/// BT.601 green weight in 16.16 fixed point (0.587).
pub const LUMA_G: u32 = 38470;

/// BT.601 blue weight in 16.16 fixed point (0.114).
pub const LUMA_B: u32 = 7471;

/// Calculate luma from u8 RGB values, rounded to nearest.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + 0x8000;
    (sum >> 16) as u8
}

/// Mean luma of an RGB buffer, rounded to the nearest integer.
///
/// Returns 0 for an empty buffer. Trailing bytes that do not form a whole
/// pixel are ignored.
pub fn mean_luma(pixels: &[u8]) -> u8 {
    let mut total: u64 = 0;
    let mut count: u64 = 0;
    for chunk in pixels.chunks_exact(3) {
        total += luma_u8(chunk[0], chunk[1], chunk[2]) as u64;
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    ((total as f64 / count as f64) + 0.5) as u8
}
