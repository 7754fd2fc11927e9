//! Core types for decoded images.

use image::RgbImage;
use thiserror::Error;

/// Error types for turning uploads into editable images.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The upload is empty.
    #[error("No image data provided")]
    Empty,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Raw pixel buffer doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An 8-bit RGB raster image.
///
/// The pixel buffer always holds exactly `width * height * 3` bytes in
/// row-major order; every constructor enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    buffer: RgbImage,
}

impl RasterImage {
    /// Coerce a raw RGB buffer into an image.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidDimensions` for a zero width or height and
    /// `DecodeError::InvalidPixelData` when the buffer length is wrong.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * 3;
        let actual = pixels.len();
        RgbImage::from_raw(width, height, pixels)
            .filter(|_| actual == expected)
            .map(|buffer| Self { buffer })
            .ok_or(DecodeError::InvalidPixelData { expected, actual })
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Borrow the underlying image::RgbImage.
    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// RGB pixel data, 3 bytes per pixel, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Consume the image, returning its pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.buffer.into_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_from_raw_valid() {
        let img = RasterImage::from_raw(4, 2, vec![7u8; 4 * 2 * 3]).unwrap();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.pixels().len(), 24);
    }

    #[test]
    fn test_from_raw_short_buffer() {
        let err = RasterImage::from_raw(4, 2, vec![0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidPixelData {
                expected: 24,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_from_raw_long_buffer() {
        let err = RasterImage::from_raw(1, 1, vec![0u8; 4]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidPixelData {
                expected: 3,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_from_raw_zero_dimension() {
        let err = RasterImage::from_raw(0, 5, vec![]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidDimensions {
                width: 0,
                height: 5
            }
        ));
    }

    #[test]
    fn test_into_pixels_round_trip() {
        let pixels: Vec<u8> = (0..12).collect();
        let img = RasterImage::from_raw(2, 2, pixels.clone()).unwrap();
        assert_eq!(img.into_pixels(), pixels);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidPixelData {
            expected: 3,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 3 bytes (width * height * 3), got 1"
        );
        assert_eq!(
            DecodeError::InvalidFormat.to_string(),
            "Invalid or unsupported image format"
        );
    }
}
