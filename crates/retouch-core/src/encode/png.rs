//! PNG encoding for downloads.
//!
//! Downloads are lossless so that saving an edit and uploading it again
//! gives back the exact pixels that were on screen.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::RasterImage;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image to PNG bytes.
///
/// # Example
///
/// ```
/// use retouch_core::{encode_png, RasterImage};
///
/// let img = RasterImage::from_raw(2, 2, vec![128u8; 12]).unwrap();
/// let png = encode_png(&img).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer)
}
