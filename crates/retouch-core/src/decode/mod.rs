//! Upload decoding for Retouch.
//!
//! This module turns whatever the user hands us into a [`RasterImage`]:
//! - Encoded files (PNG, JPEG, WebP) with EXIF orientation applied
//! - Raw RGB buffers, validated against their declared dimensions
//!
//! Everything downstream works on 8-bit RGB, so alpha and higher bit depths
//! are reduced here once.

mod types;
mod upload;

pub use types::{DecodeError, Orientation, RasterImage};
pub use upload::decode_image;
