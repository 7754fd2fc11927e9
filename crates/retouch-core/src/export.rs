//! Download preparation.
//!
//! Every slider release re-renders the preview and prepares a fresh
//! download of it. Where that download lives depends on the host:
//! - [`TempFileStore`] writes a PNG into the temp directory and hands back
//!   its path. Files are kept on disk and are not cleaned up by Retouch.
//! - [`MemoryStore`] keeps the PNG bytes in memory, for the browser build
//!   where there is no filesystem.

use std::fmt;
#[cfg(feature = "tempfile")]
use std::io::Write;
#[cfg(feature = "tempfile")]
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::RasterImage;
use crate::encode::{encode_png, EncodeError};

/// Errors that can occur while preparing a download.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The image could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The download file could not be created or written
    #[error("Failed to write download file: {0}")]
    Io(#[from] std::io::Error),
}

/// Somewhere a rendered image can be put for the user to download.
pub trait DownloadStore {
    /// What the download control points at once the image is stored.
    type Handle: fmt::Debug;

    /// Store `image` and return a handle to it.
    fn prepare(&mut self, image: &RasterImage) -> Result<Self::Handle, ExportError>;
}

/// Keeps downloads as in-memory PNG bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore;

impl DownloadStore for MemoryStore {
    type Handle = Vec<u8>;

    fn prepare(&mut self, image: &RasterImage) -> Result<Vec<u8>, ExportError> {
        Ok(encode_png(image)?)
    }
}

/// Writes each download to its own `retouch-*.png` temp file.
#[cfg(feature = "tempfile")]
#[derive(Debug, Clone, Default)]
pub struct TempFileStore {
    dir: Option<PathBuf>,
}

#[cfg(feature = "tempfile")]
impl TempFileStore {
    /// Store files in the system temp directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store files in `dir` instead of the system temp directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// The configured directory, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

#[cfg(feature = "tempfile")]
impl DownloadStore for TempFileStore {
    type Handle = PathBuf;

    fn prepare(&mut self, image: &RasterImage) -> Result<PathBuf, ExportError> {
        let png = encode_png(image)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("retouch-").suffix(".png");
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(&png)?;

        let (_, path) = file.keep().map_err(|e| ExportError::Io(e.error))?;
        tracing::debug!(path = %path.display(), bytes = png.len(), "Download file written");
        Ok(path)
    }
}
