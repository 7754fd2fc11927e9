//! Per-user editing session.
//!
//! A session remembers three images:
//! - **original**: exactly what was uploaded, used only by reset
//! - **base**: the original with every committed transform applied
//! - **displayed**: the base with the current slider values applied
//!
//! Slider changes always re-render `displayed` from `base`, so they never
//! accumulate. Transforms operate on `displayed` and commit the result as the
//! new base, resetting the sliders to neutral.
//!
//! Nothing here returns an error. Operations without an image are no-ops
//! that report an empty view, and failures while decoding an upload or
//! preparing a download are logged and absorbed.

use tracing::{debug, info, warn};

use crate::adjustments::apply_slider_adjustments;
use crate::decode::{decode_image, DecodeError, RasterImage};
use crate::export::DownloadStore;
use crate::transform::apply_transform;
use crate::{SliderAdjustments, TransformOp};

/// Label shown on the download control unless configured otherwise.
pub const DEFAULT_DOWNLOAD_LABEL: &str = "download";

/// State of the download control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadButton<H> {
    /// No valid download available.
    Hidden,
    /// A prepared download.
    Visible { handle: H, label: String },
}

impl<H> Default for DownloadButton<H> {
    fn default() -> Self {
        DownloadButton::Hidden
    }
}

impl<H> DownloadButton<H> {
    pub fn is_visible(&self) -> bool {
        matches!(self, DownloadButton::Visible { .. })
    }

    pub fn handle(&self) -> Option<&H> {
        match self {
            DownloadButton::Visible { handle, .. } => Some(handle),
            DownloadButton::Hidden => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            DownloadButton::Visible { label, .. } => Some(label),
            DownloadButton::Hidden => None,
        }
    }
}

/// What the user currently sees.
#[derive(Debug)]
pub struct EditorView<'a, H> {
    /// Displayed image, `None` before the first upload.
    pub image: Option<&'a RasterImage>,
    pub download: &'a DownloadButton<H>,
    pub adjustments: SliderAdjustments,
}

impl<H> EditorView<'_, H> {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Editing state for one user.
#[derive(Debug)]
pub struct EditorSession<S: DownloadStore> {
    store: S,
    label: String,
    original: Option<RasterImage>,
    base: Option<RasterImage>,
    displayed: Option<RasterImage>,
    adjustments: SliderAdjustments,
    download: DownloadButton<S::Handle>,
}

impl<S: DownloadStore> EditorSession<S> {
    /// Create an empty session that prepares downloads with `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            label: DEFAULT_DOWNLOAD_LABEL.to_string(),
            original: None,
            base: None,
            displayed: None,
            adjustments: SliderAdjustments::NEUTRAL,
            download: DownloadButton::Hidden,
        }
    }

    /// Use a different label for the download control.
    pub fn with_download_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Start editing `image`.
    ///
    /// The image becomes original, base and displayed at once. Sliders go
    /// back to neutral so the view matches the displayed image.
    pub fn upload(&mut self, image: RasterImage) -> EditorView<'_, S::Handle> {
        info!(
            width = image.width(),
            height = image.height(),
            "Image uploaded"
        );
        self.original = Some(image.clone());
        self.base = Some(image.clone());
        self.displayed = Some(image);
        self.adjustments = SliderAdjustments::NEUTRAL;
        self.download = DownloadButton::Hidden;
        self.view()
    }

    /// Decode an uploaded file and start editing it.
    ///
    /// A file that can't be decoded is logged and leaves the session empty.
    pub fn upload_bytes(&mut self, bytes: &[u8]) -> EditorView<'_, S::Handle> {
        let decoded = decode_image(bytes);
        self.upload_or_clear(decoded)
    }

    /// Coerce a raw RGB buffer and start editing it.
    ///
    /// A buffer that doesn't match its dimensions is logged and leaves the
    /// session empty.
    pub fn upload_raw(
        &mut self,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> EditorView<'_, S::Handle> {
        let coerced = RasterImage::from_raw(width, height, pixels);
        self.upload_or_clear(coerced)
    }

    fn upload_or_clear(
        &mut self,
        image: Result<RasterImage, DecodeError>,
    ) -> EditorView<'_, S::Handle> {
        match image {
            Ok(image) => self.upload(image),
            Err(e) => {
                warn!(error = %e, "Failed to convert upload to an image");
                self.clear();
                self.view()
            }
        }
    }

    /// Re-render the displayed image from the base with new slider values.
    ///
    /// Values are clamped into their slider ranges first. The rendered image
    /// is handed to the download store; if that fails the preview is still
    /// shown but the download control is hidden.
    pub fn adjust(&mut self, adjustments: SliderAdjustments) -> EditorView<'_, S::Handle> {
        let Some(base) = &self.base else {
            debug!("Adjustment ignored, no image uploaded");
            self.download = DownloadButton::Hidden;
            return self.view();
        };

        let adjustments = adjustments.clamped();
        let rendered = apply_slider_adjustments(base, &adjustments);
        debug!(?adjustments, "Adjustments applied");

        self.download = match self.store.prepare(&rendered) {
            Ok(handle) => DownloadButton::Visible {
                handle,
                label: self.label.clone(),
            },
            Err(e) => {
                warn!(error = %e, "Failed to save image for download");
                DownloadButton::Hidden
            }
        };
        self.adjustments = adjustments;
        self.displayed = Some(rendered);
        self.view()
    }

    /// Apply a discrete transform to the displayed image and commit it.
    ///
    /// The result becomes both base and displayed, sliders return to neutral
    /// and the download control is hidden until the next render.
    pub fn transform(&mut self, op: TransformOp) -> EditorView<'_, S::Handle> {
        let Some(displayed) = &self.displayed else {
            debug!(%op, "Transform ignored, no image uploaded");
            self.download = DownloadButton::Hidden;
            return self.view();
        };

        let transformed = apply_transform(displayed, op);
        info!(
            %op,
            width = transformed.width(),
            height = transformed.height(),
            "Transform applied"
        );
        self.base = Some(transformed.clone());
        self.displayed = Some(transformed);
        self.adjustments = SliderAdjustments::NEUTRAL;
        self.download = DownloadButton::Hidden;
        self.view()
    }

    /// Throw away all edits and go back to the uploaded image.
    pub fn reset(&mut self) -> EditorView<'_, S::Handle> {
        match &self.original {
            Some(original) => {
                self.base = Some(original.clone());
                self.displayed = Some(original.clone());
                info!("Edits reset to original");
            }
            None => {
                self.base = None;
                self.displayed = None;
            }
        }
        self.adjustments = SliderAdjustments::NEUTRAL;
        self.download = DownloadButton::Hidden;
        self.view()
    }

    /// The current view without changing anything.
    pub fn view(&self) -> EditorView<'_, S::Handle> {
        EditorView {
            image: self.displayed.as_ref(),
            download: &self.download,
            adjustments: self.adjustments,
        }
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&RasterImage> {
        self.original.as_ref()
    }

    pub fn base(&self) -> Option<&RasterImage> {
        self.base.as_ref()
    }

    pub fn displayed(&self) -> Option<&RasterImage> {
        self.displayed.as_ref()
    }

    pub fn adjustments(&self) -> SliderAdjustments {
        self.adjustments
    }

    pub fn download(&self) -> &DownloadButton<S::Handle> {
        &self.download
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forget every image and return to the state before the first upload.
    pub fn clear(&mut self) {
        self.original = None;
        self.base = None;
        self.displayed = None;
        self.adjustments = SliderAdjustments::NEUTRAL;
        self.download = DownloadButton::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use crate::encode::encode_png;
    use crate::export::{ExportError, MemoryStore};

    /// Store that always fails, like a full disk.
    #[derive(Debug, Default)]
    struct FailingStore;

    impl DownloadStore for FailingStore {
        type Handle = ();

        fn prepare(&mut self, _image: &RasterImage) -> Result<(), ExportError> {
            Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    fn sample(width: u32, height: u32) -> RasterImage {
        let pixels = (0..(width * height * 3))
            .map(|i| (i * 13 % 251) as u8)
            .collect();
        RasterImage::from_raw(width, height, pixels).unwrap()
    }

    fn session() -> EditorSession<MemoryStore> {
        EditorSession::new(MemoryStore)
    }

    fn brighter() -> SliderAdjustments {
        SliderAdjustments {
            brightness: 1.5,
            ..SliderAdjustments::NEUTRAL
        }
    }

    // ===== Empty Session Tests =====

    #[test]
    fn test_empty_session_view() {
        let s = session();
        let view = s.view();
        assert!(!view.has_image());
        assert!(!view.download.is_visible());
        assert!(view.adjustments.is_neutral());
    }

    #[test]
    fn test_adjust_without_image() {
        let mut s = session();
        let view = s.adjust(brighter());
        assert!(view.image.is_none());
        assert!(!view.download.is_visible());
    }

    #[test]
    fn test_transform_without_image() {
        let mut s = session();
        for op in TransformOp::ALL {
            let view = s.transform(op);
            assert!(view.image.is_none());
            assert!(!view.download.is_visible());
        }
    }

    #[test]
    fn test_reset_without_image() {
        let mut s = session();
        let view = s.reset();
        assert!(view.image.is_none());
        assert!(!view.download.is_visible());
        assert!(view.adjustments.is_neutral());
    }

    // ===== Upload Tests =====

    #[test]
    fn test_upload_sets_all_images() {
        let mut s = session();
        let img = sample(4, 3);
        let view = s.upload(img.clone());
        assert_eq!(view.image, Some(&img));
        assert!(!view.download.is_visible());
        assert_eq!(s.original(), Some(&img));
        assert_eq!(s.base(), Some(&img));
    }

    #[test]
    fn test_upload_resets_sliders() {
        let mut s = session();
        s.upload(sample(2, 2));
        s.adjust(brighter());
        s.upload(sample(3, 3));
        assert!(s.adjustments().is_neutral());
        assert!(!s.download().is_visible());
    }

    #[test]
    fn test_upload_bytes() {
        let mut s = session();
        let img = sample(5, 4);
        let png = encode_png(&img).unwrap();
        let view = s.upload_bytes(&png);
        assert_eq!(view.image, Some(&img));
    }

    #[test]
    fn test_upload_bytes_invalid_clears_session() {
        let mut s = session();
        s.upload(sample(2, 2));
        s.adjust(brighter());

        let view = s.upload_bytes(b"definitely not an image");
        assert!(view.image.is_none());
        assert!(!view.download.is_visible());
        assert!(!s.has_image());
    }

    #[test]
    fn test_upload_raw_coercion_failure() {
        let mut s = session();
        let view = s.upload_raw(10, 10, vec![0u8; 5]);
        assert!(view.image.is_none());
        assert!(!view.download.is_visible());
    }

    #[test]
    fn test_upload_raw_valid() {
        let mut s = session();
        let view = s.upload_raw(1, 2, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(view.image.map(|i| i.dimensions()), Some((1, 2)));
    }

    // ===== Adjust Tests =====

    #[test]
    fn test_adjust_renders_and_prepares_download() {
        let mut s = session();
        let img = sample(4, 4);
        s.upload(img.clone());

        let view = s.adjust(brighter());
        let expected = apply_slider_adjustments(&img, &brighter());
        assert_eq!(view.image, Some(&expected));
        assert_eq!(view.download.label(), Some(DEFAULT_DOWNLOAD_LABEL));

        let bytes = view.download.handle().unwrap();
        assert_eq!(decode_image(bytes).unwrap(), expected);
    }

    #[test]
    fn test_adjust_neutral_matches_base() {
        let mut s = session();
        let img = sample(6, 5);
        s.upload(img.clone());
        s.adjust(brighter());

        let view = s.adjust(SliderAdjustments::NEUTRAL);
        assert_eq!(view.image, Some(&img));
    }

    #[test]
    fn test_adjust_does_not_accumulate() {
        let mut s = session();
        s.upload(sample(4, 4));
        let first = s.adjust(brighter()).image.cloned();
        let second = s.adjust(brighter()).image.cloned();
        assert_eq!(first, second);
        assert_eq!(s.base(), s.original());
    }

    #[test]
    fn test_adjust_clamps_values() {
        let mut s = session();
        s.upload(sample(2, 2));
        let view = s.adjust(SliderAdjustments {
            brightness: 9.0,
            blur: -3.0,
            ..SliderAdjustments::NEUTRAL
        });
        assert_eq!(view.adjustments.brightness, 3.0);
        assert_eq!(view.adjustments.blur, 0.0);
    }

    #[test]
    fn test_adjust_store_failure_keeps_preview() {
        let mut s = EditorSession::new(FailingStore);
        let img = sample(3, 3);
        s.upload(img.clone());

        let view = s.adjust(brighter());
        let expected = apply_slider_adjustments(&img, &brighter());
        assert_eq!(view.image, Some(&expected));
        assert!(!view.download.is_visible());
        assert_eq!(view.adjustments, brighter());
    }

    #[test]
    fn test_custom_download_label() {
        let mut s = session().with_download_label("Save image");
        s.upload(sample(2, 2));
        let view = s.adjust(brighter());
        assert_eq!(view.download.label(), Some("Save image"));
    }

    // ===== Transform Tests =====

    #[test]
    fn test_transform_resets_sliders() {
        for op in TransformOp::ALL {
            let mut s = session();
            s.upload(sample(3, 2));
            s.adjust(brighter());
            let view = s.transform(op);
            assert!(view.adjustments.is_neutral(), "{op} should reset sliders");
            assert!(!view.download.is_visible());
        }
    }

    #[test]
    fn test_transform_commits_displayed_image() {
        let mut s = session();
        let img = sample(3, 2);
        s.upload(img.clone());
        s.adjust(brighter());

        s.transform(TransformOp::FlipHorizontal);

        let adjusted = apply_slider_adjustments(&img, &brighter());
        let expected = apply_transform(&adjusted, TransformOp::FlipHorizontal);
        assert_eq!(s.displayed(), Some(&expected));
        assert_eq!(s.base(), Some(&expected));
        assert_eq!(s.original(), Some(&img));
    }

    #[test]
    fn test_adjust_after_transform_uses_new_base() {
        let mut s = session();
        s.upload(sample(4, 2));
        s.transform(TransformOp::RotateRight);

        let view = s.adjust(SliderAdjustments::NEUTRAL);
        assert_eq!(view.image.map(|i| i.dimensions()), Some((2, 4)));
    }

    #[test]
    fn test_rotate_four_times() {
        let mut s = session();
        let img = sample(5, 3);
        s.upload(img.clone());
        for _ in 0..4 {
            s.transform(TransformOp::RotateRight);
        }
        assert_eq!(s.displayed(), Some(&img));
    }

    #[test]
    fn test_flip_twice() {
        let mut s = session();
        let img = sample(5, 3);
        s.upload(img.clone());
        s.transform(TransformOp::FlipHorizontal);
        s.transform(TransformOp::FlipHorizontal);
        assert_eq!(s.displayed(), Some(&img));
    }

    // ===== Reset Tests =====

    #[test]
    fn test_reset_restores_original() {
        let mut s = session();
        let img = sample(4, 3);
        s.upload(img.clone());
        s.adjust(brighter());
        s.transform(TransformOp::Grayscale);
        s.transform(TransformOp::RotateRight);
        s.adjust(SliderAdjustments {
            blur: 2.0,
            ..SliderAdjustments::NEUTRAL
        });

        let view = s.reset();
        assert_eq!(view.image, Some(&img));
        assert!(!view.download.is_visible());
        assert!(view.adjustments.is_neutral());
        assert_eq!(s.base(), Some(&img));
    }

    #[cfg(feature = "tempfile")]
    #[test]
    fn test_temp_file_session_round_trip() {
        use crate::export::TempFileStore;

        let dir = tempfile::tempdir().unwrap();
        let mut s = EditorSession::new(TempFileStore::in_dir(dir.path()));
        s.upload(sample(3, 3));

        let view = s.adjust(brighter());
        let path = view.download.handle().unwrap().clone();
        let on_disk = decode_image(&std::fs::read(path).unwrap()).unwrap();
        assert_eq!(Some(&on_disk), s.displayed());
    }

    #[cfg(feature = "tempfile")]
    #[test]
    fn test_temp_file_session_write_failure() {
        use crate::export::TempFileStore;

        let dir = tempfile::tempdir().unwrap();
        let mut s = EditorSession::new(TempFileStore::in_dir(dir.path().join("missing")));
        s.upload(sample(3, 3));

        let view = s.adjust(brighter());
        assert!(view.image.is_some());
        assert!(!view.download.is_visible());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
