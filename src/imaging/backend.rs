//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the platform boundary: every operation that
//! opens, decodes, or encodes a file goes through it. The rest of the crate
//! only orchestrates — it never touches a codec directly, so pipeline logic
//! can be tested against a mock that serves synthetic buffers.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use std::path::Path;

use image::DynamicImage;

use crate::error::Result;
use crate::metadata::ImageProperties;
use crate::settings::{OutputFormat, ThumbnailOptions};

/// Pixel dimensions of an image or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image file backends.
pub trait ImageBackend: Sync {
    /// Decode the image at `path` into a pixel buffer.
    ///
    /// Must not be invoked from the main thread; implementations fail with
    /// [`FilmstripError::CalledFromMainThread`](crate::FilmstripError::CalledFromMainThread)
    /// when it is.
    fn decode(&self, path: &Path) -> Result<DynamicImage>;

    /// Read the embedded metadata of the image at `path`.
    fn properties(&self, path: &Path) -> Result<ImageProperties>;

    /// Produce a downscaled thumbnail per `options`.
    ///
    /// Returns `None` both when the source cannot be opened and when no
    /// thumbnail can be produced; callers cannot distinguish the two.
    fn thumbnail(&self, path: &Path, options: &ThumbnailOptions) -> Option<DynamicImage>;

    /// Encode `image` to `path` in the given format.
    fn encode(&self, image: &DynamicImage, path: &Path, format: OutputFormat) -> Result<()>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::error::FilmstripError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock backend that serves synthetic buffers and records every call.
    /// Uses Mutex so it is Sync and usable across worker threads.
    #[derive(Default)]
    pub struct MockBackend {
        pub images: Mutex<HashMap<PathBuf, DynamicImage>>,
        pub properties: Mutex<HashMap<PathBuf, ImageProperties>>,
        pub thumbnails: Mutex<HashMap<PathBuf, DynamicImage>>,
        pub fail_encode: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(PathBuf),
        Properties(PathBuf),
        Thumbnail(PathBuf),
        Encode { path: PathBuf, format: OutputFormat },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a solid RGBA image plus matching metadata under `path`.
        /// `orientation` is the raw root code, or `None` for no tag at all.
        pub fn with_image(
            self,
            path: impl Into<PathBuf>,
            width: u32,
            height: u32,
            orientation: Option<u16>,
        ) -> Self {
            let path = path.into();
            let image = DynamicImage::new_rgba8(width, height);
            let props = ImageProperties {
                pixel_width: Some(width),
                pixel_height: Some(height),
                orientation,
                ..ImageProperties::default()
            };
            self.images.lock().unwrap().insert(path.clone(), image);
            self.properties.lock().unwrap().insert(path, props);
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<DynamicImage> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_path_buf()));
            self.images
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| FilmstripError::CannotCreateImage(path.to_path_buf()))
        }

        fn properties(&self, path: &Path) -> Result<ImageProperties> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Properties(path.to_path_buf()));
            self.properties
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| FilmstripError::CannotReadProperties(path.to_path_buf()))
        }

        fn thumbnail(&self, path: &Path, _options: &ThumbnailOptions) -> Option<DynamicImage> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Thumbnail(path.to_path_buf()));
            self.thumbnails.lock().unwrap().get(path).cloned()
        }

        fn encode(&self, _image: &DynamicImage, path: &Path, format: OutputFormat) -> Result<()> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                path: path.to_path_buf(),
                format,
            });
            if self.fail_encode {
                return Err(FilmstripError::CannotSaveImage(path.to_path_buf()));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_serves_registered_images() {
        let backend = MockBackend::new().with_image("/a.jpg", 40, 30, Some(6));

        let image = backend.decode(Path::new("/a.jpg")).unwrap();
        assert_eq!((image.width(), image.height()), (40, 30));

        let props = backend.properties(Path::new("/a.jpg")).unwrap();
        assert_eq!(props.orientation, Some(6));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == Path::new("/a.jpg")));
    }

    #[test]
    fn mock_errors_on_unknown_paths() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.decode(Path::new("/missing.jpg")),
            Err(FilmstripError::CannotCreateImage(_))
        ));
        assert!(matches!(
            backend.properties(Path::new("/missing.jpg")),
            Err(FilmstripError::CannotReadProperties(_))
        ));
        assert!(
            backend
                .thumbnail(Path::new("/missing.jpg"), &ThumbnailOptions::default())
                .is_none()
        );
    }
}
