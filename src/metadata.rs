//! Image metadata extraction: pixel dimensions and orientation.
//!
//! ## Orientation fallback chain
//!
//! Some encoders park the orientation tag only in format-specific
//! sub-dictionaries, so a root-only lookup misses real-world files. The
//! reader resolves orientation in priority order:
//!
//! - **Root**: the EXIF primary-directory tag
//! - **TIFF**: tag 274 read straight from the TIFF directory
//! - **IPTC**: the IIM Image Orientation dataset
//!
//! The first code found wins. Codes outside 1-8 (including the 0 some
//! writers emit) count as no orientation at all.
//!
//! Reads have no side effects and are safe to run concurrently on distinct
//! files.

use std::path::Path;

use crate::error::{FilmstripError, Result};
use crate::imaging::backend::{Dimensions, ImageBackend};
use crate::orientation::Orientation;

/// Tags found in the TIFF sub-directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TiffProperties {
    pub orientation: Option<u16>,
}

/// Tags found in the IPTC sub-directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IptcProperties {
    pub orientation: Option<u16>,
}

/// Everything the reader pulled out of one file's embedded metadata.
///
/// Each field is independently optional; the accessors below apply the
/// resolution rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageProperties {
    pub pixel_width: Option<u32>,
    pub pixel_height: Option<u32>,
    /// Root orientation code, as stored.
    pub orientation: Option<u16>,
    pub tiff: TiffProperties,
    pub iptc: IptcProperties,
}

impl ImageProperties {
    /// First orientation code found: root, then TIFF, then IPTC.
    pub fn orientation_code(&self) -> Option<u16> {
        self.orientation
            .or(self.tiff.orientation)
            .or(self.iptc.orientation)
    }

    /// Pixel dimensions, when both tags are present.
    pub fn size(&self) -> Option<Dimensions> {
        Some(Dimensions {
            width: self.pixel_width?,
            height: self.pixel_height?,
        })
    }
}

/// Read the full property set of the image at `path`.
pub fn properties(backend: &impl ImageBackend, path: &Path) -> Result<ImageProperties> {
    backend.properties(path)
}

/// The orientation of the image at `path`, resolved through the fallback
/// chain. Fails when no chain entry holds a valid code.
pub fn orientation(backend: &impl ImageBackend, path: &Path) -> Result<Orientation> {
    backend
        .properties(path)?
        .orientation_code()
        .and_then(Orientation::from_exif)
        .ok_or_else(|| FilmstripError::CannotReadOrientation(path.to_path_buf()))
}

/// The pixel dimensions of the image at `path`. Fails when either tag is
/// absent.
pub fn size(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend
        .properties(path)?
        .size()
        .ok_or_else(|| FilmstripError::CannotReadSize(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;

    #[test]
    fn orientation_code_prefers_root_over_tiff_over_iptc() {
        let mut props = ImageProperties {
            orientation: Some(3),
            tiff: TiffProperties {
                orientation: Some(6),
            },
            iptc: IptcProperties {
                orientation: Some(8),
            },
            ..ImageProperties::default()
        };
        assert_eq!(props.orientation_code(), Some(3));

        props.orientation = None;
        assert_eq!(props.orientation_code(), Some(6));

        props.tiff.orientation = None;
        assert_eq!(props.orientation_code(), Some(8));

        props.iptc.orientation = None;
        assert_eq!(props.orientation_code(), None);
    }

    #[test]
    fn size_requires_both_tags() {
        let props = ImageProperties {
            pixel_width: Some(100),
            ..ImageProperties::default()
        };
        assert_eq!(props.size(), None);

        let props = ImageProperties {
            pixel_width: Some(100),
            pixel_height: Some(50),
            ..ImageProperties::default()
        };
        assert_eq!(
            props.size(),
            Some(Dimensions {
                width: 100,
                height: 50
            })
        );
    }

    #[test]
    fn orientation_resolves_through_backend() {
        let backend = MockBackend::new().with_image("/a.jpg", 10, 10, Some(6));
        let result = orientation(&backend, Path::new("/a.jpg")).unwrap();
        assert_eq!(result, Orientation::Right);
    }

    #[test]
    fn orientation_missing_tag_errors() {
        let backend = MockBackend::new().with_image("/a.jpg", 10, 10, None);
        assert!(matches!(
            orientation(&backend, Path::new("/a.jpg")),
            Err(FilmstripError::CannotReadOrientation(_))
        ));
    }

    #[test]
    fn orientation_code_zero_counts_as_missing() {
        let backend = MockBackend::new().with_image("/a.jpg", 10, 10, Some(0));
        assert!(matches!(
            orientation(&backend, Path::new("/a.jpg")),
            Err(FilmstripError::CannotReadOrientation(_))
        ));
    }

    #[test]
    fn size_resolves_through_backend() {
        let backend = MockBackend::new().with_image("/a.jpg", 640, 480, None);
        let result = size(&backend, Path::new("/a.jpg")).unwrap();
        assert_eq!(
            result,
            Dimensions {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn unknown_file_errors_with_properties_failure() {
        let backend = MockBackend::new();
        assert!(matches!(
            orientation(&backend, Path::new("/missing.jpg")),
            Err(FilmstripError::CannotReadProperties(_))
        ));
    }
}
