//! Typed settings for image operations.
//!
//! These structs describe *how* operations should behave, not *what* they
//! operate on. Dynamic key/value option bags never cross the core logic:
//! settings stay typed and are translated to `image`-crate calls only at the
//! backend boundary.
//!
//! Every bundle is `Clone + Default` and carries serde derives so embedding
//! applications can load it from a config file. A [`Settings`] value is
//! constructed once per call site and passed by value into every operation
//! that needs it.

use std::path::PathBuf;

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// Default filename for saved images when none is configured.
pub const DEFAULT_FILENAME: &str = "filmstrip.png";

/// Pixel layout used when allocating composition and rotation canvases.
///
/// The stand-in for bits-per-component / alpha-layout context parameters:
/// the layout decides the canvas buffer type, and with it what uncovered
/// canvas looks like (transparent for [`PixelLayout::Rgba8`], black
/// otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelLayout {
    /// 8 bits per component, RGB plus alpha.
    #[default]
    Rgba8,
    /// 8 bits per component, RGB, no alpha channel.
    Rgb8,
    /// 8-bit grayscale.
    Luma8,
}

impl PixelLayout {
    /// Convert a buffer into this layout. A no-op when the buffer already
    /// matches.
    pub(crate) fn convert(self, image: DynamicImage) -> DynamicImage {
        match (self, &image) {
            (PixelLayout::Rgba8, DynamicImage::ImageRgba8(_))
            | (PixelLayout::Rgb8, DynamicImage::ImageRgb8(_))
            | (PixelLayout::Luma8, DynamicImage::ImageLuma8(_)) => image,
            (PixelLayout::Rgba8, _) => DynamicImage::ImageRgba8(image.to_rgba8()),
            (PixelLayout::Rgb8, _) => DynamicImage::ImageRgb8(image.to_rgb8()),
            (PixelLayout::Luma8, _) => DynamicImage::ImageLuma8(image.to_luma8()),
        }
    }
}

/// Output encodings the save operation supports.
///
/// Matches the set of compiled-in encoders; translated to
/// [`image::ImageFormat`] only at the encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Tiff,
    WebP,
}

impl OutputFormat {
    /// The filename extension conventionally used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tiff",
            OutputFormat::WebP => "webp",
        }
    }

    pub(crate) fn to_image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }
}

/// Rotation behavior for [`rotate_images`](crate::rotate::rotate_images).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RotationOptions {
    /// Orientation images are normalized toward. Only [`Orientation::Up`]
    /// is implemented.
    pub target_orientation: Orientation,
    /// When true, an image without orientation metadata passes through the
    /// batch untouched; when false, it aborts the whole batch. The image is
    /// never skipped — untouched means included, not rotated.
    pub tolerate_missing_metadata: bool,
}

impl Default for RotationOptions {
    fn default() -> Self {
        RotationOptions {
            target_orientation: Orientation::Up,
            tolerate_missing_metadata: true,
        }
    }
}

/// Canvas allocation parameters for composition and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CanvasOptions {
    pub pixel_layout: PixelLayout,
}

/// Thumbnail creation parameters for [`thumbnail`](crate::thumbnail::thumbnail).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThumbnailOptions {
    /// Keep extended-range (16-bit or float) channels when the source format
    /// carries them. When false the thumbnail is forced to 8-bit channels.
    pub allow_float: bool,
    /// Rotate the thumbnail upright per the source's embedded orientation.
    pub rotate_and_scale: bool,
    /// Always downscale from the full image, even when the source embeds a
    /// ready-made thumbnail.
    pub always_from_image: bool,
    /// Upper bound on the larger edge, aspect ratio preserved. `None` keeps
    /// the source size.
    pub max_pixel_size: Option<u32>,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        ThumbnailOptions {
            allow_float: true,
            rotate_and_scale: true,
            always_from_image: true,
            max_pixel_size: None,
        }
    }
}

/// Destination parameters for [`save`](crate::save::save).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SaveOptions {
    /// Filename including extension.
    pub filename: String,
    /// Destination directory. `None` resolves to the user's temporary
    /// directory.
    pub destination: Option<PathBuf>,
    /// Encoding of the written file.
    pub format: OutputFormat,
}

impl SaveOptions {
    /// The full path the image will be written to.
    pub fn resolved_path(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(&self.filename)
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            filename: DEFAULT_FILENAME.to_string(),
            destination: None,
            format: OutputFormat::Png,
        }
    }
}

/// The full settings bundle, one sub-struct per concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub rotation: RotationOptions,
    pub canvas: CanvasOptions,
    pub thumbnail: ThumbnailOptions,
    pub save: SaveOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.rotation.target_orientation, Orientation::Up);
        assert!(settings.rotation.tolerate_missing_metadata);
        assert_eq!(settings.canvas.pixel_layout, PixelLayout::Rgba8);
        assert!(settings.thumbnail.allow_float);
        assert!(settings.thumbnail.rotate_and_scale);
        assert!(settings.thumbnail.always_from_image);
        assert_eq!(settings.thumbnail.max_pixel_size, None);
        assert_eq!(settings.save.filename, DEFAULT_FILENAME);
        assert_eq!(settings.save.destination, None);
        assert_eq!(settings.save.format, OutputFormat::Png);
    }

    #[test]
    fn save_path_defaults_to_temp_dir() {
        let options = SaveOptions::default();
        assert_eq!(
            options.resolved_path(),
            std::env::temp_dir().join(DEFAULT_FILENAME)
        );
    }

    #[test]
    fn save_path_uses_explicit_destination() {
        let options = SaveOptions {
            filename: "strip.jpg".into(),
            destination: Some(PathBuf::from("/var/output")),
            format: OutputFormat::Jpeg,
        };
        assert_eq!(
            options.resolved_path(),
            PathBuf::from("/var/output/strip.jpg")
        );
    }

    #[test]
    fn pixel_layout_convert_is_stable() {
        let rgba = DynamicImage::new_rgba8(4, 4);
        let converted = PixelLayout::Rgb8.convert(rgba);
        assert!(matches!(converted, DynamicImage::ImageRgb8(_)));

        let back = PixelLayout::Rgb8.convert(converted);
        assert!(matches!(back, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn output_format_extensions() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn settings_deserialize_from_partial_toml_shaped_json() {
        let settings: Settings = serde_json::from_str(
            r#"{"rotation": {"tolerate-missing-metadata": false}}"#,
        )
        .unwrap();
        assert!(!settings.rotation.tolerate_missing_metadata);
        assert_eq!(settings.rotation.target_orientation, Orientation::Up);
    }
}
