//! Pure Rust image backend — everything statically linked.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Header probe | `image::ImageReader::into_dimensions` |
//! | Root orientation | `kamadak-exif` (primary IFD) |
//! | TIFF/IPTC orientation, embedded thumbnail | custom `exif_parser` |
//! | Downscale | `image::DynamicImage::resize` with `Lanczos3` |
//! | Encode | `image::DynamicImage::write_to` |

use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::error::{FilmstripError, Result};
use crate::imaging::backend::ImageBackend;
use crate::imaging::exif_parser::{self, TagSources};
use crate::metadata::{ImageProperties, IptcProperties, TiffProperties};
use crate::orientation::{self, Orientation};
use crate::rotate;
use crate::settings::{OutputFormat, ThumbnailOptions};
use crate::worker;

/// Backend built on the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .map_err(|error| {
            debug!(path = %path.display(), %error, "cannot open image");
            FilmstripError::CannotCreateImage(path.to_path_buf())
        })?
        .decode()
        .map_err(|error| {
            debug!(path = %path.display(), %error, "cannot decode image");
            FilmstripError::CannotCreateImage(path.to_path_buf())
        })
}

/// Root orientation code from the EXIF primary directory.
fn read_root_orientation(bytes: &[u8]) -> Option<u16> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    match &field.value {
        exif::Value::Short(values) if !values.is_empty() => Some(values[0]),
        exif::Value::Long(values) if !values.is_empty() => Some(values[0] as u16),
        _ => None,
    }
}

/// Force extended-range buffers down to 8-bit channels.
fn clamp_to_eight_bit(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgb32F(_)
        | DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba8(image.to_rgba8()),
        other => other,
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        worker::ensure_off_main_thread()?;
        debug!(path = %path.display(), "decoding image");
        load_image(path)
    }

    fn properties(&self, path: &Path) -> Result<ImageProperties> {
        let bytes = fs::read(path).map_err(|error| {
            debug!(path = %path.display(), %error, "cannot read file for properties");
            FilmstripError::CannotReadProperties(path.to_path_buf())
        })?;

        let dimensions = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());
        let sources = exif_parser::read_tag_sources(path, &bytes);

        Ok(ImageProperties {
            pixel_width: dimensions.map(|(width, _)| width),
            pixel_height: dimensions.map(|(_, height)| height),
            orientation: read_root_orientation(&bytes),
            tiff: TiffProperties {
                orientation: sources.tiff_orientation,
            },
            iptc: IptcProperties {
                orientation: sources.iptc_orientation,
            },
        })
    }

    fn thumbnail(&self, path: &Path, options: &ThumbnailOptions) -> Option<DynamicImage> {
        let bytes = fs::read(path).ok()?;
        let sources = exif_parser::read_tag_sources(path, &bytes);

        let mut thumb = match embedded_thumbnail(&sources, options) {
            Some(embedded) => embedded,
            None => image::load_from_memory(&bytes).ok()?,
        };

        if options.rotate_and_scale {
            let current = read_root_orientation(&bytes)
                .or(sources.tiff_orientation)
                .or(sources.iptc_orientation)
                .and_then(Orientation::from_exif);
            match current {
                Some(current) if current != Orientation::Up => {
                    let parameters =
                        orientation::rotation_parameters(current, Orientation::Up).ok()?;
                    thumb = rotate::transform(thumb, parameters).ok()?;
                }
                _ => {}
            }
        }

        if let Some(max) = options.max_pixel_size {
            if thumb.width().max(thumb.height()) > max {
                thumb = thumb.resize(max, max, FilterType::Lanczos3);
            }
        }

        if !options.allow_float {
            thumb = clamp_to_eight_bit(thumb);
        }

        Some(thumb)
    }

    fn encode(&self, image: &DynamicImage, path: &Path, format: OutputFormat) -> Result<()> {
        let file = fs::File::create(path).map_err(|error| {
            debug!(path = %path.display(), %error, "cannot open encoder destination");
            FilmstripError::CannotSaveImage(path.to_path_buf())
        })?;
        let mut writer = BufWriter::new(file);

        // JPEG carries no alpha channel.
        let result = if format == OutputFormat::Jpeg && image.color().has_alpha() {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut writer, format.to_image_format())
        } else {
            image.write_to(&mut writer, format.to_image_format())
        };

        result.map_err(|error| {
            debug!(path = %path.display(), %error, "cannot finalize image file");
            FilmstripError::CannotSaveImage(path.to_path_buf())
        })
    }
}

/// Decode the embedded EXIF thumbnail when settings allow reusing it.
fn embedded_thumbnail(sources: &TagSources, options: &ThumbnailOptions) -> Option<DynamicImage> {
    if options.always_from_image {
        return None;
    }
    let jpeg = sources.thumbnail.as_deref()?;
    image::load_from_memory(jpeg).ok()
}
