//! Orientation normalization for batches of image files.
//!
//! For each file the pipeline decodes the pixels, reads size and orientation
//! from the metadata, and rotates only when the current orientation differs
//! from the target. Images without usable orientation metadata either pass
//! through untouched or abort the batch, depending on
//! [`RotationOptions::tolerate_missing_metadata`](crate::settings::RotationOptions::tolerate_missing_metadata).
//!
//! Batches process strictly in input order and fail fast: the first error
//! aborts the remaining files and no partial results are returned.

use std::f32::consts::{FRAC_PI_2, PI};
use std::path::PathBuf;

use image::DynamicImage;
use tracing::debug;

use crate::error::{FilmstripError, Result};
use crate::imaging::backend::{Dimensions, ImageBackend};
use crate::imaging::calculations;
use crate::metadata;
use crate::orientation::{self, Orientation, RotationParameters};
use crate::settings::{PixelLayout, Settings};
use crate::worker::Task;

/// An image processed by [`rotate_images`]: the pixel buffer together with
/// its post-rotation size. Not mutated after creation.
#[derive(Debug, Clone)]
pub struct RotatedImage {
    pub image: DynamicImage,
    pub size: Dimensions,
}

/// Normalize the orientation of every image in `paths`.
///
/// Requires at least two inputs; fewer fail with
/// [`FilmstripError::InvalidNumberOfImages`] before anything is decoded.
/// Output order matches input order. An image whose orientation already
/// equals the target (or that has no usable orientation metadata, when
/// tolerated) is included untouched — never skipped.
pub fn rotate_images(
    backend: &impl ImageBackend,
    paths: &[PathBuf],
    settings: &Settings,
) -> Result<Vec<RotatedImage>> {
    if paths.len() < 2 {
        return Err(FilmstripError::InvalidNumberOfImages(paths.len()));
    }
    let target = settings.rotation.target_orientation;
    debug!(count = paths.len(), target_orientation = %target, "rotating image batch");

    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let image = backend.decode(path)?;
        let properties = metadata::properties(backend, path)?;
        let size = properties
            .size()
            .ok_or_else(|| FilmstripError::CannotReadSize(path.clone()))?;

        let current = match properties
            .orientation_code()
            .and_then(Orientation::from_exif)
        {
            Some(current) => current,
            None if settings.rotation.tolerate_missing_metadata => {
                debug!(path = %path.display(), "no orientation metadata, passing through untouched");
                results.push(RotatedImage { image, size });
                continue;
            }
            None => return Err(FilmstripError::CannotReadOrientation(path.clone())),
        };

        if current == target {
            results.push(RotatedImage { image, size });
            continue;
        }

        let parameters = orientation::rotation_parameters(current, target)?;
        debug!(path = %path.display(), %current, angle = parameters.angle, "rotating image");
        results.push(rotate(image, parameters, settings.canvas.pixel_layout)?);
    }

    debug!(count = results.len(), "finished rotating image batch");
    Ok(results)
}

/// Background variant of [`rotate_images`]; the whole batch reports exactly
/// once through the returned task.
pub fn spawn_rotate_images<B>(
    backend: B,
    paths: Vec<PathBuf>,
    settings: Settings,
) -> Task<Result<Vec<RotatedImage>>>
where
    B: ImageBackend + Send + 'static,
{
    Task::spawn(move || rotate_images(&backend, &paths, &settings))
}

/// Rotate one buffer per the given parameters.
///
/// The destination size is computed from the rotation angle alone, with both
/// dimensions floored; the produced buffer disagreeing with it is a terminal
/// [`FilmstripError::CannotRotateImage`].
pub fn rotate(
    image: DynamicImage,
    parameters: RotationParameters,
    layout: PixelLayout,
) -> Result<RotatedImage> {
    let source = Dimensions {
        width: image.width(),
        height: image.height(),
    };
    let expected = calculations::rotated_size(parameters.angle, source);

    let rotated = layout.convert(transform(image, parameters)?);
    if rotated.width() != expected.width || rotated.height() != expected.height {
        return Err(FilmstripError::CannotRotateImage);
    }

    Ok(RotatedImage {
        image: rotated,
        size: expected,
    })
}

/// Apply the mirror flags (in the source frame), then the quarter turn.
pub(crate) fn transform(
    image: DynamicImage,
    parameters: RotationParameters,
) -> Result<DynamicImage> {
    let mut image = image;
    if parameters.flip_horizontal {
        image = image.fliph();
    }
    if parameters.flip_vertical {
        image = image.flipv();
    }

    let turn =
        QuarterTurn::from_angle(parameters.angle).ok_or(FilmstripError::CannotRotateImage)?;
    Ok(match turn {
        QuarterTurn::None => image,
        QuarterTurn::Clockwise => image.rotate90(),
        QuarterTurn::Half => image.rotate180(),
        QuarterTurn::CounterClockwise => image.rotate270(),
    })
}

/// The quarter turn a rotation angle selects. Negative angles turn clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterTurn {
    None,
    Clockwise,
    Half,
    CounterClockwise,
}

impl QuarterTurn {
    fn from_angle(angle: f32) -> Option<Self> {
        const EPSILON: f32 = 1e-3;
        let near = |target: f32| (angle - target).abs() < EPSILON;
        if near(0.0) {
            Some(QuarterTurn::None)
        } else if near(-FRAC_PI_2) {
            Some(QuarterTurn::Clockwise)
        } else if near(FRAC_PI_2) {
            Some(QuarterTurn::CounterClockwise)
        } else if near(PI) || near(-PI) {
            Some(QuarterTurn::Half)
        } else {
            None
        }
    }
}
