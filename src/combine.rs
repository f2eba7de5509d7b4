//! Horizontal composition of image buffers.
//!
//! Images are placed left to right in input order with no overlap, no
//! scaling, and no vertical centering: every image sits at y = 0, and a
//! shorter image leaves uncovered canvas below it (transparent or black,
//! per the configured [`PixelLayout`]).
//!
//! Two orchestrations sit on top of the compositor:
//! - [`combine_buffers`] composes already-decoded buffers as they are. It
//!   does not consult orientation metadata — a bare pixel buffer carries
//!   none — so sideways images stay sideways.
//! - [`combine_files`] first normalizes every file through
//!   [`rotate_images`](crate::rotate::rotate_images), then composes the
//!   results.

use std::path::PathBuf;

use image::{DynamicImage, GenericImage};
use tracing::debug;

use crate::error::{FilmstripError, Result};
use crate::imaging::backend::{Dimensions, ImageBackend};
use crate::imaging::calculations::{self, HorizontalLayout};
use crate::rotate::{self, RotatedImage};
use crate::settings::{PixelLayout, Settings};
use crate::worker::Task;

/// Compose already-decoded buffers into one horizontal strip.
pub fn combine_buffers(images: &[DynamicImage], settings: &Settings) -> Result<DynamicImage> {
    debug!(count = images.len(), "combining pre-decoded buffers");
    distribute_horizontally(images, settings)
}

/// Rotate the images at `paths` to the target orientation, then compose
/// them into one horizontal strip.
pub fn combine_files(
    backend: &impl ImageBackend,
    paths: &[PathBuf],
    settings: &Settings,
) -> Result<DynamicImage> {
    debug!(count = paths.len(), "combining images from files");
    let rotated = rotate::rotate_images(backend, paths, settings)?;
    let combined = distribute_rotated(&rotated, settings)?;
    debug!(
        width = combined.width(),
        height = combined.height(),
        "finished combining images from files"
    );
    Ok(combined)
}

/// Background variant of [`combine_buffers`].
pub fn spawn_combine_buffers(
    images: Vec<DynamicImage>,
    settings: Settings,
) -> Task<Result<DynamicImage>> {
    Task::spawn(move || combine_buffers(&images, &settings))
}

/// Background variant of [`combine_files`]; rotation and composition run as
/// one unit of work reporting exactly once.
pub fn spawn_combine_files<B>(
    backend: B,
    paths: Vec<PathBuf>,
    settings: Settings,
) -> Task<Result<DynamicImage>>
where
    B: ImageBackend + Send + 'static,
{
    Task::spawn(move || combine_files(&backend, &paths, &settings))
}

/// Compose rotated images, reusing their post-rotation sizes for the layout.
pub fn distribute_rotated(
    rotated: &[RotatedImage],
    settings: &Settings,
) -> Result<DynamicImage> {
    ensure_batch_size(rotated.len())?;
    let sizes: Vec<Dimensions> = rotated.iter().map(|r| r.size).collect();
    let layout = calculations::horizontal_layout(&sizes)?;
    draw_strip(
        rotated.iter().map(|r| &r.image),
        &layout,
        settings.canvas.pixel_layout,
    )
}

/// Compose plain buffers left to right.
pub fn distribute_horizontally(
    images: &[DynamicImage],
    settings: &Settings,
) -> Result<DynamicImage> {
    ensure_batch_size(images.len())?;
    let sizes: Vec<Dimensions> = images
        .iter()
        .map(|image| Dimensions {
            width: image.width(),
            height: image.height(),
        })
        .collect();
    let layout = calculations::horizontal_layout(&sizes)?;
    draw_strip(images.iter(), &layout, settings.canvas.pixel_layout)
}

fn ensure_batch_size(count: usize) -> Result<()> {
    if count < 2 {
        return Err(FilmstripError::InvalidNumberOfImages(count));
    }
    Ok(())
}

/// Allocate the canvas and draw every image at its x origin.
fn draw_strip<'a>(
    images: impl Iterator<Item = &'a DynamicImage>,
    layout: &HorizontalLayout,
    pixel_layout: PixelLayout,
) -> Result<DynamicImage> {
    debug!(
        width = layout.canvas.width,
        height = layout.canvas.height,
        "allocating composite canvas"
    );
    let mut canvas = allocate_canvas(layout.canvas, pixel_layout);

    for (image, &x) in images.zip(&layout.x_offsets) {
        canvas.copy_from(image, x, 0).map_err(|error| {
            debug!(%error, x, "cannot draw image onto canvas");
            FilmstripError::CannotDistributeImagesHorizontally
        })?;
    }

    Ok(canvas)
}

fn allocate_canvas(size: Dimensions, layout: PixelLayout) -> DynamicImage {
    match layout {
        PixelLayout::Rgba8 => DynamicImage::new_rgba8(size.width, size.height),
        PixelLayout::Rgb8 => DynamicImage::new_rgb8(size.width, size.height),
        PixelLayout::Luma8 => DynamicImage::new_luma8(size.width, size.height),
    }
}
