//! Thumbnail generation.
//!
//! Deliberately softer failure mode than the rest of the crate: `None`
//! covers both "source unreadable" and "no thumbnail producible", and
//! callers must treat the two identically. The distinction only shows up in
//! the debug log.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::imaging::backend::ImageBackend;
use crate::settings::Settings;
use crate::worker::Task;

/// Produce a downscaled thumbnail of the image at `path` per
/// [`ThumbnailOptions`](crate::settings::ThumbnailOptions).
pub fn thumbnail(
    backend: &impl ImageBackend,
    path: &Path,
    settings: &Settings,
) -> Option<DynamicImage> {
    debug!(path = %path.display(), "creating thumbnail");
    let result = backend.thumbnail(path, &settings.thumbnail);
    match &result {
        Some(image) => debug!(
            width = image.width(),
            height = image.height(),
            "finished creating thumbnail"
        ),
        None => debug!(path = %path.display(), "no thumbnail could be produced"),
    }
    result
}

/// Background variant of [`thumbnail`].
pub fn spawn_thumbnail<B>(backend: B, path: PathBuf, settings: Settings) -> Task<Option<DynamicImage>>
where
    B: ImageBackend + Send + 'static,
{
    Task::spawn(move || thumbnail(&backend, &path, &settings))
}
