//! Writing a pixel buffer back to a file.
//!
//! The destination is the configured directory (or the user's temporary
//! directory) joined with the configured filename. Opening the encoder and
//! finalizing the file are not distinguished to the caller — both collapse
//! into [`FilmstripError::CannotSaveImage`](crate::FilmstripError::CannotSaveImage).
//! Only single-frame files are written.

use std::path::PathBuf;

use image::DynamicImage;
use tracing::debug;

use crate::error::Result;
use crate::imaging::backend::ImageBackend;
use crate::settings::Settings;
use crate::worker::Task;

/// Encode `image` per [`SaveOptions`](crate::settings::SaveOptions) and
/// return the path it was written to.
pub fn save(
    backend: &impl ImageBackend,
    image: &DynamicImage,
    settings: &Settings,
) -> Result<PathBuf> {
    let destination = settings.save.resolved_path();
    debug!(
        destination = %destination.display(),
        format = ?settings.save.format,
        "saving image"
    );
    backend.encode(image, &destination, settings.save.format)?;
    debug!(destination = %destination.display(), "finished saving image");
    Ok(destination)
}

/// Background variant of [`save`].
pub fn spawn_save<B>(backend: B, image: DynamicImage, settings: Settings) -> Task<Result<PathBuf>>
where
    B: ImageBackend + Send + 'static,
{
    Task::spawn(move || save(&backend, &image, &settings))
}
