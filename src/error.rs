//! Error types for filmstrip operations.
//!
//! One flat enum covers every stage: validation, decode, metadata, geometry,
//! transform, threading precondition, and persistence. Every error is
//! terminal — batch operations abort on the first one and report it exactly
//! once through their completion channel. The only soft failure modes are
//! documented on the operations themselves: tolerated missing orientation
//! metadata ([`rotate_images`](crate::rotate::rotate_images)) and thumbnail
//! generation returning `None` ([`thumbnail`](crate::thumbnail::thumbnail)).

use std::path::PathBuf;
use thiserror::Error;

use crate::orientation::Orientation;

#[derive(Error, Debug)]
pub enum FilmstripError {
    /// Full-image decoding is barred from the main thread.
    #[error("image decoding must not be invoked from the main thread")]
    CalledFromMainThread,

    /// The composite canvas would exceed the platform's dimension limits.
    #[error("cannot create a {width}x{height} canvas")]
    CannotCreateCanvas { width: u64, height: u64 },

    /// The file could not be opened or decoded as an image.
    #[error("cannot create an image from {0}")]
    CannotCreateImage(PathBuf),

    /// Drawing an image onto the composite canvas failed.
    #[error("cannot distribute images horizontally")]
    CannotDistributeImagesHorizontally,

    /// No orientation tag in the root, TIFF, or IPTC metadata.
    #[error("no orientation metadata in {0}")]
    CannotReadOrientation(PathBuf),

    /// The file's metadata could not be read at all.
    #[error("cannot read image properties from {0}")]
    CannotReadProperties(PathBuf),

    /// The metadata lacks a pixel width or height.
    #[error("no pixel dimensions in the metadata of {0}")]
    CannotReadSize(PathBuf),

    /// The rotated buffer could not be produced.
    #[error("cannot rotate image")]
    CannotRotateImage,

    /// Opening the encoder or finalizing the file failed.
    #[error("cannot save image to {0}")]
    CannotSaveImage(PathBuf),

    /// A horizontal composite would have zero height.
    #[error("combined canvas height must be greater than zero")]
    InvalidHeight,

    /// Batch operations require at least two images.
    #[error("at least two images are required, got {0}")]
    InvalidNumberOfImages(usize),

    /// Rotation toward any orientation other than `Up` is not implemented.
    #[error("rotation toward {0} is not implemented")]
    UnsupportedTargetOrientation(Orientation),

    /// The background worker died before delivering its result.
    #[error("worker thread terminated before reporting a result")]
    WorkerTerminated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FilmstripError>;
