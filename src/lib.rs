//! # Filmstrip
//!
//! Normalize photo orientation and stitch images into a single horizontal
//! strip. Filmstrip is a convenience layer over the `image` crate: it decodes
//! files, reads EXIF/TIFF/IPTC orientation metadata, rotates images upright,
//! composes them left to right into one canvas, generates thumbnails, and
//! writes the result back to disk. All pixel work is delegated to the
//! compiled-in codecs; this crate contributes the orchestration.
//!
//! # The Pipeline
//!
//! ```text
//! files ──decode──▶ buffers ──rotate──▶ RotatedImage ──compose──▶ strip ──save──▶ file
//!                      ▲                     ▲
//!                  metadata             orientation
//!                  (root → TIFF → IPTC)  lookup table
//! ```
//!
//! The one-call entry point is [`combine_files`]: rotate every input to the
//! target orientation, then distribute the results horizontally. Each stage
//! is also exposed on its own, plus a `spawn_`-prefixed background variant
//! that reports exactly once through a [`Task`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Dimensions and orientation from embedded metadata, with the root → TIFF → IPTC fallback chain |
//! | [`orientation`] | The 8 EXIF orientation values and the rotation lookup table |
//! | [`rotate`] | Batch normalization: decode, compare orientations, rotate when needed |
//! | [`combine`] | Horizontal composition onto one canvas |
//! | [`thumbnail`] | Downscaled previews, optionally reusing the embedded EXIF thumbnail |
//! | [`save`] | Encode a buffer to a file at a resolved destination |
//! | [`settings`] | Typed, defaulted option bundles passed into every operation |
//! | [`imaging`] | The platform boundary: `ImageBackend` trait, `image`-crate backend, tag parser |
//! | [`worker`] | One-shot background tasks and the main-thread guard |
//!
//! # Design Decisions
//!
//! ## Typed Settings, No Option Bags
//!
//! Decoder and encoder options are dynamic key/value dictionaries in most
//! imaging stacks. Here they are a typed [`Settings`] struct with named,
//! defaulted fields; the translation to `image`-crate calls happens only at
//! the backend boundary, so no untyped map ever crosses the core logic.
//!
//! ## Rotation Is Only Defined Toward `Up`
//!
//! The rotation table maps all eight current orientations to an angle and
//! mirror flags for `target = Up`. The other seven targets are deliberately
//! an error ([`FilmstripError::UnsupportedTargetOrientation`]), not a silent
//! identity — a no-op there would hand back images that look correct until
//! the first sideways input.
//!
//! ## Backend Seam
//!
//! Every file-touching operation goes through the [`ImageBackend`] trait.
//! Pipeline semantics (ordering, fail-fast, the tolerate-missing-metadata
//! rule) are tested against a mock backend; only [`RustBackend`] knows about
//! codecs.
//!
//! ## Threading Contract
//!
//! Full-image decoding must not run on the latency-sensitive entry thread.
//! [`RustBackend`] enforces that with a runtime check failing fast with
//! [`FilmstripError::CalledFromMainThread`]. The `spawn_` variants run the
//! whole operation on a worker thread and deliver exactly one completion;
//! there is no cancellation and no internal fan-out.

pub mod combine;
pub mod error;
pub mod imaging;
pub mod metadata;
pub mod orientation;
pub mod rotate;
pub mod save;
pub mod settings;
pub mod thumbnail;
pub mod worker;

pub use combine::{
    combine_buffers, combine_files, distribute_horizontally, distribute_rotated,
    spawn_combine_buffers, spawn_combine_files,
};
pub use error::{FilmstripError, Result};
pub use imaging::{Dimensions, ImageBackend, RustBackend};
pub use metadata::ImageProperties;
pub use orientation::{Orientation, RotationParameters, rotation_parameters};
pub use rotate::{RotatedImage, rotate_images, spawn_rotate_images};
pub use save::{save, spawn_save};
pub use settings::{
    CanvasOptions, OutputFormat, PixelLayout, RotationOptions, SaveOptions, Settings,
    ThumbnailOptions,
};
pub use thumbnail::{spawn_thumbnail, thumbnail};
pub use worker::Task;

#[cfg(test)]
pub(crate) mod test_helpers;
