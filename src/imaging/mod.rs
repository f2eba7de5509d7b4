//! Image processing — the platform boundary and its pure helpers.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, TIFF, WebP) | `image` crate |
//! | **Root orientation** | `kamadak-exif` |
//! | **TIFF/IPTC tags, embedded thumbnail** | custom parser (`exif_parser`) |
//! | **Downscale** | `image::imageops` Lanczos3 |
//! | **Encode** | `image::DynamicImage::write_to` |
//!
//! The module is split into:
//! - **Calculations**: pure size and offset math (unit testable)
//! - **Backend**: the [`ImageBackend`] trait + [`RustBackend`]
//! - **Parser**: minimal EXIF/TIFF/IPTC tag walker

pub mod backend;
pub mod calculations;
pub(crate) mod exif_parser;
pub mod rust_backend;

pub use backend::{Dimensions, ImageBackend};
pub use rust_backend::RustBackend;
