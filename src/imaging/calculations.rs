//! Pure geometry for rotation and horizontal layout.
//!
//! No pixels move here. These functions only compute sizes and offsets, so
//! they are unit testable without allocating an image buffer.

use crate::error::{FilmstripError, Result};
use crate::imaging::backend::Dimensions;

/// Size of the bounding box after rotating `size` by `angle` radians.
///
/// Both results are floored: for quarter turns the trig lands a hair above
/// the exact integer, and without the floor the destination would
/// over-allocate by a row or column.
pub fn rotated_size(angle: f32, size: Dimensions) -> Dimensions {
    let (sin, cos) = angle.sin_cos();
    let (sin, cos) = (f64::from(sin).abs(), f64::from(cos).abs());
    let width = f64::from(size.width);
    let height = f64::from(size.height);
    Dimensions {
        width: (width * cos + height * sin).floor() as u32,
        height: (width * sin + height * cos).floor() as u32,
    }
}

/// Canvas size and per-image x origins for a left-to-right strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizontalLayout {
    /// Sum of all widths by the tallest input.
    pub canvas: Dimensions,
    /// X origin of each image, in input order. Y is always 0: shorter images
    /// stay top-aligned against a taller canvas.
    pub x_offsets: Vec<u32>,
}

/// Compute the layout for composing `sizes` horizontally.
///
/// Fails with [`FilmstripError::InvalidHeight`] when the tallest input has
/// height 0, and with [`FilmstripError::CannotCreateCanvas`] when the summed
/// width does not fit the canvas coordinate space.
pub fn horizontal_layout(sizes: &[Dimensions]) -> Result<HorizontalLayout> {
    let total_width: u64 = sizes.iter().map(|size| u64::from(size.width)).sum();
    let height = sizes.iter().map(|size| size.height).max().unwrap_or(0);

    if height == 0 {
        return Err(FilmstripError::InvalidHeight);
    }
    if total_width > u64::from(u32::MAX) {
        return Err(FilmstripError::CannotCreateCanvas {
            width: total_width,
            height: u64::from(height),
        });
    }

    let mut next_x = 0u32;
    let x_offsets = sizes
        .iter()
        .map(|size| {
            let x = next_x;
            next_x += size.width;
            x
        })
        .collect();

    Ok(HorizontalLayout {
        canvas: Dimensions {
            width: total_width as u32,
            height,
        },
        x_offsets,
    })
}
