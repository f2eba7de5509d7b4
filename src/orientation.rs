//! EXIF-style orientation values and the rotation lookup table.
//!
//! An orientation code (1-8) describes how a file's stored pixel rows relate
//! to the captured scene. Normalizing an image means computing the rotation
//! angle and mirror flags that bring its current orientation to a target
//! orientation, then applying them to the pixel buffer.
//!
//! The table is defined only for `target = Up`: images are always normalized
//! upright before any further rotation is supported. Other targets fail with
//! [`FilmstripError::UnsupportedTargetOrientation`] rather than silently
//! returning identity parameters.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FilmstripError, Result};

/// The eight EXIF orientation values, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Code 1: row 0 at the top, column 0 on the left.
    Up,
    /// Code 2: `Up` flipped along the vertical axis.
    UpMirrored,
    /// Code 3: rotated 180 degrees.
    Down,
    /// Code 4: `Down` flipped along the vertical axis.
    DownMirrored,
    /// Code 5: row 0 on the left, mirrored.
    LeftMirrored,
    /// Code 6: row 0 on the right (stored 90 degrees counter-clockwise).
    Right,
    /// Code 7: row 0 on the right, mirrored.
    RightMirrored,
    /// Code 8: row 0 on the left (stored 90 degrees clockwise).
    Left,
}

impl Orientation {
    /// All orientations in EXIF code order (1 through 8).
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// Parse a raw EXIF orientation code. Codes outside 1-8 (including the
    /// 0 some writers emit) are treated as no orientation at all.
    pub fn from_exif(code: u16) -> Option<Self> {
        match code {
            1 => Some(Orientation::Up),
            2 => Some(Orientation::UpMirrored),
            3 => Some(Orientation::Down),
            4 => Some(Orientation::DownMirrored),
            5 => Some(Orientation::LeftMirrored),
            6 => Some(Orientation::Right),
            7 => Some(Orientation::RightMirrored),
            8 => Some(Orientation::Left),
            _ => None,
        }
    }

    /// The raw EXIF code for this orientation.
    pub fn exif_code(self) -> u16 {
        match self {
            Orientation::Up => 1,
            Orientation::UpMirrored => 2,
            Orientation::Down => 3,
            Orientation::DownMirrored => 4,
            Orientation::LeftMirrored => 5,
            Orientation::Right => 6,
            Orientation::RightMirrored => 7,
            Orientation::Left => 8,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Up => "Up",
            Orientation::UpMirrored => "UpMirrored",
            Orientation::Down => "Down",
            Orientation::DownMirrored => "DownMirrored",
            Orientation::LeftMirrored => "LeftMirrored",
            Orientation::Right => "Right",
            Orientation::RightMirrored => "RightMirrored",
            Orientation::Left => "Left",
        };
        write!(f, "{} ({})", name, self.exif_code())
    }
}

/// Rotation angle plus mirror flags that bring an image from one orientation
/// to another.
///
/// Angles are radians: `PI` is 180 degrees, `FRAC_PI_2` is 90. A negative
/// angle is a clockwise quarter turn. The flips act in the source frame —
/// they are applied before the rotation, matching the order in which the
/// transforms concatenate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParameters {
    pub angle: f32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl RotationParameters {
    /// Parameters that leave an image untouched.
    pub fn identity() -> Self {
        RotationParameters {
            angle: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
        }
    }

    /// True when applying these parameters would not move a pixel.
    pub fn is_identity(self) -> bool {
        self.angle == 0.0 && !self.flip_horizontal && !self.flip_vertical
    }
}

/// Compute the rotation parameters that bring `current` to `target`.
///
/// Only `target = Up` is implemented; every other target fails with
/// [`FilmstripError::UnsupportedTargetOrientation`].
pub fn rotation_parameters(current: Orientation, target: Orientation) -> Result<RotationParameters> {
    match target {
        Orientation::Up => Ok(parameters_toward_up(current)),
        other => Err(FilmstripError::UnsupportedTargetOrientation(other)),
    }
}

/// The lookup table for `target = Up`.
fn parameters_toward_up(current: Orientation) -> RotationParameters {
    let (angle, flip_horizontal, flip_vertical) = match current {
        Orientation::Up => (0.0, false, false),
        Orientation::UpMirrored => (0.0, true, false),
        Orientation::Down => (PI, false, false),
        Orientation::DownMirrored => (PI, true, false),
        Orientation::LeftMirrored => (-FRAC_PI_2, false, true),
        Orientation::Right => (-FRAC_PI_2, false, false),
        Orientation::RightMirrored => (FRAC_PI_2, false, true),
        Orientation::Left => (FRAC_PI_2, false, false),
    };
    RotationParameters {
        angle,
        flip_horizontal,
        flip_vertical,
    }
}
