//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// An 8-bit RGB color
pub type Rgb8 = [u8; 3];

/// Color assigned to vertices that carry no color of their own
pub const DEFAULT_VERTEX_COLOR: Rgb8 = [255, 255, 255];

/// A mesh vertex with color information
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredVertex {
    pub position: Point3d,
    pub color: Rgb8,
}

impl ColoredVertex {
    pub fn new(position: Point3d, color: Rgb8) -> Self {
        Self { position, color }
    }
}

impl Default for ColoredVertex {
    fn default() -> Self {
        Self {
            position: Point3d::origin(),
            color: DEFAULT_VERTEX_COLOR,
        }
    }
}

/// Convert a normalized color channel to a byte.
///
/// The channel is scaled by 255, rounded half away from zero and clamped to
/// `[0, 255]`, so `0.5` maps to `128`. NaN maps to `0`.
pub fn channel_to_byte(channel: f64) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert a normalized `[r, g, b]` triple to bytes, see [`channel_to_byte`]
pub fn color_to_bytes(rgb: [f64; 3]) -> Rgb8 {
    [
        channel_to_byte(rgb[0]),
        channel_to_byte(rgb[1]),
        channel_to_byte(rgb[2]),
    ]
}
