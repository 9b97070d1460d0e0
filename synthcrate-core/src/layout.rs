//! Placement data structures: sampling bounds and placed positions

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned sampling region, a closed interval per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Corners")]
pub struct Bounds {
    pub min: Point3d,
    pub max: Point3d,
}

/// Unchecked form of [`Bounds`] as it appears in serialized configs
#[derive(Deserialize)]
struct Corners {
    min: Point3d,
    max: Point3d,
}

impl TryFrom<Corners> for Bounds {
    type Error = Error;

    fn try_from(corners: Corners) -> Result<Self> {
        Bounds::new(corners.min, corners.max)
    }
}

impl Bounds {
    /// Create bounds from two corners, rejecting inverted or non-finite intervals
    pub fn new(min: Point3d, max: Point3d) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check every axis interval; needed after editing the public fields
    pub fn validate(&self) -> Result<()> {
        for axis in 0..3 {
            let (lo, hi) = self.axis(axis);
            if !lo.is_finite() || !hi.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "bounds on axis {} must be finite",
                    axis
                )));
            }
            if lo > hi {
                return Err(Error::InvalidParameter(format!(
                    "bounds on axis {} are inverted: {} > {}",
                    axis, lo, hi
                )));
            }
            if !(hi - lo).is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "bounds on axis {} are too wide: {} to {}",
                    axis, lo, hi
                )));
            }
        }
        Ok(())
    }

    /// The same `[lo, hi]` interval on every axis
    pub fn cube(lo: f64, hi: f64) -> Result<Self> {
        Self::new(Point3d::new(lo, lo, lo), Point3d::new(hi, hi, hi))
    }

    /// Get the interval of one axis
    pub fn axis(&self, axis: usize) -> (f64, f64) {
        (self.min[axis], self.max[axis])
    }

    /// Check whether a point lies inside the closed bounds
    pub fn contains(&self, point: &Point3d) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Get the center of the bounds
    pub fn center(&self) -> Point3d {
        nalgebra::center(&self.min, &self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Point3d::new(-1.0, -1.0, -1.0),
            max: Point3d::new(1.0, 1.0, 1.0),
        }
    }
}

/// How a coordinate axis is treated when sampling a position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    /// Sample uniformly inside the bounds interval
    Free,
    /// Pin the axis to a constant value (e.g. a ground plane)
    Fixed(f64),
}

impl Default for AxisMode {
    fn default() -> Self {
        AxisMode::Free
    }
}

/// A position assigned to one object of a placement batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Identity of the placed object, its index in the batch
    pub id: usize,
    pub position: Point3d,
    /// Set when the attempt budget ran out and the separation constraint
    /// was not met for this object
    pub relaxed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bounds() {
        let bounds = Bounds::cube(-2.0, 2.0).unwrap();
        assert_eq!(bounds.axis(1), (-2.0, 2.0));
        assert!(bounds.contains(&Point3d::new(2.0, -2.0, 0.0)));
        assert!(!bounds.contains(&Point3d::new(2.1, 0.0, 0.0)));
        assert_eq!(bounds.center(), Point3d::origin());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = Bounds::new(Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 1.0));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        assert!(Bounds::cube(f64::NEG_INFINITY, 1.0).is_err());
        assert!(Bounds::cube(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_degenerate_interval_allowed() {
        let bounds = Bounds::cube(3.0, 3.0).unwrap();
        assert!(bounds.contains(&Point3d::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_overflowing_span_rejected() {
        let result = Bounds::cube(-1e308, 1e308);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
        assert!(Bounds::cube(-1e307, 1e307).is_ok());
    }

    #[test]
    fn test_deserialize_validates_corners() {
        let bounds: Bounds = serde_json::from_str(r#"{"min":[-2,-2,0],"max":[2,2,0]}"#).unwrap();
        assert_eq!(bounds.max, Point3d::new(2.0, 2.0, 0.0));

        let inverted = serde_json::from_str::<Bounds>(r#"{"min":[2,2,0],"max":[-2,-2,0]}"#);
        let message = inverted.unwrap_err().to_string();
        assert!(message.contains("inverted"), "{}", message);

        let wide = serde_json::from_str::<Bounds>(r#"{"min":[-1e308,0,0],"max":[1e308,0,0]}"#);
        assert!(wide.is_err());
    }

    #[test]
    fn test_validate_after_field_edit() {
        let mut bounds = Bounds::default();
        assert!(bounds.validate().is_ok());
        bounds.min.x = 5.0;
        assert!(bounds.validate().is_err());
    }
}
