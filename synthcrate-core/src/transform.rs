//! Camera pose transforms

use crate::point::*;
use nalgebra::{Matrix3, Matrix4};
use serde::{Deserialize, Serialize};

/// A rigid camera-to-world transform.
///
/// The rotation block holds the camera's right, up and forward axes as its
/// columns (the camera looks along its local +Z); the translation column is
/// the camera position. Serialized as four row-major rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[[f64; 4]; 4]", from = "[[f64; 4]; 4]")]
pub struct CameraPose {
    pub matrix: Matrix4<f64>,
}

impl CameraPose {
    /// Create an identity pose
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Compose a pose from a rotation basis and a camera position
    pub fn from_rotation_translation(rotation: &Matrix3<f64>, position: &Point3d) -> Self {
        let mut matrix = rotation.to_homogeneous();
        matrix
            .fixed_view_mut::<3, 1>(0, 3)
            .copy_from(&position.coords);
        Self { matrix }
    }

    /// Get the camera position (translation column)
    pub fn position(&self) -> Point3d {
        Point3d::from(self.matrix.fixed_view::<3, 1>(0, 3).into_owned())
    }

    /// Get the 3x3 rotation block
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Camera right axis in world space
    pub fn right(&self) -> Vector3d {
        self.matrix.fixed_view::<3, 1>(0, 0).into_owned()
    }

    /// Camera up axis in world space
    pub fn up(&self) -> Vector3d {
        self.matrix.fixed_view::<3, 1>(0, 1).into_owned()
    }

    /// Camera viewing direction in world space
    pub fn forward(&self) -> Vector3d {
        self.matrix.fixed_view::<3, 1>(0, 2).into_owned()
    }

    /// Check that the rotation block is orthonormal with determinant +1
    pub fn is_rigid(&self, epsilon: f64) -> bool {
        let rotation = self.rotation();
        let gram = rotation.transpose() * rotation;
        (gram - Matrix3::identity()).abs().max() < epsilon
            && (rotation.determinant() - 1.0).abs() < epsilon
    }

    /// The world-to-camera transform
    pub fn inverse(&self) -> Self {
        let rotation_t = self.rotation().transpose();
        let translation = -(rotation_t * self.position().coords);
        let mut matrix = rotation_t.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self { matrix }
    }

    /// Rows of the 4x4 matrix
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(r, c)];
            }
        }
        rows
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for CameraPose {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}

impl From<CameraPose> for [[f64; 4]; 4] {
    fn from(pose: CameraPose) -> Self {
        pose.to_rows()
    }
}

impl From<[[f64; 4]; 4]> for CameraPose {
    fn from(rows: [[f64; 4]; 4]) -> Self {
        Self {
            matrix: Matrix4::from_fn(|r, c| rows[r][c]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Rotation3;

    #[test]
    fn test_translation_column() {
        let rotation = Rotation3::from_euler_angles(0.3, -0.2, 1.1).into_inner();
        let position = Point3d::new(1.0, 2.0, 3.0);
        let pose = CameraPose::from_rotation_translation(&rotation, &position);
        assert_eq!(pose.position(), position);
        assert_relative_eq!(pose.rotation(), rotation);
        assert!(pose.is_rigid(1e-9));
    }

    #[test]
    fn test_inverse_round_trip() {
        let rotation = Rotation3::from_euler_angles(0.1, 0.7, -0.4).into_inner();
        let pose = CameraPose::from_rotation_translation(&rotation, &Point3d::new(-4.0, 0.5, 2.0));
        let product = pose.matrix * pose.inverse().matrix;
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_scaled_matrix_is_not_rigid() {
        let pose = CameraPose::from(Matrix4::new_scaling(2.0));
        assert!(!pose.is_rigid(1e-6));
    }

    #[test]
    fn test_rows_round_trip() {
        let pose = CameraPose::from_rotation_translation(
            &Matrix3::identity(),
            &Point3d::new(5.0, 6.0, 7.0),
        );
        let rows = pose.to_rows();
        assert_eq!(rows[0], [1.0, 0.0, 0.0, 5.0]);
        assert_eq!(rows[2], [0.0, 0.0, 1.0, 7.0]);
        assert_eq!(CameraPose::from(rows), pose);
    }
}
