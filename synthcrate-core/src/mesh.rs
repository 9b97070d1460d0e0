//! Mesh data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use serde::Serialize;

/// A polygon face as an ordered list of 0-based vertex indices
pub type Face = Vec<usize>;

/// Minimum number of vertices a face must reference
pub const MIN_FACE_VERTICES: usize = 3;

/// A polygon mesh with per-vertex colors.
///
/// Every face holds at least three indices and every index is smaller than
/// the vertex count. The mesh is immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoredMesh {
    vertices: Vec<ColoredVertex>,
    faces: Vec<Face>,
}

impl ColoredMesh {
    /// Create a new empty mesh
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces, validating the face indices
    pub fn new(vertices: Vec<ColoredVertex>, faces: Vec<Face>) -> Result<Self> {
        for (face_index, face) in faces.iter().enumerate() {
            validate_face(face, vertices.len()).map_err(|message| {
                Error::InvalidParameter(format!("face {}: {}", face_index, message))
            })?;
        }
        Ok(Self { vertices, faces })
    }

    /// Get the vertices
    pub fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }

    /// Get the faces
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Check whether every face is a triangle
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|face| face.len() == 3)
    }

    /// Consume the mesh, returning its vertices and faces
    pub fn into_parts(self) -> (Vec<ColoredVertex>, Vec<Face>) {
        (self.vertices, self.faces)
    }
}

impl Default for ColoredMesh {
    fn default() -> Self {
        Self::empty()
    }
}

/// Check a single face against the vertex count, describing the first problem found
pub fn validate_face(face: &[usize], vertex_count: usize) -> std::result::Result<(), String> {
    if face.len() < MIN_FACE_VERTICES {
        return Err(format!(
            "face needs at least {} vertices, got {}",
            MIN_FACE_VERTICES,
            face.len()
        ));
    }
    if let Some(&index) = face.iter().find(|&&index| index >= vertex_count) {
        return Err(format!(
            "vertex index {} out of range for {} vertices",
            index, vertex_count
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_vertices() -> Vec<ColoredVertex> {
        vec![
            ColoredVertex::new(Point3d::new(0.0, 0.0, 0.0), [255, 0, 0]),
            ColoredVertex::new(Point3d::new(1.0, 0.0, 0.0), [0, 255, 0]),
            ColoredVertex::new(Point3d::new(0.0, 1.0, 0.0), [0, 0, 255]),
        ]
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = ColoredMesh::new(triangle_vertices(), vec![vec![0, 1, 2]]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.is_triangulated());
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_out_of_range_face_rejected() {
        let result = ColoredMesh::new(triangle_vertices(), vec![vec![0, 1, 3]]);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_short_face_rejected() {
        let result = ColoredMesh::new(triangle_vertices(), vec![vec![0, 1]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_polygon_faces_allowed() {
        let mut vertices = triangle_vertices();
        vertices.push(ColoredVertex::new(Point3d::new(1.0, 1.0, 0.0), [9, 9, 9]));
        let mesh = ColoredMesh::new(vertices, vec![vec![0, 1, 3, 2]]).unwrap();
        assert!(!mesh.is_triangulated());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = ColoredMesh::default();
        assert!(mesh.is_empty());
        let (vertices, faces) = mesh.into_parts();
        assert!(vertices.is_empty() && faces.is_empty());
    }
}
