//! Core traits for synthcrate

use crate::{mesh::*, point::*};

/// Result of a nearest-neighbor query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion index of the closest stored point
    pub index: usize,
    /// Squared Euclidean distance to the query
    pub distance_squared: f64,
}

impl Neighbor {
    /// Euclidean distance to the query
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// Trait for incrementally built nearest neighbor indices
pub trait NearestNeighborIndex {
    /// Add a point; it receives the next insertion index
    fn insert(&mut self, point: Point3d);

    /// Find the stored point closest to `query`, `None` when empty
    fn nearest(&self, query: &Point3d) -> Option<Neighbor>;

    /// Number of stored points
    fn len(&self) -> usize;

    /// Check if the index holds no points
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for objects with spatial extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

impl Drawable for ColoredMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        let vertices = self.vertices();
        let Some(first) = vertices.first() else {
            return (Point3d::origin(), Point3d::origin());
        };

        let mut min = first.position;
        let mut max = first.position;

        for vertex in vertices {
            let p = vertex.position;
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_bounding_box() {
        let vertices = vec![
            ColoredVertex::new(Point3d::new(-1.0, 0.0, 2.0), [0, 0, 0]),
            ColoredVertex::new(Point3d::new(3.0, -2.0, 0.0), [0, 0, 0]),
            ColoredVertex::new(Point3d::new(0.0, 1.0, 1.0), [0, 0, 0]),
        ];
        let mesh = ColoredMesh::new(vertices, vec![vec![0, 1, 2]]).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, Point3d::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3d::new(3.0, 1.0, 2.0));
        assert_eq!(mesh.center(), Point3d::new(1.0, -0.5, 1.0));
    }

    #[test]
    fn test_empty_mesh_bounding_box() {
        let (min, max) = ColoredMesh::empty().bounding_box();
        assert_eq!(min, Point3d::origin());
        assert_eq!(max, Point3d::origin());
    }

    #[test]
    fn test_neighbor_distance() {
        let neighbor = Neighbor { index: 0, distance_squared: 9.0 };
        assert_eq!(neighbor.distance(), 3.0);
    }
}
