//! Nearest neighbor index implementations

use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};
use synthcrate_core::{NearestNeighborIndex, Neighbor, Point3d};

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// R*-tree backed index, updated in place on every insertion.
///
/// Each query is logarithmic in the number of stored points.
pub struct RTreeIndex {
    tree: RTree<IndexedPoint>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }
}

impl Default for RTreeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl NearestNeighborIndex for RTreeIndex {
    fn insert(&mut self, point: Point3d) {
        let index = self.tree.size();
        self.tree.insert(IndexedPoint::new([point.x, point.y, point.z], index));
    }

    fn nearest(&self, query: &Point3d) -> Option<Neighbor> {
        let query = [query.x, query.y, query.z];
        self.tree.nearest_neighbor(&query).map(|entry| Neighbor {
            index: entry.data,
            distance_squared: entry.distance_2(&query),
        })
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

/// Simple brute force index for small datasets.
///
/// Every query scans all stored points, so filling it with `n` points and
/// querying after each insertion costs O(n²) overall. Fine for tens of items.
#[derive(Debug, Default)]
pub struct LinearIndex {
    points: Vec<Point3d>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }
}

impl NearestNeighborIndex for LinearIndex {
    fn insert(&mut self, point: Point3d) {
        self.points.push(point);
    }

    fn nearest(&self, query: &Point3d) -> Option<Neighbor> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| Neighbor {
                index,
                distance_squared: squared_distance(point, query),
            })
            .min_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared))
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Squared Euclidean distance, summed in x, y, z order
pub fn squared_distance(a: &Point3d, b: &Point3d) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}
