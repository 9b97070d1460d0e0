//! Spaced object placement
//!
//! Objects are placed one at a time. Each candidate position is drawn
//! uniformly inside the bounds and accepted when its nearest already-placed
//! neighbor is at least `min_distance` away. When the attempt budget runs
//! out the last candidate is kept anyway and flagged as relaxed, so a batch
//! never fails because the region is too crowded.

use crate::nearest_neighbor::RTreeIndex;
use crate::rejection::{uniform_between, RejectionSampler};
use rand::Rng;
use serde::{Deserialize, Serialize};
use synthcrate_core::{AxisMode, Bounds, NearestNeighborIndex, Placement, Point3d};

/// Parameters of a spaced placement batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Number of objects to place
    pub count: usize,
    /// Minimum Euclidean distance between any two placements
    pub min_distance: f64,
    /// Sampling region
    pub bounds: Bounds,
    /// Candidates drawn per object before falling back
    pub max_attempts_per_item: usize,
    /// Per-axis sampling mode (x, y, z)
    pub axes: [AxisMode; 3],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            count: 5,
            min_distance: 1.2,
            bounds: Bounds {
                min: Point3d::new(-2.0, -2.0, -2.0),
                max: Point3d::new(2.0, 2.0, 2.0),
            },
            max_attempts_per_item: 100,
            axes: [AxisMode::Free, AxisMode::Free, AxisMode::Fixed(0.0)],
        }
    }
}

impl PlacementConfig {
    /// Floor-plane layout: x and y sampled, z pinned to 0
    pub fn floor(count: usize, min_distance: f64, bounds: Bounds) -> Self {
        Self {
            count,
            min_distance,
            bounds,
            ..Self::default()
        }
    }

    /// Sample all three axes inside the bounds
    pub fn with_free_axes(mut self) -> Self {
        self.axes = [AxisMode::Free; 3];
        self
    }

    pub fn with_max_attempts(mut self, max_attempts_per_item: usize) -> Self {
        self.max_attempts_per_item = max_attempts_per_item;
        self
    }

    /// Draw one candidate position
    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3d {
        let mut position = Point3d::origin();
        for (axis, mode) in self.axes.iter().enumerate() {
            position[axis] = match *mode {
                AxisMode::Fixed(value) => value,
                AxisMode::Free => {
                    let (lo, hi) = self.bounds.axis(axis);
                    uniform_between(rng, lo, hi)
                }
            };
        }
        position
    }
}

/// Placements of one batch together with saturation statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementResult {
    pub placements: Vec<Placement>,
    /// Number of placements accepted without meeting the separation constraint
    pub fallback_count: usize,
    /// Candidates drawn over the whole batch
    pub total_attempts: usize,
}

impl PlacementResult {
    /// Whether any placement had to relax the separation constraint
    pub fn is_saturated(&self) -> bool {
        self.fallback_count > 0
    }

    pub fn positions(&self) -> Vec<Point3d> {
        self.placements.iter().map(|p| p.position).collect()
    }
}

/// Places objects under a minimum-separation constraint
pub struct SpatialPlacer;

impl SpatialPlacer {
    /// Place `config.count` objects using an R*-tree over accepted positions
    pub fn place<R: Rng + ?Sized>(config: &PlacementConfig, rng: &mut R) -> PlacementResult {
        Self::place_with_index(config, RTreeIndex::new(), rng)
    }

    /// Place objects using a caller-provided, initially empty index
    pub fn place_with_index<I, R>(config: &PlacementConfig, mut index: I, rng: &mut R) -> PlacementResult
    where
        I: NearestNeighborIndex,
        R: Rng + ?Sized,
    {
        let min_distance = config.min_distance.max(0.0);
        let min_distance_squared = min_distance * min_distance;
        let sampler = RejectionSampler::new(config.max_attempts_per_item);

        let mut placements = Vec::with_capacity(config.count);
        let mut fallback_count = 0;
        let mut total_attempts = 0;

        for id in 0..config.count {
            let sample = sampler.sample(
                || config.sample_position(rng),
                |candidate| match index.nearest(candidate) {
                    Some(neighbor) => neighbor.distance_squared >= min_distance_squared,
                    None => true,
                },
            );
            total_attempts += sample.attempts;

            let relaxed = !sample.accepted;
            if relaxed {
                fallback_count += 1;
                log::debug!(
                    "placement {} kept after {} rejected candidates",
                    id,
                    sample.attempts
                );
            }

            index.insert(sample.value);
            placements.push(Placement {
                id,
                position: sample.value,
                relaxed,
            });
        }

        if fallback_count > 0 {
            log::warn!(
                "{} of {} placements violate min distance {}; reduce the count, enlarge the bounds or lower the distance",
                fallback_count,
                config.count,
                min_distance
            );
        }

        PlacementResult {
            placements,
            fallback_count,
            total_attempts,
        }
    }
}

/// Convenience wrapper: floor-plane placement of `count` objects
pub fn place_spaced<R: Rng + ?Sized>(
    count: usize,
    min_distance: f64,
    bounds: Bounds,
    max_attempts_per_item: usize,
    rng: &mut R,
) -> PlacementResult {
    let config = PlacementConfig::floor(count, min_distance, bounds)
        .with_max_attempts(max_attempts_per_item);
    SpatialPlacer::place(&config, rng)
}

/// Row-major grid arrangement with per-object jitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub columns: usize,
    pub spacing: f64,
    /// Position of the first cell
    pub origin: Point3d,
    /// Uniform jitter applied independently on each axis
    pub jitter: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            spacing: 2.5,
            origin: Point3d::new(-2.5, -2.5, 0.0),
            jitter: 0.3,
        }
    }
}

/// Lay out `count` objects on a grid, one cell each
pub fn grid_layout<R: Rng + ?Sized>(count: usize, layout: &GridLayout, rng: &mut R) -> Vec<Placement> {
    let columns = layout.columns.max(1);
    let jitter = if layout.jitter.is_finite() { layout.jitter.abs() } else { 0.0 };

    (0..count)
        .map(|id| {
            let row = id / columns;
            let col = id % columns;
            let mut position = Point3d::new(
                layout.origin.x + col as f64 * layout.spacing,
                layout.origin.y + row as f64 * layout.spacing,
                layout.origin.z,
            );
            if jitter > 0.0 {
                for axis in 0..3 {
                    position[axis] += uniform_between(rng, -jitter, jitter);
                }
            }
            Placement {
                id,
                position,
                relaxed: false,
            }
        })
        .collect()
}
