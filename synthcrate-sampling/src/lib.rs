//! # Synthcrate Sampling
//!
//! Procedural sampling for scene generation: spaced object placement by
//! bounded rejection sampling over a nearest-neighbor index, grid layouts,
//! and multi-view camera pose sampling.
//!
//! Every entry point takes the random source explicitly and keeps no state
//! between calls, so each scene-generation pass starts fresh.

pub mod nearest_neighbor;
pub mod rejection;
pub mod placement;
pub mod camera;

// Re-export commonly used items
pub use nearest_neighbor::*;
pub use rejection::*;
pub use placement::*;
pub use camera::*;
