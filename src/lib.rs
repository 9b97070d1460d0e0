//! # synthcrate
//!
//! Building blocks for synthetic multi-view dataset generation.
//!
//! This is the umbrella crate that provides convenient access to all synthcrate
//! functionality. Use it to get everything in one place, or depend on the
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: colored meshes, placements, camera poses and the error type
//! - **I/O**: vertex-colored OBJ to ASCII PLY conversion, single file or batch
//! - **Sampling**: spaced object placement and orbit camera pose sampling
//! - **Scene**: scene planning and segmentation map post-processing
//!
//! ## Quick Start
//!
//! ```rust
//! use synthcrate::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> synthcrate::Result<()> {
//! // Convert a vertex-colored OBJ to PLY text
//! let obj = "v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n";
//! let (mesh, ply) = convert_str(obj, &ConvertOptions::default())?;
//! assert_eq!(mesh.face_count(), 1);
//! assert!(ply.starts_with("ply\n"));
//!
//! // Place five objects at least 1.2 apart and sample orbit views around them
//! let mut rng = StdRng::seed_from_u64(42);
//! let placed = place_spaced(5, 1.2, Bounds::cube(-2.0, 2.0)?, 100, &mut rng);
//! assert_eq!(placed.placements.len(), 5);
//!
//! let poses = CameraPoseSampler::sample(&OrbitConfig::default(), &mut rng);
//! assert!(poses.iter().all(|pose| pose.is_rigid(1e-6)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io, sampling and scene
//! - `io`: OBJ/PLY conversion
//! - `sampling`: placement and camera sampling
//! - `scene`: scene planning, implies `io` and `sampling`
//! - `all`: Enables all features

// Re-export core functionality
pub use synthcrate_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use synthcrate_io as io;

#[cfg(feature = "sampling")]
pub use synthcrate_sampling as sampling;

#[cfg(feature = "scene")]
pub use synthcrate_scene as scene;

/// Convenient imports for common use cases
pub mod prelude {
    pub use synthcrate_core::*;

    #[cfg(feature = "io")]
    pub use synthcrate_io::*;

    #[cfg(feature = "sampling")]
    pub use synthcrate_sampling::*;

    #[cfg(feature = "scene")]
    pub use synthcrate_scene::*;
}
