//! Core data structures and traits for synthcrate
//!
//! This crate provides the fundamental types shared by the mesh converter,
//! the placement and camera samplers, and the scene assembler: colored
//! meshes, placements, camera poses, the error taxonomy and the
//! nearest-neighbor index abstraction.

pub mod point;
pub mod mesh;
pub mod layout;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use layout::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4};

// Type aliases for easier imports
pub type Point = Point3d;
pub type Mesh = ColoredMesh;
