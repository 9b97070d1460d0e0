//! # Synthcrate Scene
//!
//! Plans the scenes of a synthetic multi-view dataset and post-processes
//! the segmentation maps a renderer produces for them.
//!
//! Rendering is delegated: [`SceneAssembler`] builds one [`ScenePlan`] per
//! scene (object placements, camera poses, lights) and hands it to a
//! [`RenderBackend`]. The bundled [`PlanWriter`] backend stores plans as
//! JSON for an external renderer to pick up.

pub mod config;
pub mod assets;
pub mod plan;
pub mod segmentation;

pub use config::*;
pub use assets::*;
pub use plan::*;
pub use segmentation::*;
