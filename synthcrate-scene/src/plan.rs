//! Scene assembly
//!
//! A [`ScenePlan`] is everything a renderer needs to produce one scene:
//! which assets go where, the camera poses to render from, lights and the
//! ground plane. Plans are built by [`SceneAssembler`] and handed to a
//! [`RenderBackend`]; rendering itself happens outside this crate.

use crate::assets::Asset;
use crate::config::{CameraMode, GroundPlane, LayoutMode, LightSpec, SceneConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use synthcrate_core::{CameraPose, Error, Placement, Point3d, Result, Vector3d};
use synthcrate_sampling::{grid_layout, sample_sphere_surface, CameraPoseSampler, SpatialPlacer};

/// File name of a serialized plan inside its scene directory
pub const PLAN_FILE_NAME: &str = "plan.json";

/// One asset instance in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub asset: String,
    pub path: PathBuf,
    pub category_id: u16,
    pub position: Point3d,
    /// XYZ Euler angles in radians
    pub rotation_euler: [f64; 3],
    pub scale: f64,
    /// Position did not meet the minimum separation
    pub relaxed: bool,
}

/// Complete description of one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePlan {
    pub index: usize,
    /// Seed the scene was generated with, if any
    pub seed: Option<u64>,
    pub objects: Vec<PlacedObject>,
    pub cameras: Vec<CameraPose>,
    pub lights: Vec<LightSpec>,
    pub ground: GroundPlane,
    /// Objects placed without meeting the minimum separation
    pub fallback_count: usize,
}

impl ScenePlan {
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Read a plan previously written by [`PlanWriter`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::from_input_io(path, e))?;
        Self::from_json_str(&text)
    }
}

/// Consumer of scene plans, e.g. a renderer
pub trait RenderBackend {
    /// Handle one scene; `scene_dir` exists and is owned by this scene
    fn submit(&mut self, plan: &ScenePlan, scene_dir: &Path) -> Result<()>;
}

/// Backend that stores each plan as pretty-printed JSON
#[derive(Debug, Default)]
pub struct PlanWriter {
    written: Vec<PathBuf>,
}

impl PlanWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RenderBackend for PlanWriter {
    fn submit(&mut self, plan: &ScenePlan, scene_dir: &Path) -> Result<()> {
        let path = scene_dir.join(PLAN_FILE_NAME);
        let text = plan.to_json_string()?;
        synthcrate_io::write_atomic(&path, text.as_bytes())?;
        self.written.push(path);
        Ok(())
    }
}

/// Directory of scene `index` below `output_dir`
pub fn scene_dir(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("scene_{:03}", index))
}

/// Builds scene plans from a configuration and an asset list
#[derive(Debug, Clone)]
pub struct SceneAssembler {
    config: SceneConfig,
}

impl SceneAssembler {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Seed used for scene `index`, `None` when entropy-seeded
    pub fn scene_seed(&self, index: usize) -> Option<u64> {
        self.config.seed.map(|seed| seed.wrapping_add(index as u64))
    }

    /// Plan scene `index` from scratch.
    ///
    /// Nothing carries over from earlier scenes: the random source, the
    /// placement index and the camera set are all created for this call.
    pub fn plan_scene(&self, index: usize, assets: &[Asset]) -> Result<ScenePlan> {
        let seed = self.scene_seed(index);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (placements, fallback_count) = self.layout(assets.len(), &mut rng);
        let objects = assets
            .iter()
            .zip(placements)
            .map(|(asset, placement)| PlacedObject {
                asset: asset.name.clone(),
                path: asset.path.clone(),
                category_id: asset.category_id,
                position: placement.position,
                rotation_euler: self.rotation(&mut rng),
                scale: self.config.object_scale,
                relaxed: placement.relaxed,
            })
            .collect();

        let cameras = match &self.config.camera {
            CameraMode::Orbit(orbit) => CameraPoseSampler::sample(orbit, &mut rng),
            CameraMode::Sphere { count, radius } => {
                sample_sphere_surface(*count, &Point3d::origin(), *radius, &Vector3d::z(), &mut rng)
            }
        };

        Ok(ScenePlan {
            index,
            seed,
            objects,
            cameras,
            lights: self.config.lights.clone(),
            ground: self.config.ground.clone(),
            fallback_count,
        })
    }

    /// Plan every configured scene and submit it to `backend`
    pub fn run<B: RenderBackend + ?Sized>(
        &self,
        assets: &[Asset],
        output_dir: &Path,
        backend: &mut B,
    ) -> Result<Vec<ScenePlan>> {
        if assets.is_empty() {
            return Err(Error::InvalidParameter("no assets to place".to_string()));
        }

        let mut plans = Vec::with_capacity(self.config.scene_count);
        for index in 0..self.config.scene_count {
            let plan = self.plan_scene(index, assets)?;
            let dir = scene_dir(output_dir, index);
            fs::create_dir_all(&dir)?;
            backend.submit(&plan, &dir)?;

            log::info!(
                "scene {}: {} objects, {} cameras -> {}",
                index,
                plan.objects.len(),
                plan.cameras.len(),
                dir.display()
            );
            plans.push(plan);
        }
        Ok(plans)
    }

    fn layout(&self, count: usize, rng: &mut StdRng) -> (Vec<Placement>, usize) {
        match &self.config.layout {
            LayoutMode::Spaced => {
                let mut placement = self.config.placement.clone();
                placement.count = count;
                let result = SpatialPlacer::place(&placement, rng);
                (result.placements, result.fallback_count)
            }
            LayoutMode::Grid(grid) => (grid_layout(count, grid, rng), 0),
        }
    }

    fn rotation(&self, rng: &mut StdRng) -> [f64; 3] {
        if self.config.randomize_rotation {
            [rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU)]
        } else {
            [0.0; 3]
        }
    }
}
