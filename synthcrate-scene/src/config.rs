//! Scene generation configuration
//!
//! Configurations are plain serde structs. Every field has a default, so a
//! JSON file only needs to name the values it changes:
//!
//! ```json
//! { "scene_count": 4, "seed": 7, "camera": { "mode": "sphere", "count": 5, "radius": 8.0 } }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use synthcrate_core::{Error, Point3d, Result};
use synthcrate_sampling::{GridLayout, OrbitConfig, PlacementConfig};

/// How camera poses are generated for a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CameraMode {
    /// Jittered views evenly spread around the scene target
    Orbit(OrbitConfig),
    /// Views uniformly distributed on a sphere around the origin
    Sphere { count: usize, radius: f64 },
}

impl Default for CameraMode {
    fn default() -> Self {
        CameraMode::Orbit(OrbitConfig::default())
    }
}

impl CameraMode {
    pub fn view_count(&self) -> usize {
        match self {
            CameraMode::Orbit(orbit) => orbit.view_count,
            CameraMode::Sphere { count, .. } => *count,
        }
    }
}

/// How objects are positioned in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LayoutMode {
    /// Rejection-sampled positions honoring `SceneConfig::placement`
    Spaced,
    /// Fixed grid cells with jitter
    Grid(GridLayout),
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::Spaced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Sun,
    Point,
}

/// A light handed to the render backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub kind: LightKind,
    pub location: Point3d,
    pub energy: f64,
}

/// Invisible shadow-catching ground plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    pub height: f64,
    /// Half extent along x and y
    pub size: f64,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            height: -3.0,
            size: 15.0,
        }
    }
}

/// Key sun plus fill point light
pub fn default_lights() -> Vec<LightSpec> {
    vec![
        LightSpec {
            kind: LightKind::Sun,
            location: Point3d::new(5.0, -5.0, 5.0),
            energy: 3.0,
        },
        LightSpec {
            kind: LightKind::Point,
            location: Point3d::new(-3.0, 3.0, 3.0),
            energy: 2.0,
        },
    ]
}

/// Top-level configuration of a dataset generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of scenes to plan
    pub scene_count: usize,
    /// Base seed; scene `i` uses `seed + i`. Entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Separation settings for the spaced layout; its `count` is replaced by
    /// the number of assets
    pub placement: PlacementConfig,
    pub camera: CameraMode,
    pub layout: LayoutMode,
    /// Uniform scale applied to every object
    pub object_scale: f64,
    /// Draw a random Euler rotation per object
    pub randomize_rotation: bool,
    pub lights: Vec<LightSpec>,
    pub ground: GroundPlane,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene_count: 10,
            seed: None,
            placement: PlacementConfig::default(),
            camera: CameraMode::default(),
            layout: LayoutMode::default(),
            object_scale: 0.7,
            randomize_rotation: true,
            lights: default_lights(),
            ground: GroundPlane::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::from_input_io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Reject values no scene could be planned with
    pub fn validate(&self) -> Result<()> {
        if !(self.object_scale.is_finite() && self.object_scale > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "object_scale must be positive, got {}",
                self.object_scale
            )));
        }
        if !self.placement.min_distance.is_finite() {
            return Err(Error::InvalidParameter(
                "placement.min_distance must be finite".to_string(),
            ));
        }
        self.placement.bounds.validate()?;

        match &self.camera {
            CameraMode::Sphere { radius, .. } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(Error::InvalidParameter(format!(
                        "sphere camera radius must be positive, got {}",
                        radius
                    )));
                }
            }
            CameraMode::Orbit(orbit) => {
                if !orbit.base_distance.is_finite() || !orbit.base_height.is_finite() {
                    return Err(Error::InvalidParameter(
                        "orbit distance and height must be finite".to_string(),
                    ));
                }
                if !finite_point(&orbit.target) {
                    return Err(Error::InvalidParameter("orbit target must be finite".to_string()));
                }
                check_range("camera.jitter.angle", orbit.jitter.angle)?;
                check_range("camera.jitter.scale", orbit.jitter.scale)?;
                check_range("camera.jitter.look_at", orbit.jitter.look_at)?;
            }
        }

        if let LayoutMode::Grid(grid) = &self.layout {
            if !finite_point(&grid.origin) {
                return Err(Error::InvalidParameter("grid origin must be finite".to_string()));
            }
            check_range("layout.spacing", grid.spacing)?;
            check_range("layout.jitter", grid.jitter)?;
        }
        Ok(())
    }
}

fn finite_point(point: &Point3d) -> bool {
    point.iter().all(|c| c.is_finite())
}

/// `value` must be usable as the half-width of a `±value` interval
fn check_range(name: &str, value: f64) -> Result<()> {
    if (2.0 * value).is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!("{} is out of range: {}", name, value)))
    }
}
