//! Multi-view camera pose sampling
//!
//! Views are spread evenly around a vertical axis through the scene target
//! and perturbed by independent angle, distance, height and framing jitter.

use nalgebra::Matrix3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use crate::rejection::uniform_between;
use synthcrate_core::{CameraPose, Point3d, Vector3d};

const PARALLEL_EPSILON: f64 = 1e-9;

/// Random perturbations applied to each orbit view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitJitter {
    /// Maximum angular offset in radians, uniform in `±angle`
    pub angle: f64,
    /// Relative scale jitter, distance and height are multiplied by `U[1-scale, 1+scale]`
    pub scale: f64,
    /// Maximum per-axis offset of the look target from the orbit target
    pub look_at: f64,
}

impl OrbitJitter {
    pub fn none() -> Self {
        Self {
            angle: 0.0,
            scale: 0.0,
            look_at: 0.0,
        }
    }
}

impl Default for OrbitJitter {
    fn default() -> Self {
        Self {
            angle: 0.2,
            scale: 0.1,
            look_at: 0.1,
        }
    }
}

/// Parameters of an orbit around the scene target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub view_count: usize,
    /// Horizontal distance from the vertical axis through `target`
    pub base_distance: f64,
    /// Height above `target` along `up`
    pub base_height: f64,
    pub target: Point3d,
    /// World up direction, also the orbit axis
    pub up: Vector3d,
    pub jitter: OrbitJitter,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            view_count: 10,
            base_distance: 7.0,
            base_height: 3.0,
            target: Point3d::origin(),
            up: Vector3d::z(),
            jitter: OrbitJitter::default(),
        }
    }
}

/// One sampled orbit view with the parameters that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitView {
    pub index: usize,
    /// Angle around the orbit axis in radians
    pub angle: f64,
    pub distance: f64,
    pub height: f64,
    pub look_target: Point3d,
    pub pose: CameraPose,
    /// Set when the look-at basis needed its fallback reference axis
    pub degenerate: bool,
}

/// A look-at pose and whether it had to use the fallback reference axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub pose: CameraPose,
    pub degenerate: bool,
}

/// Base angle of view `index` out of `count`, evenly spaced over a full turn
pub fn base_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    TAU * index as f64 / count as f64
}

/// Build a camera-to-world pose at `position` looking at `look_target`.
///
/// forward = normalize(look_target - position), right = normalize(up × forward),
/// up' = forward × right. When forward is parallel to `world_up` the world X
/// axis (or Y, if `world_up` lies along X) stands in for `world_up`. When the
/// camera sits on its target, forward is taken as `-world_up`.
pub fn look_at(position: &Point3d, look_target: &Point3d, world_up: &Vector3d) -> LookAt {
    let world_up = normalized_up(world_up);
    let mut degenerate = false;

    let forward = match (look_target - position).try_normalize(PARALLEL_EPSILON) {
        Some(forward) => forward,
        None => {
            degenerate = true;
            -world_up
        }
    };

    let right = match world_up.cross(&forward).try_normalize(PARALLEL_EPSILON) {
        Some(right) => right,
        None => {
            degenerate = true;
            let reference = fallback_reference(&world_up);
            // forward is parallel to world_up here, so the reference is never parallel to it
            reference.cross(&forward).normalize()
        }
    };
    let up = forward.cross(&right);

    if degenerate {
        log::debug!(
            "look-at from {:?} to {:?} is parallel to world up, using fallback axis",
            position,
            look_target
        );
    }

    let rotation = Matrix3::from_columns(&[right, up, forward]);
    LookAt {
        pose: CameraPose::from_rotation_translation(&rotation, position),
        degenerate,
    }
}

/// Samples camera poses orbiting a scene target
pub struct CameraPoseSampler;

impl CameraPoseSampler {
    /// Sample `config.view_count` camera-to-world poses
    pub fn sample<R: Rng + ?Sized>(config: &OrbitConfig, rng: &mut R) -> Vec<CameraPose> {
        Self::sample_views(config, rng)
            .into_iter()
            .map(|view| view.pose)
            .collect()
    }

    /// Sample views, keeping the angle, distance and height of each
    pub fn sample_views<R: Rng + ?Sized>(config: &OrbitConfig, rng: &mut R) -> Vec<OrbitView> {
        let (axis_a, axis_b, up) = orbit_frame(&config.up);
        let jitter = config.jitter;
        let scale = jitter.scale.abs().min(1.0);

        (0..config.view_count)
            .map(|index| {
                let angle = base_angle(index, config.view_count) + symmetric(rng, jitter.angle);
                let distance = config.base_distance * scale_factor(rng, scale);
                let height = config.base_height * scale_factor(rng, scale);

                let position = config.target
                    + axis_a * (distance * angle.cos())
                    + axis_b * (distance * angle.sin())
                    + up * height;

                let look_target = config.target
                    + Vector3d::new(
                        symmetric(rng, jitter.look_at),
                        symmetric(rng, jitter.look_at),
                        symmetric(rng, jitter.look_at),
                    );

                let LookAt { pose, degenerate } = look_at(&position, &look_target, &up);
                OrbitView {
                    index,
                    angle,
                    distance,
                    height,
                    look_target,
                    pose,
                    degenerate,
                }
            })
            .collect()
    }
}

/// Sample `count` poses uniformly on a sphere surface, each looking at the center
pub fn sample_sphere_surface<R: Rng + ?Sized>(
    count: usize,
    center: &Point3d,
    radius: f64,
    world_up: &Vector3d,
    rng: &mut R,
) -> Vec<CameraPose> {
    (0..count)
        .map(|_| {
            let z: f64 = rng.gen_range(-1.0..=1.0);
            let phi: f64 = rng.gen_range(0.0..TAU);
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let direction = Vector3d::new(ring * phi.cos(), ring * phi.sin(), z);
            let position = center + direction * radius;
            look_at(&position, center, world_up).pose
        })
        .collect()
}

/// Orthonormal frame `(a, b, up)` with `a`, `b` spanning the orbit plane.
/// For `up = +Z` this is exactly `(X, Y, Z)`.
fn orbit_frame(up: &Vector3d) -> (Vector3d, Vector3d, Vector3d) {
    let up = normalized_up(up);
    let helper = if up.x.abs() < 0.9 { Vector3d::x() } else { Vector3d::y() };
    let a = (helper - up * up.dot(&helper)).normalize();
    let b = up.cross(&a);
    (a, b, up)
}

fn normalized_up(up: &Vector3d) -> Vector3d {
    up.try_normalize(PARALLEL_EPSILON).unwrap_or_else(Vector3d::z)
}

fn fallback_reference(world_up: &Vector3d) -> Vector3d {
    if world_up.x.abs() < 0.9 {
        Vector3d::x()
    } else {
        Vector3d::y()
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, amount: f64) -> f64 {
    let amount = amount.abs();
    if amount > 0.0 && amount.is_finite() {
        uniform_between(rng, -amount, amount)
    } else {
        0.0
    }
}

fn scale_factor<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    if scale > 0.0 {
        uniform_between(rng, 1.0 - scale, 1.0 + scale)
    } else {
        1.0
    }
}
