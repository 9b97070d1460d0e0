//! Demo of placement, camera sampling and scene planning
//!
//! This demo shows how to:
//! - Place objects with a minimum separation and inspect saturation
//! - Sample jittered orbit views
//! - Plan a few scenes from a directory of PLY assets

use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use synthcrate_core::Bounds;
use synthcrate_sampling::{place_spaced, CameraPoseSampler, OrbitConfig};
use synthcrate_scene::{discover_assets, PlanWriter, SceneAssembler, SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(2024);

    println!("=== Spaced placement ===\n");
    let bounds = Bounds::cube(-2.0, 2.0)?;
    for count in [5, 20] {
        let result = place_spaced(count, 1.2, bounds, 100, &mut rng);
        println!(
            "   {} objects: {} relaxed, {} candidates drawn",
            count, result.fallback_count, result.total_attempts
        );
    }

    println!("\n=== Orbit views ===\n");
    let views = CameraPoseSampler::sample_views(&OrbitConfig::default(), &mut rng);
    for view in views.iter().take(4) {
        let p = view.pose.position();
        println!(
            "   view {}: angle {:.3} rad, position ({:.2}, {:.2}, {:.2})",
            view.index, view.angle, p.x, p.y, p.z
        );
    }

    println!("\n=== Scene plans ===\n");
    let workdir = std::env::temp_dir().join(format!("synthcrate-scene-demo-{}", std::process::id()));
    let asset_dir = workdir.join("assets");
    fs::create_dir_all(&asset_dir)?;
    for name in ["bowl.ply", "cup.ply", "plate.ply"] {
        fs::write(asset_dir.join(name), "ply\n")?;
    }

    let assets = discover_assets(&asset_dir)?;
    let config = SceneConfig {
        scene_count: 3,
        seed: Some(7),
        ..SceneConfig::default()
    };
    let mut writer = PlanWriter::new();
    let plans = SceneAssembler::new(config)?.run(&assets, &workdir.join("scenes"), &mut writer)?;
    for (plan, path) in plans.iter().zip(writer.written()) {
        println!(
            "   scene {}: {} objects, {} cameras -> {}",
            plan.index,
            plan.objects.len(),
            plan.cameras.len(),
            path.display()
        );
    }

    fs::remove_dir_all(&workdir)?;
    Ok(())
}
