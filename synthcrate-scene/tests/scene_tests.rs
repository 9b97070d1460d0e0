//! End-to-end scene planning tests

use std::fs;
use std::path::{Path, PathBuf};
use synthcrate_core::{Error, Result};
use synthcrate_scene::*;

fn asset_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        fs::write(dir.path().join(name), "ply\n").unwrap();
    }
    dir
}

/// Records submissions instead of rendering
#[derive(Default)]
struct RecordingBackend {
    submitted: Vec<(usize, PathBuf)>,
}

impl RenderBackend for RecordingBackend {
    fn submit(&mut self, plan: &ScenePlan, scene_dir: &Path) -> Result<()> {
        assert!(scene_dir.is_dir());
        self.submitted.push((plan.index, scene_dir.to_path_buf()));
        Ok(())
    }
}

struct FailingBackend;

impl RenderBackend for FailingBackend {
    fn submit(&mut self, plan: &ScenePlan, _scene_dir: &Path) -> Result<()> {
        if plan.index == 1 {
            Err(Error::InvalidParameter("renderer unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_plan_writer_writes_one_plan_per_scene() {
    let assets_dir = asset_dir(&["bowl.ply", "cup.ply", "plate.PLY"]);
    let output = tempfile::tempdir().unwrap();

    let assets = discover_assets(assets_dir.path()).unwrap();
    let config = SceneConfig {
        scene_count: 3,
        seed: Some(100),
        ..SceneConfig::default()
    };
    let assembler = SceneAssembler::new(config).unwrap();
    let mut writer = PlanWriter::new();
    let plans = assembler.run(&assets, output.path(), &mut writer).unwrap();

    assert_eq!(plans.len(), 3);
    assert_eq!(writer.written().len(), 3);
    for (index, plan) in plans.iter().enumerate() {
        let path = output.path().join(format!("scene_{:03}", index)).join(PLAN_FILE_NAME);
        assert!(path.is_file());
        let loaded = ScenePlan::from_file(&path).unwrap();
        assert_eq!(loaded.index, index);
        assert_eq!(loaded.seed, Some(100 + index as u64));
        assert_eq!(loaded.objects.len(), 3);
        assert_eq!(loaded.cameras.len(), plan.cameras.len());
        let names: Vec<_> = loaded.objects.iter().map(|o| o.asset.as_str()).collect();
        assert_eq!(names, vec!["bowl", "cup", "plate"]);
    }
}

#[test]
fn test_rerun_with_same_seed_is_identical() {
    let assets_dir = asset_dir(&["a.ply", "b.ply"]);
    let assets = discover_assets(assets_dir.path()).unwrap();
    let config = SceneConfig {
        scene_count: 2,
        seed: Some(3),
        ..SceneConfig::default()
    };
    let assembler = SceneAssembler::new(config).unwrap();

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    assembler.run(&assets, first.path(), &mut PlanWriter::new()).unwrap();
    assembler.run(&assets, second.path(), &mut PlanWriter::new()).unwrap();

    for index in 0..2 {
        let name = format!("scene_{:03}/{}", index, PLAN_FILE_NAME);
        assert_eq!(
            fs::read(first.path().join(&name)).unwrap(),
            fs::read(second.path().join(&name)).unwrap()
        );
    }
}

#[test]
fn test_custom_backend_sees_every_scene() {
    let assets_dir = asset_dir(&["only.ply"]);
    let output = tempfile::tempdir().unwrap();
    let assets = discover_assets(assets_dir.path()).unwrap();

    let config = SceneConfig {
        scene_count: 4,
        seed: Some(1),
        ..SceneConfig::default()
    };
    let mut backend = RecordingBackend::default();
    SceneAssembler::new(config)
        .unwrap()
        .run(&assets, output.path(), &mut backend)
        .unwrap();

    let indices: Vec<_> = backend.submitted.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(backend.submitted[3].1.ends_with("scene_003"));
}

#[test]
fn test_backend_failure_stops_the_run() {
    let assets_dir = asset_dir(&["only.ply"]);
    let output = tempfile::tempdir().unwrap();
    let assets = discover_assets(assets_dir.path()).unwrap();

    let assembler = SceneAssembler::new(SceneConfig::default()).unwrap();
    let err = assembler.run(&assets, output.path(), &mut FailingBackend).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
    assert!(!output.path().join("scene_002").exists());
}

#[test]
fn test_run_without_assets_fails() {
    let assets_dir = asset_dir(&["readme.txt"]);
    let output = tempfile::tempdir().unwrap();
    let assets = discover_assets(assets_dir.path()).unwrap();
    assert!(assets.is_empty());

    let assembler = SceneAssembler::new(SceneConfig::default()).unwrap();
    let err = assembler.run(&assets, output.path(), &mut PlanWriter::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn test_config_file_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("scene.json");
    fs::write(
        &config_path,
        r#"{ "scene_count": 1, "seed": 5, "camera": { "mode": "sphere", "count": 5, "radius": 8.0 } }"#,
    )
    .unwrap();

    let config = SceneConfig::from_file(&config_path).unwrap();
    let assets_dir = asset_dir(&["a.ply"]);
    let assets = discover_assets(assets_dir.path()).unwrap();
    let plans = SceneAssembler::new(config)
        .unwrap()
        .run(&assets, dir.path(), &mut PlanWriter::new())
        .unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].cameras.len(), 5);
}
