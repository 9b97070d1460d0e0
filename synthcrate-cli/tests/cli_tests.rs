//! Tests that run the `synthcrate` binary

use std::fs;
use std::process::Command;

const TRIANGLE_OBJ: &str = "v 0 0 0 1 0 0\nv 1 0 0 0 1 0\nv 0 1 0 0 0 1\nf 1 2 3\n";

fn synthcrate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_synthcrate"))
}

#[test]
fn test_convert_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("triangle.obj");
    let output = dir.path().join("triangle.ply");
    fs::write(&input, TRIANGLE_OBJ).unwrap();

    let result = synthcrate()
        .args(["convert", "--verify"])
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();
    assert!(result.status.success());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.ends_with("0 0 0 255 0 0\n1 0 0 0 255 0\n0 1 0 0 0 255\n3 0 1 2\n"));
}

#[test]
fn test_convert_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = synthcrate()
        .arg("convert")
        .arg(dir.path().join("absent.obj"))
        .arg(dir.path().join("out.ply"))
        .output()
        .unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Input not found"), "stderr: {}", stderr);
}

#[test]
fn test_batch_reports_failures_with_exit_code() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    fs::write(input_dir.path().join("good.obj"), TRIANGLE_OBJ).unwrap();
    fs::write(input_dir.path().join("bad.obj"), "v 0 0 0 1 1 1\nf 1 2 3\n").unwrap();

    let result = synthcrate()
        .arg("batch")
        .arg(input_dir.path())
        .arg(output_dir.path())
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    assert!(output_dir.path().join("good.ply").is_file());
    assert!(!output_dir.path().join("bad.ply").exists());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("1 of 2 files converted"), "stdout: {}", stdout);
}

#[test]
fn test_plan_writes_scene_directories() {
    let assets = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(assets.path().join("cup.ply"), "ply\n").unwrap();

    let result = synthcrate()
        .arg("plan")
        .arg(assets.path())
        .arg(output.path())
        .args(["--scenes", "2", "--seed", "4"])
        .output()
        .unwrap();
    assert!(result.status.success());
    assert!(output.path().join("scene_000/plan.json").is_file());
    assert!(output.path().join("scene_001/plan.json").is_file());
    assert!(!output.path().join("scene_002").exists());
}

#[test]
fn test_verbose_plan_logs_assets() {
    let assets = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(assets.path().join("bowl.ply"), "ply\n").unwrap();
    fs::write(assets.path().join("cup.ply"), "ply\n").unwrap();

    let result = synthcrate()
        .env_remove("RUST_LOG")
        .args(["-v", "plan"])
        .arg(assets.path())
        .arg(output.path())
        .args(["--scenes", "1", "--seed", "1"])
        .output()
        .unwrap();
    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("found 2 assets"), "stderr: {}", stderr);
}

#[test]
fn test_batch_failures_reported_on_stderr() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    fs::write(input_dir.path().join("bad.obj"), "v 0 0 0 1 1 1\nf 1 2 3\n").unwrap();

    let result = synthcrate()
        .env_remove("RUST_LOG")
        .arg("batch")
        .arg(input_dir.path())
        .arg(output_dir.path())
        .output()
        .unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed") && stderr.contains("bad.obj"), "stderr: {}", stderr);
}
