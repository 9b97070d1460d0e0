//! Demo of vertex-colored OBJ to PLY conversion
//!
//! This demo shows how to:
//! - Convert a single OBJ file and inspect the summary
//! - Read the PLY output back
//! - Convert a directory that contains a broken file

use std::fs;
use synthcrate_io::{convert_directory, convert_file, ConvertOptions, PlyReader};

const PYRAMID_OBJ: &str = r#"# square pyramid, one color per vertex
v -1 -1 0 1.0 0.0 0.0
v  1 -1 0 0.0 1.0 0.0
v  1  1 0 0.0 0.0 1.0
v -1  1 0 1.0 1.0 0.0
v  0  0 1.5 1.0 1.0 1.0
f 1 4 3 2
f 1 2 5
f 2 3 5
f 3 4 5
f 4 1 5
"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let workdir = demo_dir()?;
    let obj_dir = workdir.join("obj");
    let ply_dir = workdir.join("ply");
    fs::create_dir_all(&obj_dir)?;

    println!("=== Single file conversion ===\n");
    let input = obj_dir.join("pyramid.obj");
    fs::write(&input, PYRAMID_OBJ)?;
    let output = workdir.join("pyramid.ply");

    let options = ConvertOptions {
        verify: true,
        ..ConvertOptions::default()
    };
    let summary = convert_file(&input, &output, &options)?;
    println!(
        "   {} vertices, {} faces, {} bytes",
        summary.vertex_count, summary.face_count, summary.bytes_written
    );
    let (min, max) = summary.bounding_box;
    println!("   bounds: {:?} .. {:?}", min.coords.as_slice(), max.coords.as_slice());

    let mesh = PlyReader::read_colored_mesh(&output)?;
    for (i, vertex) in mesh.vertices().iter().enumerate() {
        println!("   vertex {}: color {:?}", i, vertex.color);
    }

    println!("\n=== Batch conversion ===\n");
    fs::write(obj_dir.join("broken.obj"), "v 0 0 0 1 1 1\nf 1 2 3\n")?;
    let report = convert_directory(&obj_dir, &ply_dir, &ConvertOptions::default())?;
    for file in &report.converted {
        println!("   converted {}", file.output.display());
    }
    for file in &report.failed {
        println!("   failed {}: {}", file.input.display(), file.error);
    }
    println!("   {} of {} converted", report.converted.len(), report.total());

    fs::remove_dir_all(&workdir)?;
    Ok(())
}

fn demo_dir() -> std::io::Result<std::path::PathBuf> {
    let dir = std::env::temp_dir().join(format!("synthcrate-convert-demo-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
