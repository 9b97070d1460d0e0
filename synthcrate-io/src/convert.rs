//! OBJ to PLY conversion, single file and whole directories
//!
//! A single-file conversion fails as a whole: any malformed record aborts it
//! and nothing is written. Batch conversion applies that rule per file
//! instead of per batch: a failing file is recorded in the [`BatchReport`]
//! and the remaining files are still converted.

use crate::obj::{parse_obj, ColorPolicy};
use crate::ply::{write_ply_string, PlyReader};
use crate::write_atomic;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use synthcrate_core::{ColoredMesh, Drawable, Error, Point3d, Result};

/// Options shared by single-file and batch conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// Handling of vertex records without color
    pub color_policy: ColorPolicy,
    /// Treat a mesh without vertices or faces as an error
    pub reject_empty: bool,
    /// Parse the rendered PLY back and compare it with the input mesh
    /// before anything is written
    pub verify: bool,
}

impl ConvertOptions {
    pub fn strict() -> Self {
        Self {
            color_policy: ColorPolicy::Strict,
            reject_empty: true,
            verify: false,
        }
    }
}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub vertex_count: usize,
    pub face_count: usize,
    pub bounding_box: (Point3d, Point3d),
    pub bytes_written: usize,
}

/// Convert OBJ text to PLY text without touching the filesystem
pub fn convert_str(obj_text: &str, options: &ConvertOptions) -> Result<(ColoredMesh, String)> {
    let mesh = parse_obj(obj_text, options.color_policy)?;
    if options.reject_empty && mesh.is_empty() {
        return Err(Error::DegenerateGeometry(format!(
            "mesh has {} vertices and {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        )));
    }
    let ply = write_ply_string(&mesh)?;
    Ok((mesh, ply))
}

/// Convert one OBJ file to one PLY file
pub fn convert_file<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<ConversionSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let text = fs::read_to_string(input).map_err(|e| Error::from_input_io(input, e))?;
    let (mesh, ply) = convert_str(&text, options)?;
    if options.verify {
        verify_ply_text(&mesh, &ply)?;
    }
    write_atomic(output, ply.as_bytes())?;

    log::info!(
        "converted {} -> {} ({} vertices, {} faces)",
        input.display(),
        output.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );

    Ok(ConversionSummary {
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        bounding_box: mesh.bounding_box(),
        bytes_written: ply.len(),
    })
}

/// Check that rendered PLY text holds the same topology and colors as `mesh`
pub fn verify_ply_text(mesh: &ColoredMesh, ply: &str) -> Result<()> {
    let loaded = PlyReader::read_colored_mesh_from(&mut ply.as_bytes())?;
    compare_meshes(mesh, &loaded, "the rendered PLY")
}

/// Check that a written PLY file holds the same topology and colors as `mesh`
pub fn verify_output(mesh: &ColoredMesh, path: &Path) -> Result<()> {
    let loaded = PlyReader::read_colored_mesh(path)?;
    compare_meshes(mesh, &loaded, &path.display().to_string())
}

/// Positions are compared at single precision, the precision the PLY header
/// declares for `x`, `y` and `z`.
fn compare_meshes(mesh: &ColoredMesh, loaded: &ColoredMesh, source: &str) -> Result<()> {
    let mismatch = |what: &str| -> Result<()> {
        Err(Error::Serialization(format!(
            "{} differs after reading back {}",
            what, source
        )))
    };

    if loaded.faces() != mesh.faces() {
        return mismatch("face topology");
    }
    if loaded.vertex_count() != mesh.vertex_count() {
        return mismatch("vertex count");
    }
    for (a, b) in loaded.vertices().iter().zip(mesh.vertices()) {
        if a.color != b.color {
            return mismatch("vertex color");
        }
        let same_position = (0..3).all(|axis| {
            let expected = b.position[axis];
            (a.position[axis] - expected).abs() <= f32::EPSILON as f64 * expected.abs().max(1.0)
        });
        if !same_position {
            return mismatch("vertex position");
        }
    }
    Ok(())
}

/// A file converted by a batch run
#[derive(Debug)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: ConversionSummary,
}

/// A file a batch run could not convert
#[derive(Debug)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: Error,
}

/// Outcome of a directory conversion, in file-name order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConvertedFile>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    /// Whether every matched file converted
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of OBJ files the batch matched
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// List the files in `dir` with a case-insensitive `.obj` extension, sorted
pub fn find_obj_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::from_input_io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_obj = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));
        if is_obj && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for `input` inside `output_dir`: same stem, `.ply` extension
pub fn ply_output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("mesh"));
    name.push(".ply");
    output_dir.join(name)
}

/// Convert every OBJ file directly inside `input_dir` into `output_dir`.
///
/// The output directory is created when missing. A missing input directory
/// is fatal; failures of individual files are collected in the report.
pub fn convert_directory<P, Q>(input_dir: P, output_dir: Q, options: &ConvertOptions) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    let files = find_obj_files(input_dir)?;
    fs::create_dir_all(output_dir)?;

    if files.is_empty() {
        log::warn!("no .obj files found in {}", input_dir.display());
    }

    let mut report = BatchReport::default();
    for input in files {
        let output = ply_output_path(&input, output_dir);
        match convert_file(&input, &output, options) {
            Ok(summary) => report.converted.push(ConvertedFile {
                input,
                output,
                summary,
            }),
            Err(error) => {
                log::error!("failed to convert {}: {}", input.display(), error);
                report.failed.push(FailedFile { input, error });
            }
        }
    }

    Ok(report)
}
