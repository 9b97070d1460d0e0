//! I/O operations for colored meshes
//!
//! This crate converts vertex-colored OBJ meshes into ASCII PLY, one file at
//! a time or a whole directory at once, and reads PLY output back for
//! verification.

pub mod obj;
pub mod ply;
pub mod convert;

pub use convert::*;
pub use obj::{parse_obj, ColorPolicy, ObjReader};
pub use ply::{ply_header, write_ply_string, PlyReader, PlyWriter};

use std::io::Write;
use std::path::Path;
use synthcrate_core::{ColoredMesh, Error, Result};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<ColoredMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &ColoredMesh, path: P) -> Result<()>;
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<ColoredMesh> {
    let path = path.as_ref();
    match extension_lowercase(path).as_deref() {
        Some("obj") => obj::ObjReader::read_mesh(path),
        Some("ply") => ply::PlyReader::read_mesh(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<Path>>(mesh: &ColoredMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension_lowercase(path).as_deref() {
        Some("ply") => ply::PlyWriter::write_mesh(mesh, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported mesh output format: {:?}",
            path.extension()
        ))),
    }
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed over `path` only after every byte has been
/// written; on any failure it is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".synthcrate-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
