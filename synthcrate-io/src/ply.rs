//! PLY format support
//!
//! Meshes are written as ASCII PLY with per-vertex colors and polygon faces:
//!
//! ```text
//! ply
//! format ascii 1.0
//! element vertex N
//! property float x
//! property float y
//! property float z
//! property uchar red
//! property uchar green
//! property uchar blue
//! element face M
//! property list uchar int vertex_indices
//! end_header
//! ```
//!
//! The file is rendered in memory and then written atomically, so a failed
//! write never leaves a truncated file behind.

use crate::{write_atomic, MeshReader, MeshWriter};
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Property},
};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use synthcrate_core::{
    ColoredMesh, ColoredVertex, Error, Face, Point3d, Result, Rgb8, DEFAULT_VERTEX_COLOR,
};

/// Largest face a `list uchar` count can describe
pub const MAX_FACE_VERTICES: usize = u8::MAX as usize;

pub struct PlyReader;
pub struct PlyWriter;

/// Render the PLY header for the given element counts
pub fn ply_header(vertex_count: usize, face_count: usize) -> String {
    format!(
        "ply\n\
         format ascii 1.0\n\
         element vertex {}\n\
         property float x\n\
         property float y\n\
         property float z\n\
         property uchar red\n\
         property uchar green\n\
         property uchar blue\n\
         element face {}\n\
         property list uchar int vertex_indices\n\
         end_header\n",
        vertex_count, face_count
    )
}

/// Render a mesh as ASCII PLY text.
///
/// Output depends only on the mesh, so converting the same input twice
/// yields identical bytes.
pub fn write_ply_string(mesh: &ColoredMesh) -> Result<String> {
    let mut out = ply_header(mesh.vertex_count(), mesh.face_count());

    for (vertex_index, vertex) in mesh.vertices().iter().enumerate() {
        let p = vertex.position;
        if let Some(&value) = p.iter().find(|&&value| !(value as f32).is_finite()) {
            return Err(Error::UnsupportedFormat(format!(
                "vertex {} coordinate {} is outside the float range",
                vertex_index, value
            )));
        }
        let [r, g, b] = vertex.color;
        writeln!(out, "{} {} {} {} {} {}", p.x, p.y, p.z, r, g, b)
            .map_err(|e| Error::Serialization(e.to_string()))?;
    }

    for (face_index, face) in mesh.faces().iter().enumerate() {
        if face.len() > MAX_FACE_VERTICES {
            return Err(Error::UnsupportedFormat(format!(
                "face {} has {} vertices, PLY list counts stop at {}",
                face_index,
                face.len(),
                MAX_FACE_VERTICES
            )));
        }
        if let Some(&index) = face.iter().find(|&&index| index > i32::MAX as usize) {
            return Err(Error::UnsupportedFormat(format!(
                "face {} references vertex {} beyond the int range",
                face_index, index
            )));
        }

        out.push_str(&face.len().to_string());
        for index in face {
            out.push(' ');
            out.push_str(&index.to_string());
        }
        out.push('\n');
    }

    Ok(out)
}

impl MeshWriter for PlyWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &ColoredMesh, path: P) -> Result<()> {
        let text = write_ply_string(mesh)?;
        write_atomic(path.as_ref(), text.as_bytes())
    }
}

impl PlyReader {
    /// Read a vertex-colored PLY mesh; vertices without color read as white
    pub fn read_colored_mesh<P: AsRef<Path>>(path: P) -> Result<ColoredMesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from_input_io(path, e))?;
        Self::read_colored_mesh_from(&mut BufReader::new(file)).map_err(|e| match e {
            Error::UnsupportedFormat(message) => {
                Error::UnsupportedFormat(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    /// Read a vertex-colored PLY mesh from any buffered source
    pub fn read_colored_mesh_from<R: BufRead>(reader: &mut R) -> Result<ColoredMesh> {
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(reader)?;

        let mut vertices = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let position = Point3d::new(
                    extract_property_value(vertex, "x")?,
                    extract_property_value(vertex, "y")?,
                    extract_property_value(vertex, "z")?,
                );
                vertices.push(ColoredVertex::new(position, extract_color(vertex)));
            }
        }

        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            for face in face_element {
                faces.push(extract_face_indices(face)?);
            }
        }

        ColoredMesh::new(vertices, faces).map_err(|e| Error::UnsupportedFormat(e.to_string()))
    }
}

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<ColoredMesh> {
        Self::read_colored_mesh(path)
    }
}

/// Extract a property value as f64 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f64> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val as f64),
        Some(Property::Double(val)) => Ok(*val),
        Some(Property::Int(val)) => Ok(*val as f64),
        Some(Property::UInt(val)) => Ok(*val as f64),
        _ => Err(Error::UnsupportedFormat(format!(
            "Property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Extract the red/green/blue bytes, falling back to white when any is missing
fn extract_color(element: &DefaultElement) -> Rgb8 {
    let channel = |name: &str| match element.get(name) {
        Some(Property::UChar(val)) => Some(*val),
        _ => None,
    };
    match (channel("red"), channel("green"), channel("blue")) {
        (Some(r), Some(g), Some(b)) => [r, g, b],
        _ => DEFAULT_VERTEX_COLOR,
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Face> {
    let negative = || Error::UnsupportedFormat("Negative face index".to_string());
    match element.get("vertex_indices").or_else(|| element.get("vertex_index")) {
        Some(Property::ListInt(indices)) => indices
            .iter()
            .map(|&idx| usize::try_from(idx).map_err(|_| negative()))
            .collect(),
        Some(Property::ListUInt(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        Some(Property::ListUChar(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        _ => Err(Error::UnsupportedFormat("Face indices not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colored_triangle() -> ColoredMesh {
        ColoredMesh::new(
            vec![
                ColoredVertex::new(Point3d::new(0.0, 0.0, 0.0), [255, 0, 0]),
                ColoredVertex::new(Point3d::new(1.0, 0.0, 0.0), [0, 255, 0]),
                ColoredVertex::new(Point3d::new(0.0, 1.0, 0.0), [0, 0, 255]),
            ],
            vec![vec![0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = ply_header(3, 1);
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ply",
                "format ascii 1.0",
                "element vertex 3",
                "property float x",
                "property float y",
                "property float z",
                "property uchar red",
                "property uchar green",
                "property uchar blue",
                "element face 1",
                "property list uchar int vertex_indices",
                "end_header",
            ]
        );
    }

    #[test]
    fn test_body_lines() {
        let text = write_ply_string(&colored_triangle()).unwrap();
        let body: Vec<&str> = text.lines().skip(12).collect();
        assert_eq!(body, vec!["0 0 0 255 0 0", "1 0 0 0 255 0", "0 1 0 0 0 255", "3 0 1 2"]);
    }

    #[test]
    fn test_fractional_coordinates_keep_precision() {
        let mesh = ColoredMesh::new(
            vec![ColoredVertex::new(Point3d::new(0.25, -1.5, 1e-3), [1, 2, 3])],
            vec![],
        )
        .unwrap();
        let text = write_ply_string(&mesh).unwrap();
        assert!(text.ends_with("end_header\n0.25 -1.5 0.001 1 2 3\n"));
    }

    #[test]
    fn test_oversized_face_rejected() {
        let vertices = vec![ColoredVertex::default(); 300];
        let mesh = ColoredMesh::new(vertices, vec![(0..300).collect()]).unwrap();
        assert!(matches!(write_ply_string(&mesh), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_empty_mesh_has_header_only() {
        let text = write_ply_string(&ColoredMesh::empty()).unwrap();
        assert_eq!(text, ply_header(0, 0));
    }

    #[test]
    fn test_coordinates_beyond_float_range_rejected() {
        let mesh = ColoredMesh::new(
            vec![ColoredVertex::new(Point3d::new(0.0, 1e300, 0.0), [0, 0, 0])],
            vec![],
        )
        .unwrap();
        let err = write_ply_string(&mesh).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref m) if m.contains("vertex 0")), "{}", err);

        let largest = ColoredMesh::new(
            vec![ColoredVertex::new(Point3d::new(f32::MAX as f64, -3e38, 1e-40), [0, 0, 0])],
            vec![],
        )
        .unwrap();
        assert!(write_ply_string(&largest).is_ok());
    }

    #[test]
    fn test_read_from_memory() {
        let text = write_ply_string(&colored_triangle()).unwrap();
        let mesh = PlyReader::read_colored_mesh_from(&mut text.as_bytes()).unwrap();
        assert_eq!(mesh.faces(), colored_triangle().faces());
        assert_eq!(mesh.vertices()[2].color, [0, 0, 255]);
        assert_eq!(mesh.vertices()[1].position, Point3d::new(1.0, 0.0, 0.0));
    }
}
