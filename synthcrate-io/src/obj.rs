//! OBJ format support
//!
//! Reads the vertex-color extension of OBJ, where a vertex record carries
//! its RGB color after the position: `v x y z r g b` with channels in
//! `[0, 1]`. Only `v` and `f` records are interpreted; normals, texture
//! coordinates, groups, materials and comments are skipped.

use crate::MeshReader;
use std::fs;
use std::path::Path;
use synthcrate_core::{
    color_to_bytes, validate_face, ColoredMesh, ColoredVertex, Error, Face, Point3d, Result,
    DEFAULT_VERTEX_COLOR,
};

/// What to do with a vertex record that carries no color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Assign [`DEFAULT_VERTEX_COLOR`] (white)
    #[default]
    DefaultWhite,
    /// Reject the file with a malformed-record error
    Strict,
}

pub struct ObjReader;

impl ObjReader {
    /// Read a vertex-colored OBJ file with an explicit color policy
    pub fn read_with_policy<P: AsRef<Path>>(path: P, policy: ColorPolicy) -> Result<ColoredMesh> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::from_input_io(path, e))?;
        parse_obj(&text, policy)
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<ColoredMesh> {
        Self::read_with_policy(path, ColorPolicy::default())
    }
}

/// Parse OBJ text into a colored mesh.
///
/// Face indices are 1-based in the file and 0-based in the result; negative
/// indices count back from the last vertex read so far. Any face index that
/// does not name an existing vertex is reported with the line of its face.
pub fn parse_obj(text: &str, policy: ColorPolicy) -> Result<ColoredMesh> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut face_lines = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let mut fields = line.split_whitespace();

        match fields.next() {
            Some("v") => vertices.push(parse_vertex(fields, line_number, policy)?),
            Some("f") => {
                faces.push(parse_face(fields, vertices.len(), line_number)?);
                face_lines.push(line_number);
            }
            _ => {}
        }
    }

    // Faces may reference vertices declared further down, so check ranges last.
    for (face, &line_number) in faces.iter().zip(&face_lines) {
        validate_face(face, vertices.len()).map_err(|message| Error::malformed(line_number, message))?;
    }

    ColoredMesh::new(vertices, faces)
}

fn parse_vertex<'a>(
    fields: impl Iterator<Item = &'a str>,
    line_number: usize,
    policy: ColorPolicy,
) -> Result<ColoredVertex> {
    let fields: Vec<&str> = fields.collect();
    if fields.len() < 3 {
        return Err(Error::malformed(
            line_number,
            format!("vertex needs 3 coordinates, got {}", fields.len()),
        ));
    }

    let position = Point3d::new(
        parse_number(fields[0], line_number)?,
        parse_number(fields[1], line_number)?,
        parse_number(fields[2], line_number)?,
    );

    let color = if fields.len() >= 6 {
        color_to_bytes([
            parse_number(fields[3], line_number)?,
            parse_number(fields[4], line_number)?,
            parse_number(fields[5], line_number)?,
        ])
    } else {
        match policy {
            ColorPolicy::DefaultWhite => DEFAULT_VERTEX_COLOR,
            ColorPolicy::Strict => {
                return Err(Error::malformed(line_number, "vertex has no color"));
            }
        }
    };

    Ok(ColoredVertex::new(position, color))
}

fn parse_face<'a>(
    fields: impl Iterator<Item = &'a str>,
    vertices_so_far: usize,
    line_number: usize,
) -> Result<Face> {
    let face = fields
        .map(|field| parse_face_index(field, vertices_so_far, line_number))
        .collect::<Result<Face>>()?;

    if face.len() < 3 {
        return Err(Error::malformed(
            line_number,
            format!("face needs at least 3 vertices, got {}", face.len()),
        ));
    }
    Ok(face)
}

/// Resolve `index[/texcoord[/normal]]` to a 0-based vertex index
fn parse_face_index(field: &str, vertices_so_far: usize, line_number: usize) -> Result<usize> {
    let head = field.split('/').next().unwrap_or(field);
    let index: i64 = head
        .parse()
        .map_err(|_| Error::malformed(line_number, format!("invalid face index '{}'", field)))?;

    if index > 0 {
        Ok((index - 1) as usize)
    } else if index < 0 {
        let resolved = vertices_so_far as i64 + index;
        if resolved < 0 {
            return Err(Error::malformed(
                line_number,
                format!("relative face index {} precedes the first vertex", index),
            ));
        }
        Ok(resolved as usize)
    } else {
        Err(Error::malformed(line_number, "face index 0 is not valid"))
    }
}

fn parse_number(field: &str, line_number: usize) -> Result<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::malformed(
            line_number,
            format!("expected a number, found '{}'", field),
        )),
    }
}
