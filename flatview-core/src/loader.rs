//! Wavefront OBJ loader for the vertex/face subset
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::MeshError;
use crate::geometry::MeshData;

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let data = parse_obj(&text)?;
    debug!(
        path = %path.display(),
        vertices = data.vertices.len(),
        faces = data.faces.len(),
        "loaded OBJ"
    );
    Ok(data)
}

/// Parse OBJ text into raw mesh data.
///
/// Only `v` and `f` statements are read; everything else is skipped.
/// Face indices are resolved to 0-based positions but not range checked
/// against the final vertex count, [`Mesh::new`](crate::Mesh::new) does that.
pub fn parse_obj(input: &str) -> Result<MeshData, MeshError> {
    let mut data = MeshData::default();

    for (number, raw) in input.lines().enumerate() {
        let line_number = number + 1;
        let line = match raw.find('#') {
            Some(comment) => &raw[..comment],
            None => raw,
        }
        .trim();

        match line.split_whitespace().next() {
            Some("v") => {
                let (_, vertex) = all_consuming(parse_vertex)(line).map_err(|_| MeshError::Parse {
                    line: line_number,
                    message: format!("expected `v x y z`, found `{}`", line),
                })?;
                data.vertices.push(vertex);
            }
            Some("f") => {
                let (_, refs) = all_consuming(parse_face)(line).map_err(|_| MeshError::Parse {
                    line: line_number,
                    message: format!("expected `f i j k ...`, found `{}`", line),
                })?;
                let face = refs
                    .into_iter()
                    .map(|r| resolve_index(r, data.vertices.len(), line_number))
                    .collect::<Result<Vec<_>, _>>()?;
                data.faces.push(face);
            }
            _ => {}
        }
    }

    Ok(data)
}

/// 1-based indices count from the start, negative ones back from the
/// latest vertex.
fn resolve_index(reference: i64, vertex_count: usize, line: usize) -> Result<usize, MeshError> {
    let resolved = match reference {
        r if r > 0 => usize::try_from(r - 1).ok(),
        r if r < 0 => usize::try_from(r.unsigned_abs())
            .ok()
            .and_then(|back| vertex_count.checked_sub(back)),
        _ => None,
    };

    resolved.ok_or_else(|| MeshError::Parse {
        line,
        message: format!("invalid vertex reference {}", reference),
    })
}

fn parse_vertex(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    // Optional homogeneous weight, unused
    let (input, _) = opt(preceded(space1, float))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, [x, y, z]))
}

fn parse_face(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f")(input)?;
    let (input, refs) = many1(preceded(space1, parse_face_ref))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, refs))
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only the position index is kept.
fn parse_face_ref(input: &str) -> IResult<&str, i64> {
    terminated(
        index,
        opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
    )(input)
}
