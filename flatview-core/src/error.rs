//! Mesh construction and loading errors

use std::io;
use thiserror::Error;

/// Errors surfaced before the pipeline runs. Rendering itself never fails.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("face {face} has {len} indices, at least 3 are required")]
    FaceTooSmall { face: usize, len: usize },

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
