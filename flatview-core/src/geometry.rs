//! Mesh model: validated vertices and faces plus per-frame rotation state
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::MeshError;
use crate::transform::{Rotation, Transform};
use crate::vector;

/// Index into a mesh's vertex list, checked once when the mesh is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIndex(usize);

impl VertexIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// A planar polygon, at least three vertices in winding order.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    indices: Vec<VertexIndex>,
}

impl Face {
    pub fn indices(&self) -> &[VertexIndex] {
        &self.indices
    }

    /// Always at least 3
    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }
}

/// Raw mesh input as handed over by a loader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<Vec<usize>>,
}

/// A polygon mesh placed in front of the camera.
///
/// Geometry is fixed after construction; only the rotation changes from
/// frame to frame.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
    pub rotation: Rotation,
    position_offset: f32,
}

impl Mesh {
    /// Validate `data` and place the mesh `camera_distance` units down the view axis.
    pub fn new(data: MeshData, camera_distance: f32) -> Result<Self, MeshError> {
        let vertex_count = data.vertices.len();

        let faces = data
            .faces
            .into_iter()
            .enumerate()
            .map(|(face, indices)| {
                if indices.len() < 3 {
                    return Err(MeshError::FaceTooSmall {
                        face,
                        len: indices.len(),
                    });
                }
                let indices = indices
                    .into_iter()
                    .map(|index| {
                        if index < vertex_count {
                            Ok(VertexIndex(index))
                        } else {
                            Err(MeshError::IndexOutOfRange {
                                face,
                                index,
                                vertex_count,
                            })
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Face { indices })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let vertices = data
            .vertices
            .into_iter()
            .map(|[x, y, z]| Point3::new(x, y, z))
            .collect();

        debug!(
            vertices = vertex_count,
            faces = faces.len(),
            camera_distance,
            "mesh constructed"
        );

        Ok(Self {
            vertices,
            faces,
            rotation: Rotation::zero(),
            position_offset: camera_distance,
        })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn position_offset(&self) -> f32 {
        self.position_offset
    }

    /// `index` must come from this mesh; indices are only checked in [`Mesh::new`].
    pub(crate) fn vertex(&self, index: VertexIndex) -> &Point3<f32> {
        &self.vertices[index.0]
    }

    /// Unnormalized model-space normal from the first three vertices.
    ///
    /// Its length is proportional to the face area; collinear vertices give
    /// the zero vector. `face` must be one of this mesh's own faces.
    pub fn face_normal(&self, face: &Face) -> Vector3<f32> {
        let v0 = self.vertex(face.indices[0]).coords;
        let v1 = self.vertex(face.indices[1]).coords;
        let v2 = self.vertex(face.indices[2]).coords;

        let edge1 = vector::subtract(&v1, &v0);
        let edge2 = vector::subtract(&v2, &v0);

        vector::cross(&edge1, &edge2)
    }

    /// Face normal turned to the current orientation.
    pub fn rotated_normal(&self, face: &Face, angle: f32) -> Vector3<f32> {
        Transform::rotate_y(&self.face_normal(face), angle)
    }

    /// Back-face test against a camera looking down +z.
    ///
    /// Only the object's rotation matters: the camera never moves and the
    /// object always spins about its own origin.
    pub fn is_visible(&self, face: &Face, angle: f32) -> bool {
        self.rotated_normal(face, angle).z < 0.0
    }

    /// Mean camera-space z of the face's vertices.
    ///
    /// A sort key only: interpenetrating faces cannot be ordered by any
    /// single per-face scalar and are not handled.
    pub fn average_depth(&self, face: &Face, angle: f32, offset: f32) -> f32 {
        let sum: f32 = face
            .indices
            .iter()
            .map(|&i| self.transform_vertex(self.vertex(i), angle, offset).z)
            .sum();
        sum / face.indices.len() as f32
    }

    /// Model space to camera space: rotate about the local origin, then offset.
    pub fn transform_vertex(&self, v: &Point3<f32>, angle: f32, offset: f32) -> Point3<f32> {
        Transform::apply(v, angle, offset)
    }

    /// Create a cube with outward-facing quad faces for testing
    pub fn cube(size: f32, camera_distance: f32) -> Self {
        let half = size / 2.0;

        #[rustfmt::skip]
        let vertices = vec![
            [-half, -half, -half],
            [ half, -half, -half],
            [ half,  half, -half],
            [-half,  half, -half],
            [-half, -half,  half],
            [ half, -half,  half],
            [ half,  half,  half],
            [-half,  half,  half],
        ];

        let faces = vec![
            vec![0, 3, 2, 1], // Front (towards the camera)
            vec![4, 5, 6, 7], // Back
            vec![1, 2, 6, 5], // Right
            vec![0, 4, 7, 3], // Left
            vec![3, 7, 6, 2], // Top
            vec![0, 1, 5, 4], // Bottom
        ];

        Self {
            vertices: vertices
                .into_iter()
                .map(|[x, y, z]| Point3::new(x, y, z))
                .collect(),
            faces: faces
                .into_iter()
                .map(|indices| Face {
                    indices: indices.into_iter().map(VertexIndex).collect(),
                })
                .collect(),
            rotation: Rotation::zero(),
            position_offset: camera_distance,
        }
    }
}
