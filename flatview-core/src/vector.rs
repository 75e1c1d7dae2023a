//! Vector operations over `nalgebra::Vector3<f32>`.
//!
//! Thin named wrappers so the rest of the pipeline reads in terms of the
//! geometric operation rather than the nalgebra method.

use nalgebra::Vector3;

/// Magnitudes below this are treated as zero by [`normalize`].
pub const NORMALIZE_EPSILON: f32 = 1e-12;

pub fn subtract(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a - b
}

/// Right-handed cross product. Order matters: `cross(b, a) == -cross(a, b)`.
pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

pub fn dot(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    a.dot(b)
}

pub fn magnitude(v: &Vector3<f32>) -> f32 {
    v.norm()
}

/// Unit vector in the direction of `v`, or `None` for a zero-length input.
pub fn normalize(v: &Vector3<f32>) -> Option<Vector3<f32>> {
    v.try_normalize(NORMALIZE_EPSILON)
}
