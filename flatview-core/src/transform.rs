//! Single-axis rigid transforms and rotation state
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::TAU;

/// Rotation about the vertical axis (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub angle: f32,
}

impl Rotation {
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    pub fn zero() -> Self {
        Self { angle: 0.0 }
    }

    /// Integrate `angular_velocity` (rad/s) over `dt` seconds.
    ///
    /// The accumulated angle is wrapped into `[0, 2π)` so long runs do not
    /// lose precision; the transform itself is periodic so nothing observable
    /// changes.
    pub fn advance(&mut self, angular_velocity: f32, dt: f32) {
        let angle = (self.angle + angular_velocity * dt).rem_euclid(TAU);
        // rem_euclid rounds tiny negative inputs up to exactly TAU
        self.angle = if angle >= TAU { 0.0 } else { angle };
    }

    /// Rotate by a delta amount (in radians)
    pub fn rotate(&mut self, delta: f32) {
        self.advance(delta, 1.0);
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rigid transforms used by the mesh model.
///
/// The only supported composition is rotate-then-translate: the object spins
/// about its own origin and is then pushed `depth` units along the view axis.
pub struct Transform;

impl Transform {
    /// `(x cosθ − z sinθ, y, x sinθ + z cosθ)`
    pub fn rotate_y(v: &Vector3<f32>, angle: f32) -> Vector3<f32> {
        let (sin, cos) = angle.sin_cos();
        Vector3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos)
    }

    pub fn translate_depth(p: &Point3<f32>, depth: f32) -> Point3<f32> {
        Point3::new(p.x, p.y, p.z + depth)
    }

    /// Model space to camera space: rotate, then translate.
    pub fn apply(p: &Point3<f32>, angle: f32, depth: f32) -> Point3<f32> {
        let rotated = Point3::from(Self::rotate_y(&p.coords, angle));
        Self::translate_depth(&rotated, depth)
    }

    /// Camera space back to model space: undo the translation, then the rotation.
    pub fn invert(p: &Point3<f32>, angle: f32, depth: f32) -> Point3<f32> {
        let untranslated = Self::translate_depth(p, -depth);
        Point3::from(Self::rotate_y(&untranslated.coords, -angle))
    }

    /// Homogeneous form of [`Transform::rotate_y`]
    pub fn rotation_matrix(angle: f32) -> Matrix4<f32> {
        let (sin, cos) = angle.sin_cos();
        #[rustfmt::skip]
        let m = Matrix4::new(
            cos, 0.0, -sin, 0.0,
            0.0, 1.0,  0.0, 0.0,
            sin, 0.0,  cos, 0.0,
            0.0, 0.0,  0.0, 1.0,
        );
        m
    }

    /// Create a translation matrix along the view axis
    pub fn translation_matrix(depth: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(0.0, 0.0, depth))
    }

    /// Model matrix equivalent to [`Transform::apply`]
    pub fn model_matrix(angle: f32, depth: f32) -> Matrix4<f32> {
        Self::translation_matrix(depth) * Self::rotation_matrix(angle)
    }
}
