//! Camera and projection utilities
use nalgebra::{Point2, Point3};

/// Camera-space depths at or below this are behind or on the camera plane.
pub const NEAR_EPSILON: f32 = 1e-6;

/// Fixed pinhole camera looking down the positive z axis.
///
/// The camera never moves; `distance` is where the viewed object sits, and
/// is baked into the mesh's position offset rather than used here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    pub distance: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, distance: f32) -> Self {
        Self {
            width,
            height,
            distance,
        }
    }

    /// Perspective divide. `z` is passed through for depth sorting.
    ///
    /// `p.z` must be positive; zero divides by zero and negative depths
    /// come out mirrored.
    pub fn project(&self, p: &Point3<f32>) -> Point3<f32> {
        Point3::new(p.x / p.z, p.y / p.z, p.z)
    }

    /// Map normalized device coordinates to pixels, flipping y so that up
    /// is towards row 0. No clamping: off-screen input lands off-screen.
    pub fn to_screen(&self, p: &Point3<f32>) -> Point2<f32> {
        let width = self.width as f32;
        let height = self.height as f32;
        Point2::new(
            (p.x + 1.0) / 2.0 * width,
            (1.0 - (p.y + 1.0) / 2.0) * height,
        )
    }

    /// Project a camera-space point to screen space
    ///
    /// Returns `None` for points on or behind the camera plane and for
    /// results that are not finite.
    pub fn project_to_screen(&self, p: &Point3<f32>) -> Option<Point2<f32>> {
        if p.z.is_nan() || p.z <= NEAR_EPSILON {
            return None;
        }

        let screen = self.to_screen(&self.project(p));
        if screen.x.is_finite() && screen.y.is_finite() {
            Some(screen)
        } else {
            None
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600, 4.0)
    }
}
