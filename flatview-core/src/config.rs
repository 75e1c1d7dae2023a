//! Render tunables
use crate::pipeline::RenderMode;
use crate::shading::{Light, Rgb, MIN_BRIGHTNESS};

/// Everything a [`Pipeline`](crate::Pipeline) needs besides the mesh
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// How far in front of the camera the mesh origin sits
    pub camera_distance: f32,
    pub light: Light,
    pub min_brightness: f32,
    pub foreground: Rgb,
    pub background: Rgb,
    /// Radians per second about the vertical axis
    pub angular_velocity: f32,
    pub mode: RenderMode,
    pub cull_back_faces: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            camera_distance: 4.0,
            light: Light::default(),
            min_brightness: MIN_BRIGHTNESS,
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
            angular_velocity: 0.8,
            mode: RenderMode::Shaded,
            cull_back_faces: true,
        }
    }
}
