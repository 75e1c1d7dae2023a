//! Flat shading with a single directional light
use nalgebra::{Unit, Vector3};

use crate::vector;

/// Default floor so no visible face is ever fully black
pub const MIN_BRIGHTNESS: f32 = 0.3;

/// 8-bit RGB colour handed to the drawing sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

/// Direction light arrives from, as seen by a lit surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Unit<Vector3<f32>>,
}

impl Light {
    /// Returns `None` for a zero direction.
    pub fn new(direction: Vector3<f32>) -> Option<Self> {
        vector::normalize(&direction).map(|d| Self {
            direction: Unit::new_unchecked(d),
        })
    }
}

impl Default for Light {
    fn default() -> Self {
        // Upper left, slightly in front of the object.
        Self {
            direction: Unit::new_normalize(Vector3::new(-0.5, 0.6, -1.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub min_brightness: f32,
}

impl Shading {
    pub fn new(min_brightness: f32) -> Self {
        Self {
            min_brightness: min_brightness.clamp(0.0, 1.0),
        }
    }

    /// Lambert term for an already oriented normal.
    ///
    /// Degenerate normals cannot be oriented and count as unlit.
    pub fn brightness(&self, normal: &Vector3<f32>, light: &Light) -> f32 {
        match vector::normalize(normal) {
            Some(n) => vector::dot(&n, &light.direction).max(0.0),
            None => 0.0,
        }
    }

    /// Lift `brightness` onto `[min_brightness, 1]`.
    pub fn final_brightness(&self, brightness: f32) -> f32 {
        // Same as min + b * (1 - min) but exact at b = 0 and b = 1.
        brightness + self.min_brightness * (1.0 - brightness)
    }

    pub fn channel(final_brightness: f32) -> u8 {
        (255.0 * final_brightness.clamp(0.0, 1.0)).floor() as u8
    }

    /// Face colour for an oriented normal
    pub fn shade(&self, normal: &Vector3<f32>, light: &Light) -> Rgb {
        let brightness = self.brightness(normal, light);
        Rgb::grey(Self::channel(self.final_brightness(brightness)))
    }
}

impl Default for Shading {
    fn default() -> Self {
        Self::new(MIN_BRIGHTNESS)
    }
}
