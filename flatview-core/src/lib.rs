//! Flatview core library - geometry pipeline for a flat-shaded software rasterizer
//!
//! This library provides the pure computation behind each frame: single-axis
//! rigid transforms, perspective projection, back-face culling, painter's
//! algorithm ordering and flat shading. Drawing is delegated to a [`DrawSink`].

pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod pipeline;
pub mod projection;
pub mod shading;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::RenderConfig;
pub use error::MeshError;
pub use geometry::{Face, Mesh, MeshData, VertexIndex};
pub use pipeline::{DrawCommand, DrawSink, FrameOptions, FrameStats, Pipeline, RenderMode};
pub use projection::Camera;
pub use shading::{Light, Rgb, Shading};
pub use transform::{Rotation, Transform};
