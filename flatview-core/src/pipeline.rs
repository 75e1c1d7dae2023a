//! Per-frame geometry pipeline: advance, key by depth, order, cull,
//! project, shade, emit.
use nalgebra::Point2;
use tracing::trace;

use crate::config::RenderConfig;
use crate::geometry::Mesh;
use crate::projection::Camera;
use crate::transform::Transform;
use crate::shading::{Light, Rgb, Shading};

/// Presentation mode for emitted faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Shaded,
    Wireframe,
}

/// Per-frame control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    pub mode: RenderMode,
    pub cull_back_faces: bool,
    /// Emit every face, back faces included, regardless of `cull_back_faces`
    pub show_all_edges: bool,
}

impl FrameOptions {
    pub fn shaded() -> Self {
        Self {
            mode: RenderMode::Shaded,
            cull_back_faces: true,
            show_all_edges: false,
        }
    }

    /// Outline-only with every edge visible
    pub fn wireframe() -> Self {
        Self {
            mode: RenderMode::Wireframe,
            cull_back_faces: false,
            show_all_edges: true,
        }
    }

    pub fn culls(&self) -> bool {
        self.cull_back_faces && !self.show_all_edges
    }

    /// Flip between shaded and wireframe. Wireframe shows every edge; the
    /// culling setting is kept for the return to shaded mode.
    pub fn toggle_wireframe(&mut self) {
        self.mode = match self.mode {
            RenderMode::Shaded => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Shaded,
        };
        self.show_all_edges = self.mode == RenderMode::Wireframe;
    }

    pub fn toggle_culling(&mut self) {
        self.cull_back_faces = !self.cull_back_faces;
    }
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self::shaded()
    }
}

/// One polygon for the drawing sink, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Index of the source face in the mesh
    pub face: usize,
    /// Average camera-space depth the face was ordered by
    pub depth: f32,
    pub polygon: Vec<Point2<f32>>,
    /// `None` in wireframe mode: stroke the outline only
    pub fill: Option<Rgb>,
}

/// Receives faces back to front; later commands paint over earlier ones.
pub trait DrawSink {
    fn draw(&mut self, command: &DrawCommand);
}

impl DrawSink for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(command.clone());
    }
}

/// What happened to the mesh's faces in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    pub culled: usize,
    /// Faces dropped because a vertex was on or behind the camera plane
    pub skipped: usize,
    pub drawn: usize,
}

/// Owned render context: one mesh, one camera, one light.
#[derive(Debug, Clone)]
pub struct Pipeline {
    mesh: Mesh,
    camera: Camera,
    light: Light,
    shading: Shading,
    pub options: FrameOptions,
    pub angular_velocity: f32,
}

impl Pipeline {
    pub fn new(mesh: Mesh, config: &RenderConfig) -> Self {
        let options = FrameOptions {
            mode: config.mode,
            cull_back_faces: config.cull_back_faces,
            show_all_edges: config.mode == RenderMode::Wireframe,
        };

        Self {
            camera: Camera::new(config.width, config.height, mesh.position_offset()),
            mesh,
            light: config.light,
            shading: Shading::new(config.min_brightness),
            options,
            angular_velocity: config.angular_velocity,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.width = width;
        self.camera.height = height;
    }

    /// Integrate the rotation over `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.mesh.rotation.advance(self.angular_velocity, dt);
    }

    /// Build this frame's draw commands, farthest face first.
    pub fn draw_list(&self) -> (Vec<DrawCommand>, FrameStats) {
        let mesh = &self.mesh;
        let faces = mesh.faces();
        let angle = mesh.rotation.angle;
        let offset = mesh.position_offset();
        let model = Transform::model_matrix(angle, offset);

        let mut keyed: Vec<(usize, f32)> = faces
            .iter()
            .enumerate()
            .map(|(index, face)| (index, mesh.average_depth(face, angle, offset)))
            .collect();

        // Painter's order. Stable, so equal depths keep mesh order.
        keyed.sort_by(|a, b| b.1.total_cmp(&a.1));

        let cull = self.options.culls();
        let mut stats = FrameStats {
            faces: faces.len(),
            ..FrameStats::default()
        };
        let mut commands = Vec::with_capacity(keyed.len());

        for (index, depth) in keyed {
            let face = &faces[index];

            if cull && !mesh.is_visible(face, angle) {
                stats.culled += 1;
                continue;
            }

            let polygon: Option<Vec<Point2<f32>>> = face
                .indices()
                .iter()
                .map(|&i| {
                    let p = model.transform_point(mesh.vertex(i));
                    self.camera.project_to_screen(&p)
                })
                .collect();

            let Some(polygon) = polygon else {
                trace!(face = index, depth, "face reaches the camera plane, skipped");
                stats.skipped += 1;
                continue;
            };

            let fill = match self.options.mode {
                RenderMode::Shaded => Some(
                    self.shading
                        .shade(&mesh.rotated_normal(face, angle), &self.light),
                ),
                RenderMode::Wireframe => None,
            };

            commands.push(DrawCommand {
                face: index,
                depth,
                polygon,
                fill,
            });
            stats.drawn += 1;
        }

        (commands, stats)
    }

    /// Emit the current frame to `sink` in painter's order.
    pub fn render<S: DrawSink + ?Sized>(&self, sink: &mut S) -> FrameStats {
        let (commands, stats) = self.draw_list();
        for command in &commands {
            sink.draw(command);
        }

        trace!(
            angle = self.mesh.rotation.angle,
            faces = stats.faces,
            culled = stats.culled,
            skipped = stats.skipped,
            drawn = stats.drawn,
            "frame rendered"
        );
        stats
    }

    /// Advance by `dt`, then render.
    pub fn frame<S: DrawSink + ?Sized>(&mut self, dt: f32, sink: &mut S) -> FrameStats {
        self.advance(dt);
        self.render(sink)
    }
}
