//! Flatview terminal viewer - rotating flat-shaded mesh
//!
//! Controls:
//!   - W: Toggle wireframe
//!   - C: Toggle back-face culling
//!   - Space: Pause rotation
//!   - +/-: Change rotation speed
//!   - Left/Right: Nudge rotation
//!   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use flatview_core::{loader, Mesh, RenderConfig, RenderMode};
use flatview_terminal::TerminalApp;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flatview-terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Flat-shaded mesh viewer for the terminal", long_about = None)]
struct Cli {
    /// OBJ file to display (a cube when omitted)
    #[arg(short, long)]
    mesh: Option<PathBuf>,

    /// Edge length of the built-in cube
    #[arg(long, default_value_t = 2.0)]
    size: f32,

    /// Distance from the camera to the mesh origin
    #[arg(short, long, default_value_t = 4.0)]
    distance: f32,

    /// Rotation speed in radians per second
    #[arg(short, long, default_value_t = 0.8)]
    speed: f32,

    /// Target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Start in wireframe mode
    #[arg(short, long)]
    wireframe: bool,

    /// Draw back faces too
    #[arg(long)]
    no_cull: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RenderConfig {
        camera_distance: cli.distance,
        angular_velocity: cli.speed,
        mode: if cli.wireframe {
            RenderMode::Wireframe
        } else {
            RenderMode::Shaded
        },
        cull_back_faces: !cli.no_cull,
        ..RenderConfig::default()
    };

    let mesh = match &cli.mesh {
        Some(path) => {
            let data = loader::load_obj(path)
                .with_context(|| format!("failed to load mesh {}", path.display()))?;
            Mesh::new(data, config.camera_distance)
                .with_context(|| format!("invalid mesh {}", path.display()))?
        }
        None => Mesh::cube(cli.size, config.camera_distance),
    };
    info!(faces = mesh.faces().len(), "mesh ready");

    let mut app = TerminalApp::new(mesh, config, cli.fps)?;
    app.run()?;

    Ok(())
}
