//! Terminal front end: frame loop, keyboard controls and cell output
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use flatview_core::{FrameStats, Mesh, Pipeline, RenderConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod renderer;

pub use renderer::TerminalSurface;

/// Rotation applied by a single arrow key press (radians)
const NUDGE: f32 = 0.1;
/// Angular velocity change per `+`/`-` press (radians per second)
const SPEED_STEP: f32 = 0.2;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    pipeline: Pipeline,
    surface: TerminalSurface,
    running: bool,
    paused: bool,
    target_fps: u32,
    last_frame: Instant,
    last_second: Instant,
    frame_count: u32,
    fps: f32,
    stats: FrameStats,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, mut config: RenderConfig, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        config.width = width as u32;
        config.height = height as u32;

        let surface = TerminalSurface::new(
            width as usize,
            height as usize,
            config.foreground,
            config.background,
        );

        Ok(Self {
            pipeline: Pipeline::new(mesh, &config),
            surface,
            running: true,
            paused: false,
            target_fps: target_fps.max(1),
            last_frame: Instant::now(),
            last_second: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: FrameStats::default(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!(
            width = self.surface.width(),
            height = self.surface.height(),
            faces = self.pipeline.mesh().faces().len(),
            "terminal renderer started"
        );

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.target_fps;
        self.last_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            let dt = (frame_start - self.last_frame).as_secs_f32();
            self.last_frame = frame_start;
            self.update(dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_second).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_second).as_secs_f32();
                self.frame_count = 0;
                self.last_second = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.pipeline.set_viewport(width as u32, height as u32);
                self.surface.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('w') => {
                self.pipeline.options.toggle_wireframe();
                info!(mode = ?self.pipeline.options.mode, "render mode toggled");
            }
            KeyCode::Char('c') => {
                self.pipeline.options.toggle_culling();
                info!(
                    cull = self.pipeline.options.cull_back_faces,
                    "back-face culling toggled"
                );
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.pipeline.angular_velocity += SPEED_STEP;
            }
            KeyCode::Char('-') => {
                self.pipeline.angular_velocity -= SPEED_STEP;
            }
            KeyCode::Left => {
                self.pipeline.mesh_mut().rotation.rotate(-NUDGE);
            }
            KeyCode::Right => {
                self.pipeline.mesh_mut().rotation.rotate(NUDGE);
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        if !self.paused {
            self.pipeline.advance(dt);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear surface
        self.surface.clear();

        // Render mesh back to front
        self.stats = self.pipeline.render(&mut self.surface);

        // Output to terminal
        let mut stdout = stdout();
        self.surface.present(&mut stdout)?;

        // Draw UI overlay
        let options = self.pipeline.options;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Flatview | FPS: {:.1} | {:?} | cull: {} | faces {}/{} | W=Wireframe C=Cull Space=Pause +/-=Speed Q=Quit",
                self.fps,
                options.mode,
                if options.culls() { "on" } else { "off" },
                self.stats.drawn,
                self.stats.faces,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
