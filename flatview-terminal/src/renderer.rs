//! Character-cell drawing surface for terminal output
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use flatview_core::{DrawCommand, DrawSink, Rgb};
use nalgebra::Point2;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph used for wireframe edges
const EDGE_CHAR: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Rgb,
}

/// Paints polygons into a grid of terminal cells.
///
/// There is no depth buffer: every draw overwrites what is already there, so
/// callers must submit faces back to front.
pub struct TerminalSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    foreground: Rgb,
    background: Rgb,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize, foreground: Rgb, background: Rgb) -> Self {
        Self {
            width,
            height,
            cells: vec![Self::blank(background); width * height],
            foreground,
            background,
        }
    }

    fn blank(background: Rgb) -> Cell {
        Cell {
            ch: ' ',
            color: background,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Self::blank(self.background); width * height];
    }

    pub fn clear(&mut self) {
        let blank = Self::blank(self.background);
        self.cells.fill(blank);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Row contents as plain text
    #[cfg(test)]
    fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = cell;
        }
    }

    /// Fill a convex polygon by fanning it into triangles.
    pub fn fill_polygon(&mut self, points: &[Point2<f32>], color: Rgb) {
        if points.len() < 3 {
            return;
        }

        let ramp_index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let cell = Cell {
            ch: LUMINOSITY_RAMP[ramp_index.min(LUMINOSITY_RAMP.len() - 1)],
            color,
        };

        for i in 1..points.len() - 1 {
            self.fill_triangle(points[0], points[i], points[i + 1], cell);
        }
    }

    fn fill_triangle(&mut self, v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>, cell: Cell) {
        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.put(x, y, cell);
                    }
                }
            }
        }
    }

    /// Stroke the closed outline through `points`.
    pub fn stroke_polygon(&mut self, points: &[Point2<f32>], color: Rgb) {
        let cell = Cell { ch: EDGE_CHAR, color };
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.stroke_line(start, end, cell);
        }
    }

    fn stroke_line(&mut self, start: Point2<f32>, end: Point2<f32>, cell: Cell) {
        let bounds = (self.width as f32, self.height as f32);
        let Some((a, b)) = clip_segment(start, end, bounds) else {
            return;
        };

        let (mut x, mut y) = (a.x.floor() as i32, a.y.floor() as i32);
        let (x1, y1) = (b.x.floor() as i32, b.y.floor() as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x, y, cell);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_color(self.background)))?;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            let mut current = None;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSink for TerminalSurface {
    fn draw(&mut self, command: &DrawCommand) {
        match command.fill {
            Some(color) => self.fill_polygon(&command.polygon, color),
            None => self.stroke_polygon(&command.polygon, self.foreground),
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    p: Point2<f32>,
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

/// Liang-Barsky clip of a segment against `[0, width) x [0, height)`
fn clip_segment(
    a: Point2<f32>,
    b: Point2<f32>,
    (width, height): (f32, f32),
) -> Option<(Point2<f32>, Point2<f32>)> {
    let max_x = (width - 1e-3).max(0.0);
    let max_y = (height - 1e-3).max(0.0);
    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-d.x, a.x),
        (d.x, max_x - a.x),
        (-d.y, a.y),
        (d.y, max_y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    if t0 > t1 {
        return None;
    }
    Some((a + d * t0, a + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> Vec<Point2<f32>> {
        vec![
            Point2::new(min, min),
            Point2::new(min, max),
            Point2::new(max, max),
            Point2::new(max, min),
        ]
    }

    #[test]
    fn test_fill_covers_interior() {
        let mut surface = TerminalSurface::new(10, 10, Rgb::WHITE, Rgb::BLACK);
        surface.fill_polygon(&square(2.0, 8.0), Rgb::WHITE);

        assert_eq!(surface.cell(5, 5).map(|c| c.ch), Some('@'));
        assert_eq!(surface.cell(5, 5).map(|c| c.color), Some(Rgb::WHITE));
        assert_eq!(surface.cell(0, 0).map(|c| c.ch), Some(' '));
        assert_eq!(surface.cell(9, 9).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_fill_ignores_winding() {
        let mut surface = TerminalSurface::new(10, 10, Rgb::WHITE, Rgb::BLACK);
        let mut points = square(2.0, 8.0);
        points.reverse();
        surface.fill_polygon(&points, Rgb::grey(128));
        assert_ne!(surface.cell(5, 5).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_later_draw_paints_over() {
        let mut surface = TerminalSurface::new(10, 10, Rgb::WHITE, Rgb::BLACK);
        surface.fill_polygon(&square(0.0, 10.0), Rgb::grey(76));
        surface.fill_polygon(&square(3.0, 7.0), Rgb::WHITE);

        assert_eq!(surface.cell(5, 5).map(|c| c.color), Some(Rgb::WHITE));
        assert_eq!(surface.cell(1, 1).map(|c| c.color), Some(Rgb::grey(76)));
    }

    #[test]
    fn test_stroke_outline_only() {
        let mut surface = TerminalSurface::new(10, 10, Rgb::WHITE, Rgb::BLACK);
        surface.stroke_polygon(&square(1.0, 8.0), Rgb::new(0, 255, 0));

        assert_eq!(surface.cell(1, 1).map(|c| c.ch), Some(EDGE_CHAR));
        assert_eq!(surface.cell(8, 4).map(|c| c.ch), Some(EDGE_CHAR));
        assert_eq!(surface.cell(4, 4).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_off_screen_points_are_tolerated() {
        let mut surface = TerminalSurface::new(10, 10, Rgb::WHITE, Rgb::BLACK);
        surface.fill_polygon(&square(-50.0, 60.0), Rgb::WHITE);
        surface.stroke_polygon(&square(-1.0e7, 1.0e7), Rgb::grey(10));
        surface.stroke_polygon(&square(20.0, 30.0), Rgb::grey(10));
        assert_eq!(surface.cell(6, 2).map(|c| c.ch), Some('@'));
        assert_eq!(surface.cell(0, 9).map(|c| c.color), Some(Rgb::WHITE));
    }

    #[test]
    fn test_sink_dispatches_on_fill() {
        let mut surface = TerminalSurface::new(10, 10, Rgb::new(255, 0, 0), Rgb::BLACK);
        surface.draw(&DrawCommand {
            face: 0,
            depth: 1.0,
            polygon: square(1.0, 8.0),
            fill: None,
        });
        assert_eq!(surface.cell(1, 1).map(|c| c.color), Some(Rgb::new(255, 0, 0)));
        assert_eq!(surface.cell(4, 4).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_clear_and_resize() {
        let mut surface = TerminalSurface::new(4, 2, Rgb::WHITE, Rgb::BLACK);
        surface.fill_polygon(&square(0.0, 4.0), Rgb::WHITE);
        surface.clear();
        assert_eq!(surface.row(0), "    ");

        surface.resize(6, 3);
        assert_eq!(surface.row(2), "      ");
        assert!(surface.cell(6, 0).is_none());
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let surface = TerminalSurface::new(3, 2, Rgb::WHITE, Rgb::BLACK);
        let mut out = Vec::new();
        surface.present(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
