//! The drawing primitives the background animation renders through.

use serde::Serialize;

/// Pixel dimensions of a drawing surface or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An RGBA colour. `a` is forwarded to the renderer as-is, without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn gray(level: u8, alpha: f64) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
            a: alpha,
        }
    }
}

/// A 2D surface with the handful of primitives the animation needs.
pub trait DrawSurface {
    fn size(&self) -> SurfaceSize;

    /// Resizes the pixel buffer. Existing content may be discarded.
    fn resize(&mut self, size: SurfaceSize);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
    },
}

/// The commands of one rendered frame, in draw order.
///
/// The size is in whole pixels, matching a canvas buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

fn whole_pixels(value: f64) -> u32 {
    value.round().clamp(0.0, u32::MAX as f64) as u32
}

/// A surface that records draw calls instead of rasterizing them.
///
/// The desktop host replays recorded frames on the webview's canvas. Clearing
/// the whole surface starts a new frame and drops anything not yet taken.
#[derive(Debug, Clone)]
pub struct DrawList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    total_commands: u64,
}

impl DrawList {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
            total_commands: 0,
        }
    }

    /// Commands recorded since the last full clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of draw calls received over the surface's lifetime.
    pub fn total_commands(&self) -> u64 {
        self.total_commands
    }

    /// Takes the pending frame, leaving the list empty.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.commands.is_empty() {
            return None;
        }
        Some(Frame {
            width: whole_pixels(self.size.width),
            height: whole_pixels(self.size.height),
            commands: std::mem::take(&mut self.commands),
        })
    }

    fn record(&mut self, command: DrawCommand) {
        self.total_commands += 1;
        self.commands.push(command);
    }
}

impl DrawSurface for DrawList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.clear();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let covers_surface =
            x <= 0.0 && y <= 0.0 && width >= self.size.width && height >= self.size.height;
        if covers_surface {
            self.commands.clear();
        }
        self.record(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.record(DrawCommand::Circle {
            x: center.x,
            y: center.y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba) {
        self.record(DrawCommand::Line { from, to, color });
    }
}
