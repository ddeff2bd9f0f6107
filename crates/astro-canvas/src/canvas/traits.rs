//! Drawing contract shared by every host.
//!
//! The surface mirrors the subset of the browser's `CanvasRenderingContext2D`
//! the portal uses. The wasm bridge implements it over `web_sys`, tests use
//! [`RecordingCanvas`](super::RecordingCanvas).

use glam::Vec2;

use super::color::Color;

/// Horizontal text anchoring, as in `ctx.textAlign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size_px: f32, color: Color) -> Self {
        Self { size_px, color, align: TextAlign::Left }
    }

    pub const fn centered(self) -> Self {
        Self { align: TextAlign::Center, ..self }
    }

    pub const fn right(self) -> Self {
        Self { align: TextAlign::Right, ..self }
    }
}

/// A 2D drawing surface owned by exactly one host at a time.
pub trait Canvas2D {
    /// Current backing size in pixels.
    fn size(&self) -> (f32, f32);

    /// Resize the backing store. Implementations may clear the surface.
    fn set_size(&mut self, width: f32, height: f32);

    /// `clearRect` over the full surface.
    fn clear(&mut self);

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Color);

    /// Rectangle filled with a top-to-bottom linear gradient.
    fn fill_vertical_gradient(&mut self, origin: Vec2, extent: Vec2, top: Color, bottom: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Radial gradient disc fading from `inner` at the center to `outer` at `radius`.
    fn fill_radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    fn fill_text(&mut self, text: &str, position: Vec2, style: TextStyle);
}
