use glam::Vec2;

use super::color::Color;
use super::traits::{Canvas2D, TextStyle};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { origin: Vec2, extent: Vec2, color: Color },
    VerticalGradient { origin: Vec2, extent: Vec2, top: Color, bottom: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, width: f32, color: Color },
    RadialGlow { center: Vec2, radius: f32, inner: Color, outer: Color },
    Polyline { points: Vec<Vec2>, width: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Text { text: String, position: Vec2, style: TextStyle },
}

/// Headless canvas that records every call into a flat command list.
///
/// Two renders are pixel-identical exactly when their command lists are equal,
/// which is what the idempotence tests compare.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(256),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands since the most recent `clear`, i.e. the current frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// All text drawn in the current frame.
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Filled circles in the current frame.
    pub fn circles(&self) -> Vec<(Vec2, f32, Color)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas2D for RecordingCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { origin, extent, color });
    }

    fn fill_vertical_gradient(&mut self, origin: Vec2, extent: Vec2, top: Color, bottom: Color) {
        self.commands.push(DrawCommand::VerticalGradient { origin, extent, top, bottom });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, width, color });
    }

    fn fill_radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        self.commands.push(DrawCommand::RadialGlow { center, radius, inner, outer });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), width, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), color });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text { text: text.to_string(), position, style });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_frame_starts_at_most_recent_clear() {
        let mut c = RecordingCanvas::new(100.0, 100.0);
        c.clear();
        c.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);
        c.clear();
        c.fill_text("hi", Vec2::ZERO, TextStyle::new(12.0, Color::WHITE));
        assert_eq!(c.last_frame().len(), 2);
        assert!(c.circles().is_empty());
        assert_eq!(c.texts(), vec!["hi"]);
    }

    #[test]
    fn take_drains() {
        let mut c = RecordingCanvas::new(10.0, 10.0);
        c.clear();
        assert_eq!(c.take().len(), 1);
        assert!(c.commands().is_empty());
    }
}
