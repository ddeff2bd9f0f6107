use glam::{Vec2, Vec3};

use super::position::PositionedEvent;
use crate::config::{clamp_zoom, TimelineConfig};

/// Marker size at zero depth and zoom 1.
pub const BASE_SIZE: f32 = 8.0;
/// Size added per unit of rotated depth.
pub const DEPTH_FACTOR: f32 = 0.02;
/// Vertical squash applied to the event height.
pub const VERTICAL_FACTOR: f32 = 0.3;
const MIN_SIZE: f32 = 1.0;

/// Where an event lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen: Vec2,
    pub size: f32,
    /// Rotated z; larger is nearer the viewer.
    pub depth: f32,
}

/// Rotate `(x, z)` by `rotation`, scale by `zoom`, and translate to `center`.
pub fn project(position: Vec3, rotation: f32, zoom: f32, center: Vec2) -> Projection {
    let zoom = clamp_zoom(zoom);
    let (sin, cos) = rotation.sin_cos();
    let rx = position.x * cos - position.z * sin;
    let rz = position.x * sin + position.z * cos;
    Projection {
        screen: Vec2::new(
            center.x + rx * zoom,
            center.y + position.y * zoom * VERTICAL_FACTOR,
        ),
        size: ((BASE_SIZE + rz * DEPTH_FACTOR) * zoom).max(MIN_SIZE),
        depth: rz,
    }
}

/// Rotating camera over the timeline spiral.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineProjector {
    rotation: f32,
    zoom: f32,
    running: bool,
    increment: f32,
}

impl TimelineProjector {
    pub fn new(config: &TimelineConfig) -> Self {
        let config = config.sanitized();
        Self {
            rotation: 0.0,
            zoom: config.zoom,
            running: config.auto_rotate,
            increment: config.rotation_speed,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One animation frame: advance the angle while running.
    pub fn tick(&mut self) {
        if self.running {
            self.rotation = (self.rotation + self.increment).rem_euclid(std::f32::consts::TAU);
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        if rotation.is_finite() {
            self.rotation = rotation.rem_euclid(std::f32::consts::TAU);
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Multiply zoom by `factor` (scroll wheel), staying within limits.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.set_zoom(self.zoom * factor);
        }
    }

    pub fn project(&self, event: &PositionedEvent, center: Vec2) -> Projection {
        project(event.position, self.rotation, self.zoom, center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::position::spiral_position;

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    #[test]
    fn slot_zero_projects_to_known_point() {
        let p = project(spiral_position(0), 0.0, 1.0, CENTER);
        assert_eq!(p.screen, Vec2::new(550.0, 300.0));
        assert_eq!(p.size, BASE_SIZE);
    }

    #[test]
    fn height_is_squashed() {
        let p = project(Vec3::new(0.0, 100.0, 0.0), 0.0, 2.0, CENTER);
        assert_eq!(p.screen, Vec2::new(400.0, 300.0 + 100.0 * 2.0 * VERTICAL_FACTOR));
    }

    #[test]
    fn quarter_turn_moves_x_into_depth() {
        let p = project(Vec3::new(150.0, 0.0, 0.0), std::f32::consts::FRAC_PI_2, 1.0, CENTER);
        assert!((p.screen.x - 400.0).abs() < 1e-3);
        assert!((p.depth - 150.0).abs() < 1e-3);
        assert!((p.size - (BASE_SIZE + 150.0 * DEPTH_FACTOR)).abs() < 1e-4);
    }

    #[test]
    fn zero_zoom_is_clamped() {
        let p = project(spiral_position(0), 0.0, 0.0, CENTER);
        assert!(p.size >= 1.0);
        assert!(p.screen.x > CENTER.x);
    }

    #[test]
    fn pause_freezes_angle_exactly() {
        let mut cam = TimelineProjector::new(&TimelineConfig::default());
        for _ in 0..10 {
            cam.tick();
        }
        let frozen = cam.rotation();
        cam.pause();
        for _ in 0..100 {
            cam.tick();
        }
        assert_eq!(cam.rotation(), frozen);
        cam.resume();
        cam.tick();
        assert!((cam.rotation() - (frozen + 0.005)).abs() < 1e-6);
    }

    #[test]
    fn zoom_by_respects_limits() {
        let mut cam = TimelineProjector::new(&TimelineConfig::default());
        for _ in 0..100 {
            cam.zoom_by(1.5);
        }
        assert_eq!(cam.zoom(), crate::config::MAX_ZOOM);
        cam.zoom_by(0.0);
        assert_eq!(cam.zoom(), crate::config::MAX_ZOOM);
    }
}
