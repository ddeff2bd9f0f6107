use glam::Vec2;

use super::index_arg;
use crate::api::scene::{CanvasScene, FrameInfo};
use crate::canvas::Canvas2D;
use crate::config::FieldConfig;
use crate::input::InputEvent;
use crate::particles::{FieldMode, ParticleField};

/// Custom event: `a` = index into `FieldMode::ALL`.
pub const SET_MODE: u32 = 1;
/// Custom event: `a` = intensity multiplier.
pub const SET_INTENSITY: u32 = 2;

/// Full-page animated particle backdrop.
pub struct ParticleBackground {
    config: FieldConfig,
    field: Option<ParticleField>,
}

impl ParticleBackground {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config: config.sanitized(),
            field: None,
        }
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn set_mode(&mut self, mode: FieldMode) {
        self.config.mode = mode;
        if let Some(field) = self.field.as_mut() {
            field.set_mode(mode);
        }
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity;
        self.config = self.config.sanitized();
        if let Some(field) = self.field.as_mut() {
            field.set_intensity(intensity);
        }
    }
}

impl CanvasScene for ParticleBackground {
    fn init(&mut self, width: f32, height: f32) {
        self.field = Some(ParticleField::new(&self.config, width, height));
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerMove { x, y } => {
                if let Some(field) = self.field.as_mut() {
                    field.set_pointer(Some(Vec2::new(x, y)));
                }
                false
            }
            InputEvent::PointerLeave => {
                if let Some(field) = self.field.as_mut() {
                    field.set_pointer(None);
                }
                false
            }
            InputEvent::Custom { kind: SET_MODE, a, .. } => {
                match index_arg(a).and_then(|i| FieldMode::ALL.get(i)) {
                    Some(mode) => self.set_mode(*mode),
                    None => log::warn!("background: ignoring unknown mode index {a}"),
                }
                true
            }
            InputEvent::Custom { kind: SET_INTENSITY, a, .. } => {
                self.set_intensity(a);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, frame: &FrameInfo) {
        if let Some(field) = self.field.as_mut() {
            field.step(frame.elapsed);
        }
    }

    fn draw(&mut self, canvas: &mut dyn Canvas2D) {
        canvas.clear();
        if let Some(field) = self.field.as_ref() {
            field.draw(canvas);
        }
    }

    fn resize(&mut self, width: f32, height: f32) {
        if let Some(field) = self.field.as_mut() {
            field.resize(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::runner::SceneRunner;
    use crate::canvas::RecordingCanvas;

    fn runner(mode: FieldMode) -> SceneRunner<ParticleBackground, RecordingCanvas> {
        let config = FieldConfig { mode, ..FieldConfig::default() };
        let mut runner = SceneRunner::new(ParticleBackground::new(config));
        runner.mount(Some(RecordingCanvas::new(800.0, 600.0)));
        runner
    }

    #[test]
    fn mount_populates_field() {
        let runner = runner(FieldMode::Stars);
        let field = runner.scene().field().unwrap();
        assert_eq!(field.len(), FieldMode::Stars.base_count());
        assert_eq!(field.size(), (800.0, 600.0));
    }

    #[test]
    fn mode_switch_via_custom_event() {
        let mut runner = runner(FieldMode::Nebula);
        runner.push_input(InputEvent::Custom { kind: SET_MODE, a: 1.0, b: 0.0, c: 0.0 });
        runner.tick(0.0);
        let field = runner.scene().field().unwrap();
        assert_eq!(field.mode(), FieldMode::Comet);
        assert_eq!(field.len(), FieldMode::Comet.base_count());
    }

    #[test]
    fn unknown_mode_index_keeps_current_mode() {
        let mut runner = runner(FieldMode::Aurora);
        runner.push_input(InputEvent::Custom { kind: SET_MODE, a: 42.0, b: 0.0, c: 0.0 });
        runner.push_input(InputEvent::Custom { kind: SET_MODE, a: -1.0, b: 0.0, c: 0.0 });
        runner.tick(0.0);
        assert_eq!(runner.scene().field().unwrap().mode(), FieldMode::Aurora);
    }

    #[test]
    fn zero_intensity_draws_empty_frame() {
        let mut runner = runner(FieldMode::Nebula);
        runner.push_input(InputEvent::Custom { kind: SET_INTENSITY, a: 0.0, b: 0.0, c: 0.0 });
        assert!(runner.tick(0.0));
        assert!(runner.scene().field().unwrap().is_empty());
        assert_eq!(runner.canvas().unwrap().last_frame().len(), 1);
    }

    #[test]
    fn ticking_keeps_particles_on_canvas() {
        let mut runner = runner(FieldMode::Stars);
        runner.tick(0.0);
        for i in 1..=120 {
            runner.tick(i as f64 * 16.7);
        }
        for p in runner.scene().field().unwrap().particles() {
            assert!((0.0..=800.0).contains(&p.position.x));
            assert!((0.0..=600.0).contains(&p.position.y));
        }
    }
}
