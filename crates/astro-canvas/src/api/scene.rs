use crate::canvas::Canvas2D;
use crate::config::SceneConfig;
use crate::input::InputEvent;

/// Timing handed to [`CanvasScene::update`] once per fixed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Simulated seconds since mount, counting only running time.
    pub elapsed: f32,
    /// Fixed tick length in seconds.
    pub dt: f32,
    /// Tick counter since mount, starting at 1.
    pub tick: u64,
}

/// The contract every canvas host fulfills.
///
/// A scene owns its items and knows how to advance and paint them. It never
/// owns the canvas; the [`SceneRunner`](super::runner::SceneRunner) lends it
/// one for the duration of a draw.
pub trait CanvasScene {
    /// Scheduling configuration. Called once before init.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Build items for a canvas of the given size.
    fn init(&mut self, width: f32, height: f32);

    /// React to pointer, wheel, key or UI events. Return `true` when the
    /// visible state changed and the scene must be repainted.
    fn handle_input(&mut self, _event: &InputEvent) -> bool {
        false
    }

    /// Advance one fixed tick.
    fn update(&mut self, frame: &FrameInfo);

    /// Whether ticking changes the picture. Static scenes (charts between
    /// samples, the sky map) return `false` and only repaint on input.
    fn needs_redraw(&self) -> bool {
        true
    }

    /// Paint the current state. Must be idempotent for unchanged state.
    fn draw(&mut self, canvas: &mut dyn Canvas2D);

    /// The canvas changed size. Items are kept, not rebuilt.
    fn resize(&mut self, width: f32, height: f32);
}
