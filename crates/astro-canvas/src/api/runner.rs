use crate::canvas::Canvas2D;
use crate::core::frame::FrameLoop;
use crate::input::{InputEvent, InputQueue};

use super::scene::{CanvasScene, FrameInfo};

/// Drives one [`CanvasScene`] against one canvas.
///
/// The bridge keeps runners in a `thread_local!` registry and forwards
/// `requestAnimationFrame` timestamps to [`SceneRunner::tick`]. A runner
/// without a canvas is inert: ticks, input and resizes are accepted and
/// ignored.
pub struct SceneRunner<S: CanvasScene, C: Canvas2D> {
    scene: S,
    canvas: Option<C>,
    input: InputQueue,
    frame: FrameLoop,
    tick: u64,
    dirty: bool,
}

impl<S: CanvasScene, C: Canvas2D> SceneRunner<S, C> {
    pub fn new(scene: S) -> Self {
        let config = scene.config();
        Self {
            scene,
            canvas: None,
            input: InputQueue::new(),
            frame: FrameLoop::new(config.tick_dt),
            tick: 0,
            dirty: false,
        }
    }

    /// Attach a canvas and start the loop. Returns `false` (and stays inert)
    /// when the canvas could not be acquired.
    pub fn mount(&mut self, canvas: Option<C>) -> bool {
        let Some(canvas) = canvas else {
            log::warn!("canvas unavailable; scene stays unmounted");
            return false;
        };
        let (width, height) = canvas.size();
        self.scene.init(width, height);
        self.canvas = Some(canvas);
        self.tick = 0;
        self.dirty = true;
        self.frame.start();
        log::info!("scene mounted at {width}x{height}");
        true
    }

    /// Stop the loop and release the canvas. Later ticks are no-ops.
    pub fn unmount(&mut self) {
        if self.canvas.take().is_some() {
            log::info!("scene unmounted after {} ticks", self.tick);
        }
        self.frame.stop();
        self.input.clear();
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_running()
    }

    /// Freeze simulated time. Input still repaints.
    pub fn pause(&mut self) {
        self.frame.stop();
    }

    /// Resume from exactly where `pause` left off.
    pub fn resume(&mut self) {
        if self.is_mounted() && !self.frame.is_running() {
            self.frame.start();
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        if self.is_mounted() {
            self.input.push(event);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let Some(canvas) = self.canvas.as_mut() else { return };
        let width = width.max(1.0);
        let height = height.max(1.0);
        canvas.set_size(width, height);
        self.scene.resize(width, height);
        self.dirty = true;
    }

    /// Run one animation frame. Returns `true` when the canvas was repainted.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };

        let mut dirty = std::mem::take(&mut self.dirty);
        for event in self.input.drain() {
            dirty |= self.scene.handle_input(&event);
        }

        let steps = self.frame.advance(timestamp_ms);
        let dt = self.frame.tick_dt();
        let first = self.frame.elapsed() - f64::from(steps) * f64::from(dt);
        for step in 1..=steps {
            self.tick += 1;
            let info = FrameInfo {
                elapsed: (first + f64::from(step) * f64::from(dt)) as f32,
                dt,
                tick: self.tick,
            };
            self.scene.update(&info);
        }
        if steps > 0 && self.scene.needs_redraw() {
            dirty = true;
        }

        if dirty {
            self.scene.draw(canvas);
        }
        dirty
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Direct scene access for bridge calls that are not input events
    /// (search strings, catalog swaps). Marks the frame dirty.
    pub fn scene_mut(&mut self) -> &mut S {
        self.dirty = true;
        &mut self.scene
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }
}
