/// Upper bound on fixed steps per frame, so a long-hidden tab cannot
/// trigger a spiral of catch-up ticks.
const MAX_STEPS_PER_FRAME: u32 = 10;
/// Smallest accepted tick length in seconds.
const MIN_TICK_DT: f32 = 1.0 / 1000.0;

/// Explicit animation loop state: `{last_timestamp, running}` plus a
/// fixed-timestep accumulator.
///
/// The browser hands us `requestAnimationFrame` timestamps in milliseconds.
/// `advance` converts them into a whole number of fixed ticks so that
/// per-tick pixel velocities mean the same thing at 30 Hz and 144 Hz.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    tick_dt: f32,
    accumulator: f32,
    last_timestamp: Option<f64>,
    running: bool,
    elapsed: f64,
}

impl FrameLoop {
    pub fn new(tick_dt: f32) -> Self {
        Self {
            tick_dt: tick_dt.max(MIN_TICK_DT),
            accumulator: 0.0,
            last_timestamp: None,
            running: false,
            elapsed: 0.0,
        }
    }

    /// Begin (or resume) ticking. The first timestamp after a start only
    /// primes the clock; no time is credited for the paused interval.
    pub fn start(&mut self) {
        self.running = true;
        self.last_timestamp = None;
    }

    /// Stop ticking. Simulated time freezes exactly where it is.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed a frame timestamp (milliseconds). Returns the number of fixed
    /// ticks to run this frame.
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let frame_dt = match self.last_timestamp {
            Some(prev) if timestamp_ms > prev => ((timestamp_ms - prev) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);

        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.tick_dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.tick_dt) as u32;
        self.accumulator -= steps as f32 * self.tick_dt;
        self.elapsed += steps as f64 * self.tick_dt as f64;
        steps
    }

    /// Simulated seconds since the loop was created (only running time counts).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Interpolation alpha between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick_dt
    }

    pub fn tick_dt(&self) -> f32 {
        self.tick_dt
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> FrameLoop {
        let mut fl = FrameLoop::new(1.0 / 60.0);
        fl.start();
        fl
    }

    #[test]
    fn stopped_loop_never_ticks() {
        let mut fl = FrameLoop::new(1.0 / 60.0);
        assert_eq!(fl.advance(0.0), 0);
        assert_eq!(fl.advance(1000.0), 0);
    }

    #[test]
    fn first_timestamp_only_primes() {
        let mut fl = running();
        assert_eq!(fl.advance(5000.0), 0);
        assert_eq!(fl.advance(5000.0 + 1000.0 / 60.0 + 0.01), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut fl = running();
        fl.advance(0.0);
        assert_eq!(fl.advance(8.0), 0); // half a tick
        assert_eq!(fl.advance(18.0), 1); // over one tick total
    }

    #[test]
    fn caps_steps_per_frame() {
        let mut fl = running();
        fl.advance(0.0);
        assert_eq!(fl.advance(1000.0), MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn stop_freezes_elapsed_and_resume_does_not_jump() {
        let mut fl = running();
        fl.advance(0.0);
        fl.advance(100.0);
        let frozen = fl.elapsed();
        fl.stop();
        assert_eq!(fl.advance(10_000.0), 0);
        assert_eq!(fl.elapsed(), frozen);

        fl.start();
        assert_eq!(fl.advance(20_000.0), 0);
        assert_eq!(fl.elapsed(), frozen);
    }

    #[test]
    fn backwards_timestamp_is_ignored() {
        let mut fl = running();
        fl.advance(100.0);
        assert_eq!(fl.advance(50.0), 0);
        assert!(fl.alpha() >= 0.0 && fl.alpha() <= 1.0);
    }

    #[test]
    fn tiny_tick_dt_is_clamped() {
        let fl = FrameLoop::new(0.0);
        assert!(fl.tick_dt() > 0.0);
    }
}
