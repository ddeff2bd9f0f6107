//! Particle field engine for the animated background.
//!
//! A field owns its particles and its RNG; each tick every particle is
//! stepped in place, then the whole field is drawn.

mod draw;
mod mode;
mod particle;

pub use draw::{draw_particle, COMET_TRAIL_SEGMENTS};
pub use mode::{FieldMode, UnknownMode};
pub use particle::{Particle, StepEnv, EDGE_MARGIN, NEBULA_PULL, NEBULA_PULL_RADIUS};

use glam::Vec2;

use crate::canvas::Canvas2D;
use crate::config::{clamp_intensity, FieldConfig};
use crate::core::rng::Rng;

/// Populate a field: `floor(base_count(mode) × intensity)` particles spread
/// over the canvas. Non-positive intensity yields an empty field.
pub fn initialize(mode: FieldMode, intensity: f32, width: f32, height: f32, rng: &mut Rng) -> Vec<Particle> {
    let count = (mode.base_count() as f32 * clamp_intensity(intensity)).floor() as usize;
    (0..count)
        .map(|_| Particle::spawn(mode, width, height, true, rng))
        .collect()
}

/// A canvas-filling field of particles in one visual mode.
pub struct ParticleField {
    mode: FieldMode,
    intensity: f32,
    particles: Vec<Particle>,
    rng: Rng,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
}

impl ParticleField {
    pub fn new(config: &FieldConfig, width: f32, height: f32) -> Self {
        let config = config.sanitized();
        let mut rng = Rng::new(config.seed);
        let particles = initialize(config.mode, config.intensity, width, height, &mut rng);
        log::debug!(
            "particle field: {} × {} particles ({}x{})",
            config.mode,
            particles.len(),
            width,
            height
        );
        Self {
            mode: config.mode,
            intensity: config.intensity,
            particles,
            rng,
            width,
            height,
            pointer: None,
        }
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Read-only pointer input for the nebula attraction effect.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Switch visual mode. Repopulates the field.
    pub fn set_mode(&mut self, mode: FieldMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.repopulate();
    }

    /// Change population density. Repopulates the field.
    pub fn set_intensity(&mut self, intensity: f32) {
        let intensity = clamp_intensity(intensity);
        if intensity == self.intensity {
            return;
        }
        self.intensity = intensity;
        self.repopulate();
    }

    fn repopulate(&mut self) {
        self.particles = initialize(self.mode, self.intensity, self.width, self.height, &mut self.rng);
        log::debug!("particle field: repopulated {} with {} particles", self.mode, self.particles.len());
    }

    /// Follow a canvas resize. Particles keep their state and are only
    /// clamped or wrapped into the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        for p in self.particles.iter_mut() {
            p.contain(self.mode, width, height);
        }
    }

    /// Advance every particle by one tick. `elapsed` is seconds since start.
    pub fn step(&mut self, elapsed: f32) {
        let env = StepEnv::new(elapsed, self.width, self.height, self.pointer);
        let mode = self.mode;
        for p in self.particles.iter_mut() {
            *p = p.step(mode, &env, &mut self.rng);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        for p in &self.particles {
            draw_particle(canvas, self.mode, p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    fn config(mode: FieldMode, intensity: f32) -> FieldConfig {
        FieldConfig { mode, intensity, seed: 42 }
    }

    #[test]
    fn population_scales_with_intensity() {
        let mut rng = Rng::new(1);
        assert_eq!(initialize(FieldMode::Nebula, 1.0, 800.0, 600.0, &mut rng).len(), 80);
        assert_eq!(initialize(FieldMode::Comet, 1.5, 800.0, 600.0, &mut rng).len(), 36);
        // floor(24 × 0.3) = 7
        assert_eq!(initialize(FieldMode::Comet, 0.3, 800.0, 600.0, &mut rng).len(), 7);
    }

    #[test]
    fn non_positive_intensity_is_empty() {
        let mut rng = Rng::new(1);
        assert!(initialize(FieldMode::Stars, 0.0, 800.0, 600.0, &mut rng).is_empty());
        assert!(initialize(FieldMode::Stars, -2.0, 800.0, 600.0, &mut rng).is_empty());
        assert!(initialize(FieldMode::Stars, f32::NAN, 800.0, 600.0, &mut rng).is_empty());

        let field = ParticleField::new(&config(FieldMode::Stars, -1.0), 800.0, 600.0);
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        field.draw(&mut canvas);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = ParticleField::new(&config(FieldMode::Aurora, 1.0), 800.0, 600.0);
        let mut b = ParticleField::new(&config(FieldMode::Aurora, 1.0), 800.0, 600.0);
        for t in 0..100 {
            a.step(t as f32 / 60.0);
            b.step(t as f32 / 60.0);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn resize_clamps_without_resetting() {
        let mut field = ParticleField::new(&config(FieldMode::Stars, 1.0), 800.0, 600.0);
        let before: Vec<Particle> = field.particles().to_vec();
        field.resize(400.0, 300.0);
        for (old, new) in before.iter().zip(field.particles()) {
            assert!(new.position.x <= 400.0 && new.position.y <= 300.0);
            assert_eq!(new.life, old.life, "resize must not respawn");
            if old.position.x <= 400.0 && old.position.y <= 300.0 {
                assert_eq!(new.position, old.position);
            }
        }
    }

    #[test]
    fn mode_change_repopulates() {
        let mut field = ParticleField::new(&config(FieldMode::Nebula, 1.0), 800.0, 600.0);
        assert_eq!(field.len(), 80);
        field.set_mode(FieldMode::Stars);
        assert_eq!(field.len(), 160);
        field.set_intensity(0.5);
        assert_eq!(field.len(), 80);
        field.set_intensity(-3.0);
        assert!(field.is_empty());
    }

    #[test]
    fn pointer_attracts_nebula_field() {
        let mut field = ParticleField::new(&config(FieldMode::Nebula, 1.0), 800.0, 600.0);
        field.set_pointer(Some(Vec2::new(400.0, 300.0)));
        for t in 0..60 {
            field.step(t as f32 / 60.0);
        }
        assert!(field.particles().iter().all(|p| p.position.is_finite()));
    }
}
