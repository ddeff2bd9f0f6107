//! A single field particle: spawn, step, and boundary policy.

use glam::Vec2;

use super::mode::FieldMode;
use crate::canvas::Color;
use crate::core::rng::Rng;

/// Pointer attraction radius for nebula dust, in pixels.
pub const NEBULA_PULL_RADIUS: f32 = 100.0;
/// Velocity added per tick at zero distance from the pointer.
pub const NEBULA_PULL: f32 = 0.05;
const NEBULA_MAX_SPEED: f32 = 2.0;
const SOLAR_WIND_ACCEL: f32 = 1.01;
const SOLAR_WIND_MAX_SPEED: f32 = 6.0;
/// Off-screen margin comets and solar wind travel before recycling.
pub const EDGE_MARGIN: f32 = 10.0;

/// Per-step inputs shared by every particle of a field.
#[derive(Debug, Clone, Copy)]
pub struct StepEnv {
    /// Seconds since the field started.
    pub elapsed: f32,
    pub width: f32,
    pub height: f32,
    /// Pointer position in canvas pixels, if it is over the canvas.
    pub pointer: Option<Vec2>,
}

impl StepEnv {
    pub fn new(elapsed: f32, width: f32, height: f32, pointer: Option<Vec2>) -> Self {
        Self {
            elapsed: if elapsed.is_finite() { elapsed } else { 0.0 },
            width: sane_extent(width),
            height: sane_extent(height),
            pointer: pointer.filter(|p| p.is_finite()),
        }
    }
}

fn sane_extent(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}

/// Transient visual point. `life` counts ticks up to `max_life`; the
/// rendered alpha is always derived from it (see [`Particle::alpha`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Base opacity chosen at spawn.
    pub opacity: f32,
    pub color: Color,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Create a particle for `mode`. `initial` spreads it across the whole
    /// canvas and gives it a random head start on its life; otherwise it
    /// enters from the mode's spawn edge.
    pub fn spawn(mode: FieldMode, width: f32, height: f32, initial: bool, rng: &mut Rng) -> Self {
        let width = sane_extent(width);
        let height = sane_extent(height);
        let color = rng.pick(mode.palette()).copied().unwrap_or(Color::WHITE);
        let anywhere = Vec2::new(rng.range(0.0, width), rng.range(0.0, height));

        let (position, velocity, size, opacity, max_life) = match mode {
            FieldMode::Stars => (
                anywhere,
                Vec2::new(rng.signed(0.05), rng.signed(0.05)),
                rng.range(0.5, 2.0),
                rng.range(0.4, 1.0),
                rng.range(400.0, 900.0),
            ),
            FieldMode::Nebula => (
                anywhere,
                Vec2::new(rng.signed(0.3), rng.signed(0.3)),
                rng.range(1.0, 4.0),
                rng.range(0.2, 0.6),
                rng.range(300.0, 700.0),
            ),
            FieldMode::Comet => {
                let x = if initial { anywhere.x } else { -EDGE_MARGIN };
                (
                    Vec2::new(x, anywhere.y),
                    Vec2::new(rng.range(2.0, 5.0), rng.signed(0.5)),
                    rng.range(1.5, 3.0),
                    rng.range(0.6, 1.0),
                    rng.range(200.0, 500.0),
                )
            }
            FieldMode::SolarWind => {
                let y = if initial { anywhere.y } else { height + EDGE_MARGIN };
                (
                    Vec2::new(anywhere.x, y),
                    Vec2::new(rng.signed(0.4), -rng.range(1.0, 3.0)),
                    rng.range(1.0, 2.5),
                    rng.range(0.4, 0.9),
                    rng.range(250.0, 600.0),
                )
            }
            FieldMode::Aurora => (
                Vec2::new(anywhere.x, rng.range(height * 0.05, height * 0.45)),
                Vec2::ZERO,
                rng.range(20.0, 50.0),
                rng.range(0.05, 0.2),
                rng.range(300.0, 800.0),
            ),
        };

        let life = if initial { rng.range(0.0, max_life * 0.5) } else { 0.0 };

        Particle {
            position,
            velocity,
            size,
            opacity,
            color,
            life,
            max_life,
        }
    }

    /// Reinitialize this particle in place at the mode's spawn edge.
    pub fn respawn(&mut self, mode: FieldMode, width: f32, height: f32, rng: &mut Rng) {
        *self = Particle::spawn(mode, width, height, false, rng);
    }

    /// Fraction of life consumed, in [0, 1].
    pub fn age(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 1.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Draw alpha: base opacity faded by age.
    pub fn alpha(&self) -> f32 {
        (self.opacity * (1.0 - self.age())).clamp(0.0, 1.0)
    }

    /// Produce the next state.
    ///
    /// Order: mode perturbation, integration, periodic override, then aging
    /// and the boundary policy. Randomness is only consumed on respawn.
    pub fn step(&self, mode: FieldMode, env: &StepEnv, rng: &mut Rng) -> Particle {
        let mut next = *self;

        match mode {
            FieldMode::Nebula => {
                if let Some(pointer) = env.pointer {
                    let delta = pointer - next.position;
                    let dist = delta.length();
                    if dist < NEBULA_PULL_RADIUS && dist > f32::EPSILON {
                        let force = (1.0 - dist / NEBULA_PULL_RADIUS) * NEBULA_PULL;
                        next.velocity += delta / dist * force;
                        next.velocity = next.velocity.clamp_length_max(NEBULA_MAX_SPEED);
                    }
                }
            }
            FieldMode::SolarWind => {
                next.velocity = (next.velocity * SOLAR_WIND_ACCEL).clamp_length_max(SOLAR_WIND_MAX_SPEED);
            }
            FieldMode::Comet | FieldMode::Aurora | FieldMode::Stars => {}
        }

        next.position += next.velocity;

        if mode == FieldMode::Aurora {
            next.velocity = Vec2::new(
                (env.elapsed * 0.5 + next.position.y * 0.01).sin() * 0.5,
                (env.elapsed * 0.3 + next.position.x * 0.01).cos() * 0.2,
            );
        }

        next.life += 1.0;

        let escaped = match mode {
            FieldMode::Comet => {
                next.position.x > env.width + EDGE_MARGIN
                    || next.position.y < -EDGE_MARGIN
                    || next.position.y > env.height + EDGE_MARGIN
            }
            FieldMode::SolarWind => next.position.y < -EDGE_MARGIN,
            _ => false,
        };

        if escaped || next.life >= next.max_life || !next.position.is_finite() || !next.velocity.is_finite() {
            next.respawn(mode, env.width, env.height, rng);
        } else {
            next.contain(mode, env.width, env.height);
        }
        next
    }

    /// Fit the particle into a `width × height` canvas without resetting it:
    /// reflecting modes clamp and bounce, aurora and solar wind wrap
    /// horizontally, comets keep their row on screen.
    pub fn contain(&mut self, mode: FieldMode, width: f32, height: f32) {
        let width = sane_extent(width);
        let height = sane_extent(height);
        match mode {
            FieldMode::Nebula | FieldMode::Stars => {
                if self.position.x < 0.0 {
                    self.position.x = 0.0;
                    self.velocity.x = self.velocity.x.abs();
                } else if self.position.x > width {
                    self.position.x = width;
                    self.velocity.x = -self.velocity.x.abs();
                }
                if self.position.y < 0.0 {
                    self.position.y = 0.0;
                    self.velocity.y = self.velocity.y.abs();
                } else if self.position.y > height {
                    self.position.y = height;
                    self.velocity.y = -self.velocity.y.abs();
                }
            }
            FieldMode::Aurora => {
                self.position.x = self.position.x.rem_euclid(width);
                self.position.y = self.position.y.clamp(0.0, height);
            }
            FieldMode::SolarWind => {
                self.position.x = self.position.x.rem_euclid(width);
            }
            FieldMode::Comet => {
                self.position.y = self.position.y.clamp(-EDGE_MARGIN, height + EDGE_MARGIN);
            }
        }
    }
}
