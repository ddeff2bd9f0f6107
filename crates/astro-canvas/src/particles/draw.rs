use super::mode::FieldMode;
use super::particle::Particle;
use crate::canvas::Canvas2D;

/// Number of fading segments behind a comet head.
pub const COMET_TRAIL_SEGMENTS: usize = 20;
/// Distance between trail segments, in multiples of one tick of velocity.
const COMET_TRAIL_SPACING: f32 = 0.6;

/// Draw one particle. Alpha is always `opacity × (1 − life/max_life)`.
pub fn draw_particle(canvas: &mut dyn Canvas2D, mode: FieldMode, particle: &Particle) {
    let alpha = particle.alpha();
    if alpha <= 0.0 || particle.size <= 0.0 {
        return;
    }
    let color = particle.color.with_alpha(alpha);

    match mode {
        FieldMode::Comet => {
            // Tail: extrapolate backwards along the current heading,
            // oldest segment first so the head paints on top.
            for i in (1..=COMET_TRAIL_SEGMENTS).rev() {
                let t = i as f32 / COMET_TRAIL_SEGMENTS as f32;
                let offset = particle.velocity * (i as f32 * COMET_TRAIL_SPACING);
                canvas.fill_circle(
                    particle.position - offset,
                    particle.size * (1.0 - t * 0.7),
                    color.fade((1.0 - t) * 0.6),
                );
            }
            canvas.fill_circle(particle.position, particle.size, color);
        }
        FieldMode::Aurora => {
            canvas.fill_radial_glow(particle.position, particle.size, color, color.with_alpha(0.0));
        }
        FieldMode::Nebula | FieldMode::SolarWind | FieldMode::Stars => {
            canvas.fill_circle(particle.position, particle.size, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Color, DrawCommand, RecordingCanvas};
    use glam::Vec2;

    fn particle() -> Particle {
        Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(4.0, 0.0),
            size: 2.0,
            opacity: 1.0,
            color: Color::WHITE,
            life: 0.0,
            max_life: 100.0,
        }
    }

    #[test]
    fn comet_draws_trail_plus_head() {
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        draw_particle(&mut canvas, FieldMode::Comet, &particle());
        let circles = canvas.circles();
        assert_eq!(circles.len(), COMET_TRAIL_SEGMENTS + 1);
        // Head last, at full alpha; tail lies behind (smaller x).
        let (head, _, head_color) = circles[COMET_TRAIL_SEGMENTS];
        assert_eq!(head, Vec2::new(100.0, 100.0));
        assert_eq!(head_color.a, 1.0);
        assert!(circles[0].0.x < head.x);
        assert!(circles[0].2.a < head_color.a);
    }

    #[test]
    fn aurora_draws_a_glow() {
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        draw_particle(&mut canvas, FieldMode::Aurora, &particle());
        assert!(matches!(canvas.commands()[0], DrawCommand::RadialGlow { .. }));
    }

    #[test]
    fn alpha_follows_life() {
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        let mut p = particle();
        p.opacity = 0.5;
        p.life = 50.0;
        draw_particle(&mut canvas, FieldMode::Stars, &p);
        let (_, _, color) = canvas.circles()[0];
        assert!((color.a - 0.25).abs() < 1e-6);
    }

    #[test]
    fn dead_particle_draws_nothing() {
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        let mut p = particle();
        p.life = p.max_life;
        draw_particle(&mut canvas, FieldMode::Nebula, &p);
        assert!(canvas.commands().is_empty());
    }
}
