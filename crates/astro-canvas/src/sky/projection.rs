//! Horizontal (azimuth/altitude) to canvas mapping.
//!
//! Zenith sits at the canvas center and the horizon is a circle around it;
//! altitude falls off linearly with radius. North is up at hour 0 and the
//! whole dome turns 15° per hour plus the observer's longitude.

use glam::Vec2;

/// Gap between the horizon circle and the nearest canvas edge.
pub const HORIZON_MARGIN: f32 = 30.0;

/// Observer location. Latitude is clamped to ±90°, longitude to ±180°.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observer {
    pub latitude: f32,
    pub longitude: f32,
}

impl Observer {
    pub fn new(latitude: f32, longitude: f32) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            latitude: finite(latitude).clamp(-90.0, 90.0),
            longitude: finite(longitude).clamp(-180.0, 180.0),
        }
    }

    /// Build from optional coordinates; missing location means (0, 0).
    pub fn from_parts(latitude: Option<f32>, longitude: Option<f32>) -> Self {
        Self::new(latitude.unwrap_or(0.0), longitude.unwrap_or(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyProjection {
    pub center: Vec2,
    pub horizon_radius: f32,
    /// Dome rotation in degrees.
    pub rotation_deg: f32,
}

impl SkyProjection {
    pub fn new(width: f32, height: f32, hours: f32, observer: Observer) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        let hours = if hours.is_finite() { hours } else { 0.0 };
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            horizon_radius: (width.min(height) / 2.0 - HORIZON_MARGIN).max(1.0),
            rotation_deg: (hours * 15.0 + observer.longitude).rem_euclid(360.0),
        }
    }

    /// Radius of the circle of constant `altitude_deg`.
    pub fn ring_radius(&self, altitude_deg: f32) -> f32 {
        (90.0 - altitude_deg.clamp(0.0, 90.0)) / 90.0 * self.horizon_radius
    }

    /// Screen position of a point on the dome, or `None` below the horizon.
    pub fn project(&self, azimuth_deg: f32, altitude_deg: f32) -> Option<Vec2> {
        if !(altitude_deg >= 0.0) || !azimuth_deg.is_finite() {
            return None;
        }
        let r = self.ring_radius(altitude_deg);
        let theta = (azimuth_deg + self.rotation_deg - 90.0).to_radians();
        Some(self.center + Vec2::new(theta.cos(), theta.sin()) * r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn zenith_is_center() {
        let p = SkyProjection::new(800.0, 600.0, 0.0, Observer::default());
        assert!(approx(p.project(123.0, 90.0).unwrap(), Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn north_horizon_is_straight_up_at_midnight() {
        let p = SkyProjection::new(800.0, 600.0, 0.0, Observer::default());
        // radius = 300 - 30 = 270
        assert!(approx(p.project(0.0, 0.0).unwrap(), Vec2::new(400.0, 30.0)));
        assert!(approx(p.project(90.0, 0.0).unwrap(), Vec2::new(670.0, 300.0)));
    }

    #[test]
    fn six_hours_turns_a_quarter() {
        let p = SkyProjection::new(800.0, 600.0, 6.0, Observer::default());
        assert!(approx(p.project(0.0, 0.0).unwrap(), Vec2::new(670.0, 300.0)));
        let shifted = SkyProjection::new(800.0, 600.0, 0.0, Observer::new(10.0, 90.0));
        assert!(approx(shifted.project(0.0, 0.0).unwrap(), Vec2::new(670.0, 300.0)));
    }

    #[test]
    fn below_horizon_is_hidden() {
        let p = SkyProjection::new(800.0, 600.0, 0.0, Observer::default());
        assert!(p.project(10.0, -0.1).is_none());
        assert!(p.project(10.0, f32::NAN).is_none());
    }

    #[test]
    fn tiny_canvas_keeps_positive_radius() {
        let p = SkyProjection::new(10.0, 10.0, 0.0, Observer::default());
        assert!(p.horizon_radius >= 1.0);
    }

    #[test]
    fn observer_is_clamped() {
        let o = Observer::new(200.0, f32::NAN);
        assert_eq!(o.latitude, 90.0);
        assert_eq!(o.longitude, 0.0);
    }
}
