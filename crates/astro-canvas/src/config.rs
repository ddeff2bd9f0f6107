//! Host configuration, loaded from JSON handed over by the page.
//!
//! Every struct is `#[serde(default)]`, so partial documents work, and
//! exposes `sanitized()` to clamp out-of-range values to safe ones.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::particles::FieldMode;

/// Upper bound on the particle population multiplier.
pub const MAX_INTENSITY: f32 = 4.0;
/// Timeline zoom limits.
pub const MIN_ZOOM: f32 = 0.2;
pub const MAX_ZOOM: f32 = 5.0;

/// Clamp an intensity factor into `[0, MAX_INTENSITY]`. NaN becomes 0.
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        return 0.0;
    }
    intensity.clamp(0.0, MAX_INTENSITY)
}

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`. Non-finite becomes 1.
pub fn clamp_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, ConfigError> {
    serde_json::from_str(json).map_err(ConfigError::Parse)
}

/// Frame timing for a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed tick length in seconds (default: 1/60).
    pub tick_dt: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { tick_dt: 1.0 / 60.0 }
    }
}

/// Particle background settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub mode: FieldMode,
    /// Population multiplier applied to the mode's base count.
    pub intensity: f32,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mode: FieldMode::Nebula,
            intensity: 1.0,
            seed: 42,
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse(json)
    }

    pub fn sanitized(&self) -> Self {
        Self {
            intensity: clamp_intensity(self.intensity),
            ..self.clone()
        }
    }
}

/// Which sky map layers are drawn (and pickable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyLayers {
    pub stars: bool,
    pub planets: bool,
    pub satellites: bool,
    pub deep_sky: bool,
    pub constellations: bool,
    pub labels: bool,
    pub grid: bool,
}

impl Default for SkyLayers {
    fn default() -> Self {
        Self {
            stars: true,
            planets: true,
            satellites: true,
            deep_sky: true,
            constellations: true,
            labels: true,
            grid: true,
        }
    }
}

impl SkyLayers {
    /// Toggle a layer by its bridge index: stars, planets, satellites,
    /// deep-sky, constellations, labels, grid. Returns `false` for an
    /// unknown index.
    pub fn set_by_index(&mut self, index: usize, on: bool) -> bool {
        let slot = match index {
            0 => &mut self.stars,
            1 => &mut self.planets,
            2 => &mut self.satellites,
            3 => &mut self.deep_sky,
            4 => &mut self.constellations,
            5 => &mut self.labels,
            6 => &mut self.grid,
            _ => return false,
        };
        *slot = on;
        true
    }
}

/// Sky map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Hours past local midnight; the sky turns 15° per hour.
    pub hours: f32,
    /// Observer latitude in degrees, if known.
    pub latitude: Option<f32>,
    /// Observer longitude in degrees, if known.
    pub longitude: Option<f32>,
    pub layers: SkyLayers,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            hours: 21.0,
            latitude: None,
            longitude: None,
            layers: SkyLayers::default(),
        }
    }
}

impl SkyConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse(json)
    }

    pub fn sanitized(&self) -> Self {
        let hours = if self.hours.is_finite() { self.hours.rem_euclid(24.0) } else { 0.0 };
        Self {
            hours,
            latitude: self.latitude.filter(|v| v.is_finite()).map(|v| v.clamp(-90.0, 90.0)),
            longitude: self.longitude.filter(|v| v.is_finite()).map(|v| v.clamp(-180.0, 180.0)),
            layers: self.layers,
        }
    }
}

/// 3D timeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Camera rotation per tick, in radians.
    pub rotation_speed: f32,
    pub zoom: f32,
    pub auto_rotate: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.005,
            zoom: 1.0,
            auto_rotate: true,
        }
    }
}

impl TimelineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        parse(json)
    }

    pub fn sanitized(&self) -> Self {
        let rotation_speed = if self.rotation_speed.is_finite() {
            self.rotation_speed.clamp(-0.1, 0.1)
        } else {
            0.0
        };
        Self {
            rotation_speed,
            zoom: clamp_zoom(self.zoom),
            auto_rotate: self.auto_rotate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_field_config_uses_defaults() {
        let cfg = FieldConfig::from_json(r#"{ "mode": "comet" }"#).unwrap();
        assert_eq!(cfg.mode, FieldMode::Comet);
        assert_eq!(cfg.intensity, 1.0);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(FieldConfig::from_json("{ mode: ").is_err());
        assert!(FieldConfig::from_json(r#"{ "mode": "plasma" }"#).is_err());
    }

    #[test]
    fn intensity_is_clamped() {
        let cfg = FieldConfig { intensity: -3.0, ..FieldConfig::default() }.sanitized();
        assert_eq!(cfg.intensity, 0.0);
        let cfg = FieldConfig { intensity: 100.0, ..FieldConfig::default() }.sanitized();
        assert_eq!(cfg.intensity, MAX_INTENSITY);
    }

    #[test]
    fn zoom_is_clamped_to_safe_minimum() {
        assert_eq!(clamp_zoom(0.0), MIN_ZOOM);
        assert_eq!(clamp_zoom(-1.0), MIN_ZOOM);
        assert_eq!(clamp_zoom(f32::INFINITY), 1.0);
        let cfg = TimelineConfig { zoom: 0.0, ..TimelineConfig::default() }.sanitized();
        assert_eq!(cfg.zoom, MIN_ZOOM);
    }

    #[test]
    fn sky_config_sanitizes_observer() {
        let cfg = SkyConfig::from_json(r#"{ "hours": 26, "latitude": 120, "longitude": -10 }"#)
            .unwrap()
            .sanitized();
        assert_eq!(cfg.hours, 2.0);
        assert_eq!(cfg.latitude, Some(90.0));
        assert_eq!(cfg.longitude, Some(-10.0));
        assert!(cfg.layers.stars);
    }

    #[test]
    fn layers_toggle_by_index() {
        let mut layers = SkyLayers::default();
        assert!(layers.set_by_index(3, false));
        assert!(!layers.deep_sky);
        assert!(!layers.set_by_index(7, false));
        assert_eq!(layers, SkyLayers { deep_sky: false, ..SkyLayers::default() });
    }
}
