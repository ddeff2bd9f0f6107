//! Sky catalog data: bright stars, planets, satellites and deep-sky objects
//! with horizontal coordinates for a mid-northern evening sky.

use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::config::SkyLayers;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    Star,
    Planet,
    Satellite,
    DeepSky,
}

impl ObjectKind {
    /// Whether this kind's layer is switched on.
    pub fn is_visible(self, layers: &SkyLayers) -> bool {
        match self {
            ObjectKind::Star => layers.stars,
            ObjectKind::Planet => layers.planets,
            ObjectKind::Satellite => layers.satellites,
            ObjectKind::DeepSky => layers.deep_sky,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub name: String,
    pub kind: ObjectKind,
    /// Degrees clockwise from north.
    pub azimuth_deg: f32,
    /// Degrees above the horizon.
    pub altitude_deg: f32,
    /// Apparent magnitude (lower is brighter).
    pub magnitude: f32,
    pub color: Color,
}

/// Stick-figure line through catalog objects (indices into `objects`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub name: String,
    pub path: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyCatalog {
    pub objects: Vec<CelestialObject>,
    #[serde(default)]
    pub constellations: Vec<Constellation>,
}

impl SkyCatalog {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CelestialObject> {
        self.objects.get(index)
    }

    /// Built-in catalog used when the page does not provide one.
    pub fn builtin() -> Self {
        fn obj(name: &str, kind: ObjectKind, az: f32, alt: f32, mag: f32, color: Color) -> CelestialObject {
            CelestialObject {
                name: name.to_string(),
                kind,
                azimuth_deg: az,
                altitude_deg: alt,
                magnitude: mag,
                color,
            }
        }
        use ObjectKind::*;
        let white = Color::rgb(1.0, 1.0, 1.0);
        let blue = Color::rgb(0.72, 0.82, 1.0);
        let orange = Color::rgb(1.0, 0.72, 0.45);
        let red = Color::rgb(1.0, 0.5, 0.38);
        let yellow = Color::rgb(1.0, 0.93, 0.7);

        let objects = vec![
            obj("Sirius", Star, 160.0, 22.0, -1.46, blue),       // 0
            obj("Betelgeuse", Star, 140.0, 48.0, 0.50, red),     // 1
            obj("Rigel", Star, 165.0, 35.0, 0.13, blue),         // 2
            obj("Bellatrix", Star, 152.0, 50.0, 1.64, blue),     // 3
            obj("Saiph", Star, 158.0, 31.0, 2.09, blue),         // 4
            obj("Alnitak", Star, 155.0, 41.0, 1.77, blue),       // 5
            obj("Alnilam", Star, 157.0, 42.0, 1.69, blue),       // 6
            obj("Mintaka", Star, 159.0, 43.0, 2.23, blue),       // 7
            obj("Aldebaran", Star, 175.0, 60.0, 0.85, orange),   // 8
            obj("Capella", Star, 60.0, 75.0, 0.08, yellow),      // 9
            obj("Polaris", Star, 0.0, 41.0, 1.98, white),        // 10
            obj("Vega", Star, 305.0, 18.0, 0.03, white),         // 11
            obj("Deneb", Star, 315.0, 28.0, 1.25, white),        // 12
            obj("Altair", Star, 280.0, 8.0, 0.77, white),        // 13
            obj("Procyon", Star, 115.0, 30.0, 0.34, yellow),     // 14
            obj("Arcturus", Star, 45.0, -12.0, -0.05, orange),   // 15 (below horizon)
            obj("Jupiter", Planet, 190.0, 55.0, -2.4, yellow),
            obj("Mars", Planet, 95.0, 20.0, 0.9, red),
            obj("Saturn", Planet, 250.0, 15.0, 0.7, yellow),
            obj("Venus", Planet, 265.0, -5.0, -4.2, white),
            obj("ISS", Satellite, 220.0, 38.0, -3.0, Color::rgb(0.6, 1.0, 0.7)),
            obj("Hubble", Satellite, 120.0, 62.0, 1.5, Color::rgb(0.6, 1.0, 0.7)),
            obj("Tiangong", Satellite, 330.0, 52.0, 0.5, Color::rgb(0.6, 1.0, 0.7)),
            obj("Orion Nebula", DeepSky, 156.0, 37.0, 4.0, Color::rgb(0.95, 0.55, 0.85)),
            obj("Pleiades", DeepSky, 190.0, 68.0, 1.6, Color::rgb(0.65, 0.75, 1.0)),
            obj("Andromeda Galaxy", DeepSky, 290.0, 58.0, 3.4, Color::rgb(0.85, 0.8, 1.0)),
        ];

        let constellations = vec![
            Constellation {
                name: "Orion".to_string(),
                path: vec![1, 3, 7, 6, 5, 1, 5, 4, 2, 7],
            },
            Constellation {
                name: "Summer Triangle".to_string(),
                path: vec![11, 12, 13, 11],
            },
        ];

        Self { objects, constellations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_constellations_reference_real_objects() {
        let catalog = SkyCatalog::builtin();
        for c in &catalog.constellations {
            for &i in &c.path {
                assert!(i < catalog.objects.len(), "{} references {}", c.name, i);
            }
        }
    }

    #[test]
    fn catalog_json_round_trips_kinds() {
        let json = r#"{ "objects": [ {
            "name": "X", "kind": "deep-sky", "azimuth_deg": 10, "altitude_deg": 20,
            "magnitude": 3, "color": { "r": 1, "g": 1, "b": 1, "a": 1 }
        } ] }"#;
        let catalog = SkyCatalog::from_json(json).unwrap();
        assert_eq!(catalog.objects[0].kind, ObjectKind::DeepSky);
        assert!(catalog.constellations.is_empty());
    }

    #[test]
    fn layer_toggles_map_to_kinds() {
        let layers = SkyLayers { planets: false, ..SkyLayers::default() };
        assert!(ObjectKind::Star.is_visible(&layers));
        assert!(!ObjectKind::Planet.is_visible(&layers));
    }
}
