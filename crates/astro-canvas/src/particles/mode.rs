use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canvas::Color;

/// Visual theme of a particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldMode {
    /// Drifting dust that is pulled toward the pointer.
    #[default]
    Nebula,
    /// Bright heads streaking left to right with fading tails.
    Comet,
    /// Sparks rising from the bottom edge.
    SolarWind,
    /// Soft glows swaying along the top of the sky.
    Aurora,
    /// Slowly drifting star points.
    Stars,
}

impl FieldMode {
    pub const ALL: [FieldMode; 5] = [
        FieldMode::Nebula,
        FieldMode::Comet,
        FieldMode::SolarWind,
        FieldMode::Aurora,
        FieldMode::Stars,
    ];

    /// Particle population at intensity 1.0.
    pub fn base_count(self) -> usize {
        match self {
            FieldMode::Nebula => 80,
            FieldMode::Comet => 24,
            FieldMode::SolarWind => 120,
            FieldMode::Aurora => 60,
            FieldMode::Stars => 160,
        }
    }

    pub fn palette(self) -> &'static [Color] {
        const NEBULA: [Color; 4] = [
            Color::rgb(0.58, 0.35, 0.96),
            Color::rgb(0.93, 0.38, 0.72),
            Color::rgb(0.38, 0.52, 0.98),
            Color::rgb(0.75, 0.55, 1.0),
        ];
        const COMET: [Color; 3] = [
            Color::rgb(1.0, 1.0, 1.0),
            Color::rgb(0.68, 0.87, 1.0),
            Color::rgb(1.0, 0.92, 0.7),
        ];
        const SOLAR_WIND: [Color; 3] = [
            Color::rgb(1.0, 0.6, 0.15),
            Color::rgb(1.0, 0.85, 0.25),
            Color::rgb(0.96, 0.33, 0.18),
        ];
        const AURORA: [Color; 3] = [
            Color::rgb(0.2, 0.95, 0.55),
            Color::rgb(0.15, 0.8, 0.85),
            Color::rgb(0.6, 0.4, 0.95),
        ];
        const STARS: [Color; 3] = [
            Color::rgb(1.0, 1.0, 1.0),
            Color::rgb(0.8, 0.88, 1.0),
            Color::rgb(1.0, 0.95, 0.8),
        ];
        match self {
            FieldMode::Nebula => &NEBULA,
            FieldMode::Comet => &COMET,
            FieldMode::SolarWind => &SOLAR_WIND,
            FieldMode::Aurora => &AURORA,
            FieldMode::Stars => &STARS,
        }
    }

    /// Modes that bounce off the canvas edges instead of recycling there.
    pub fn reflects_at_edges(self) -> bool {
        matches!(self, FieldMode::Nebula | FieldMode::Stars)
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldMode::Nebula => "nebula",
            FieldMode::Comet => "comet",
            FieldMode::SolarWind => "solar-wind",
            FieldMode::Aurora => "aurora",
            FieldMode::Stars => "stars",
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown particle mode '{}'", self.0)
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for FieldMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("solar-wind".parse::<FieldMode>(), Ok(FieldMode::SolarWind));
        assert_eq!(" Aurora ".parse::<FieldMode>(), Ok(FieldMode::Aurora));
        assert!("plasma".parse::<FieldMode>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&FieldMode::SolarWind).unwrap();
        assert_eq!(json, "\"solar-wind\"");
        let back: FieldMode = serde_json::from_str("\"comet\"").unwrap();
        assert_eq!(back, FieldMode::Comet);
    }

    #[test]
    fn every_mode_has_colors() {
        for mode in FieldMode::ALL {
            assert!(!mode.palette().is_empty(), "{mode} has no palette");
            assert!(mode.base_count() > 0);
        }
    }
}
