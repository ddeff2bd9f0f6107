use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    Mission,
    Discovery,
    Telescope,
    Human,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Mission,
        EventCategory::Discovery,
        EventCategory::Telescope,
        EventCategory::Human,
    ];

    pub fn color(self) -> Color {
        match self {
            EventCategory::Mission => Color::rgb(0.35, 0.65, 1.0),
            EventCategory::Discovery => Color::rgb(1.0, 0.78, 0.3),
            EventCategory::Telescope => Color::rgb(0.7, 0.45, 1.0),
            EventCategory::Human => Color::rgb(0.35, 0.95, 0.6),
        }
    }

    /// Stable index used by the JS bridge.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub year: i32,
    pub category: EventCategory,
    pub title: String,
    pub description: String,
}

impl TimelineEvent {
    pub fn new(year: i32, category: EventCategory, title: &str, description: &str) -> Self {
        Self {
            year,
            category,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// First year of the event's decade (1969 → 1960).
    pub fn decade(&self) -> i32 {
        self.year.div_euclid(10) * 10
    }
}

pub fn events_from_json(json: &str) -> Result<Vec<TimelineEvent>, ConfigError> {
    serde_json::from_str(json).map_err(ConfigError::Parse)
}

/// Milestones shown when the page does not supply its own list.
pub fn builtin_events() -> Vec<TimelineEvent> {
    use EventCategory::*;
    vec![
        TimelineEvent::new(1929, Discovery, "Expanding universe", "Hubble shows galaxies recede faster the farther they are."),
        TimelineEvent::new(1930, Discovery, "Pluto found", "Clyde Tombaugh spots Pluto on photographic plates."),
        TimelineEvent::new(1957, Mission, "Sputnik 1", "The first artificial satellite reaches orbit."),
        TimelineEvent::new(1961, Human, "Vostok 1", "Yuri Gagarin becomes the first human in space."),
        TimelineEvent::new(1969, Human, "Apollo 11", "Armstrong and Aldrin walk on the Moon."),
        TimelineEvent::new(1977, Mission, "Voyager launches", "Twin probes begin a grand tour of the outer planets."),
        TimelineEvent::new(1990, Telescope, "Hubble Space Telescope", "A 2.4 m mirror above the atmosphere."),
        TimelineEvent::new(1995, Discovery, "51 Pegasi b", "First exoplanet found around a Sun-like star."),
        TimelineEvent::new(1998, Human, "ISS assembly begins", "Zarya, the first module, is launched."),
        TimelineEvent::new(2004, Mission, "Spirit and Opportunity", "Twin rovers land on Mars."),
        TimelineEvent::new(2009, Telescope, "Kepler", "A planet-hunting photometer stares at Cygnus."),
        TimelineEvent::new(2012, Mission, "Curiosity", "A car-sized rover lands in Gale crater."),
        TimelineEvent::new(2015, Mission, "New Horizons at Pluto", "First close look at the dwarf planet."),
        TimelineEvent::new(2015, Discovery, "Gravitational waves", "LIGO detects two merging black holes."),
        TimelineEvent::new(2019, Discovery, "First black hole image", "The Event Horizon Telescope images M87*."),
        TimelineEvent::new(2021, Telescope, "James Webb Space Telescope", "An infrared observatory heads for L2."),
        TimelineEvent::new(2022, Mission, "Artemis I", "Orion flies around the Moon uncrewed."),
    ]
}
