use glam::Vec2;

use super::catalog::{ObjectKind, SkyCatalog};
use super::projection::{Observer, SkyProjection};
use crate::canvas::{Canvas2D, Color, TextStyle};
use crate::config::{SkyConfig, SkyLayers};
use crate::hit::nearest_hit;

const MIN_SIZE: f32 = 1.2;
const MAX_SIZE: f32 = 5.0;
const PLANET_BONUS: f32 = 1.0;
const GLOW_SCALE: f32 = 3.0;
const SKY_TOP: Color = Color::rgb(0.01, 0.02, 0.08);
const SKY_BOTTOM: Color = Color::rgb(0.05, 0.07, 0.2);
const GRID_COLOR: Color = Color::new(0.5, 0.6, 0.9, 0.25);
const CONSTELLATION_COLOR: Color = Color::new(0.55, 0.7, 1.0, 0.35);
const LABEL: TextStyle = TextStyle::new(11.0, Color::new(0.85, 0.9, 1.0, 0.85));
const CARDINAL: TextStyle = TextStyle::new(13.0, Color::new(0.7, 0.8, 1.0, 0.9)).centered();
const FOOTER: TextStyle = TextStyle::new(11.0, Color::new(0.6, 0.7, 0.9, 0.8));

/// Everything the renderer needs besides the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyView {
    pub hours: f32,
    pub observer: Option<Observer>,
    pub layers: SkyLayers,
}

impl SkyView {
    pub fn from_config(config: &SkyConfig) -> Self {
        let config = config.sanitized();
        let observer = match (config.latitude, config.longitude) {
            (None, None) => None,
            (lat, lng) => Some(Observer::from_parts(lat, lng)),
        };
        Self {
            hours: config.hours,
            observer,
            layers: config.layers,
        }
    }
}

impl Default for SkyView {
    fn default() -> Self {
        Self::from_config(&SkyConfig::default())
    }
}

/// Screen placement of one visible catalog object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenItem {
    /// Index into `SkyCatalog::objects`.
    pub index: usize,
    pub position: Vec2,
    pub size: f32,
}

/// Core radius from magnitude: brightest visible object gets `MAX_SIZE`,
/// faintest gets `MIN_SIZE`. A flat or empty range uses a span of 1.
fn magnitude_size(magnitude: f32, brightest: f32, faintest: f32) -> f32 {
    let span = faintest - brightest;
    let span = if span > f32::EPSILON { span } else { 1.0 };
    let t = ((faintest - magnitude) / span).clamp(0.0, 1.0);
    MIN_SIZE + t * (MAX_SIZE - MIN_SIZE)
}

/// Compute screen placement for every visible, above-horizon object.
pub fn layout(catalog: &SkyCatalog, view: &SkyView, width: f32, height: f32) -> Vec<ScreenItem> {
    let projection = SkyProjection::new(width, height, view.hours, view.observer.unwrap_or_default());

    let visible: Vec<(usize, Vec2)> = catalog
        .objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.kind.is_visible(&view.layers))
        .filter_map(|(i, o)| projection.project(o.azimuth_deg, o.altitude_deg).map(|p| (i, p)))
        .collect();

    let (brightest, faintest) = visible
        .iter()
        .map(|(i, _)| catalog.objects[*i].magnitude)
        .filter(|m| m.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), m| (lo.min(m), hi.max(m)));
    let (brightest, faintest) = if brightest.is_finite() { (brightest, faintest) } else { (0.0, 1.0) };

    visible
        .into_iter()
        .map(|(index, position)| {
            let object = &catalog.objects[index];
            let mut size = magnitude_size(object.magnitude, brightest, faintest);
            if object.kind == ObjectKind::Planet {
                size += PLANET_BONUS;
            }
            ScreenItem { index, position, size }
        })
        .collect()
}

/// Draws the sky dome and remembers where everything landed, so picks
/// always agree with the last frame on screen.
#[derive(Debug, Default)]
pub struct SkyRenderer {
    layout: Vec<ScreenItem>,
}

impl SkyRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout from the most recent `render`.
    pub fn layout(&self) -> &[ScreenItem] {
        &self.layout
    }

    pub fn render(&mut self, canvas: &mut dyn Canvas2D, catalog: &SkyCatalog, view: &SkyView) {
        let (width, height) = canvas.size();
        self.layout = layout(catalog, view, width, height);
        let projection = SkyProjection::new(width, height, view.hours, view.observer.unwrap_or_default());

        canvas.clear();
        canvas.fill_vertical_gradient(Vec2::ZERO, Vec2::new(width, height), SKY_TOP, SKY_BOTTOM);

        if view.layers.grid {
            draw_grid(canvas, &projection);
        }

        if view.layers.constellations {
            for constellation in &catalog.constellations {
                let points: Vec<Vec2> = constellation
                    .path
                    .iter()
                    .filter_map(|i| self.position_of(*i))
                    .collect();
                if points.len() >= 2 {
                    canvas.stroke_polyline(&points, 1.0, CONSTELLATION_COLOR);
                }
            }
        }

        for item in &self.layout {
            let object = &catalog.objects[item.index];
            canvas.fill_radial_glow(
                item.position,
                item.size * GLOW_SCALE,
                object.color.with_alpha(0.35),
                object.color.with_alpha(0.0),
            );
            canvas.fill_circle(item.position, item.size, object.color);
            if object.kind == ObjectKind::Satellite {
                canvas.stroke_circle(item.position, item.size + 2.0, 1.0, object.color.with_alpha(0.6));
            }
        }

        if view.layers.labels {
            for item in &self.layout {
                let object = &catalog.objects[item.index];
                let at = item.position + Vec2::new(item.size + 4.0, -item.size - 2.0);
                canvas.fill_text(&object.name, at, LABEL);
            }
        }

        if let Some(observer) = view.observer {
            let text = format!("Lat {:.1}°  Lng {:.1}°", observer.latitude, observer.longitude);
            canvas.fill_text(&text, Vec2::new(10.0, height - 10.0), FOOTER);
        }
    }

    /// Nearest visible object within 3× its drawn size of the click.
    pub fn pick(&self, catalog: &SkyCatalog, x: f32, y: f32) -> Option<usize> {
        nearest_hit(
            self.layout
                .iter()
                .filter(|s| s.index < catalog.objects.len())
                .map(|s| (s.index, s.position, s.size)),
            Vec2::new(x, y),
        )
    }

    fn position_of(&self, index: usize) -> Option<Vec2> {
        self.layout.iter().find(|s| s.index == index).map(|s| s.position)
    }
}

fn draw_grid(canvas: &mut dyn Canvas2D, projection: &SkyProjection) {
    canvas.stroke_circle(projection.center, projection.horizon_radius, 1.5, GRID_COLOR);
    for altitude in [30.0, 60.0] {
        canvas.stroke_circle(projection.center, projection.ring_radius(altitude), 1.0, GRID_COLOR.fade(0.6));
    }
    for (label, azimuth) in [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)] {
        if let Some(on_horizon) = projection.project(azimuth, 0.0) {
            let outward = (on_horizon - projection.center).normalize_or_zero();
            canvas.fill_text(label, on_horizon + outward * 14.0, CARDINAL);
        }
    }
}
