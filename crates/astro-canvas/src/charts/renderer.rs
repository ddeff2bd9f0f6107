use glam::Vec2;

use super::{value_ceiling, ChartKind, ChartView, Series};
use crate::canvas::{Canvas2D, Color, TextStyle};
use crate::hit::nearest_hit;

const MARGIN_LEFT: f32 = 48.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 32.0;
const MARGIN_BOTTOM: f32 = 28.0;
const GRID_LINES: usize = 4;
const POINT_RADIUS: f32 = 3.0;
const BAR_FILL: f32 = 0.8;

const BACKGROUND: Color = Color::rgb(0.03, 0.04, 0.1);
const GRID: Color = Color::new(0.6, 0.7, 1.0, 0.12);
const AXIS: Color = Color::new(0.7, 0.8, 1.0, 0.5);
const TICK: TextStyle = TextStyle::new(10.0, Color::new(0.7, 0.8, 1.0, 0.7));
const TITLE: TextStyle = TextStyle::new(14.0, Color::new(0.9, 0.95, 1.0, 0.95));
const LEGEND: TextStyle = TextStyle::new(11.0, Color::new(0.9, 0.95, 1.0, 0.9));

/// Plot rectangle inside the canvas margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub origin: Vec2,
    pub extent: Vec2,
}

impl PlotArea {
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let w = (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
        let h = (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
        Self {
            origin: Vec2::new(MARGIN_LEFT, MARGIN_TOP),
            extent: Vec2::new(w, h),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.extent.y
    }

    /// Screen y of `value` on an axis from 0 to `ceiling`.
    pub fn value_y(&self, value: f32, ceiling: f32) -> f32 {
        let v = if value.is_finite() { value.clamp(0.0, ceiling) } else { 0.0 };
        self.bottom() - v / ceiling * self.extent.y
    }
}

/// A drawn sample, kept for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub series: usize,
    pub index: usize,
    pub position: Vec2,
    pub size: f32,
}

fn layout(series: &[Series], kind: ChartKind, area: &PlotArea) -> Vec<ChartPoint> {
    let ceiling = value_ceiling(series);
    let samples = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    if samples == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(samples * series.len());

    match kind {
        ChartKind::Line | ChartKind::Area => {
            let step = if samples > 1 { area.extent.x / (samples - 1) as f32 } else { 0.0 };
            let offset = if samples > 1 { 0.0 } else { area.extent.x / 2.0 };
            for (si, s) in series.iter().enumerate() {
                for (i, v) in s.values.iter().enumerate() {
                    points.push(ChartPoint {
                        series: si,
                        index: i,
                        position: Vec2::new(area.origin.x + offset + i as f32 * step, area.value_y(*v, ceiling)),
                        size: POINT_RADIUS,
                    });
                }
            }
        }
        ChartKind::Bar => {
            let slot = area.extent.x / samples as f32;
            let bar_w = slot * BAR_FILL / series.len().max(1) as f32;
            for (si, s) in series.iter().enumerate() {
                for (i, v) in s.values.iter().enumerate() {
                    let left = area.origin.x + i as f32 * slot + slot * (1.0 - BAR_FILL) / 2.0 + si as f32 * bar_w;
                    points.push(ChartPoint {
                        series: si,
                        index: i,
                        position: Vec2::new(left + bar_w / 2.0, area.value_y(*v, ceiling)),
                        size: bar_w / 2.0,
                    });
                }
            }
        }
    }
    points
}

fn tick_label(value: f32) -> String {
    if value >= 10.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Line/area/bar chart renderer with a cached layout for picking.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    points: Vec<ChartPoint>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn render(&mut self, canvas: &mut dyn Canvas2D, series: &[Series], view: &ChartView) {
        let (width, height) = canvas.size();
        let area = PlotArea::for_canvas(width, height);
        let ceiling = value_ceiling(series);
        self.points = layout(series, view.kind, &area);

        canvas.clear();
        canvas.fill_rect(Vec2::ZERO, Vec2::new(width, height), BACKGROUND);

        if view.show_grid {
            for g in 0..=GRID_LINES {
                let value = ceiling * g as f32 / GRID_LINES as f32;
                let y = area.value_y(value, ceiling);
                canvas.stroke_polyline(
                    &[Vec2::new(area.origin.x, y), Vec2::new(area.origin.x + area.extent.x, y)],
                    1.0,
                    GRID,
                );
                canvas.fill_text(&tick_label(value), Vec2::new(area.origin.x - 6.0, y + 3.0), TICK.right());
            }
        }
        canvas.stroke_polyline(
            &[
                area.origin,
                Vec2::new(area.origin.x, area.bottom()),
                Vec2::new(area.origin.x + area.extent.x, area.bottom()),
            ],
            1.0,
            AXIS,
        );

        for (si, s) in series.iter().enumerate() {
            let pts: Vec<Vec2> = self.points.iter().filter(|p| p.series == si).map(|p| p.position).collect();
            if pts.is_empty() {
                continue;
            }
            match view.kind {
                ChartKind::Line => {
                    canvas.stroke_polyline(&pts, 2.0, s.color);
                    for p in &pts {
                        canvas.fill_circle(*p, POINT_RADIUS, s.color);
                    }
                }
                ChartKind::Area => {
                    let mut poly = Vec::with_capacity(pts.len() + 2);
                    poly.push(Vec2::new(pts[0].x, area.bottom()));
                    poly.extend_from_slice(&pts);
                    poly.push(Vec2::new(pts[pts.len() - 1].x, area.bottom()));
                    canvas.fill_polygon(&poly, s.color.with_alpha(0.25));
                    canvas.stroke_polyline(&pts, 2.0, s.color);
                }
                ChartKind::Bar => {
                    for p in self.points.iter().filter(|p| p.series == si) {
                        let top = p.position.y;
                        canvas.fill_rect(
                            Vec2::new(p.position.x - p.size, top),
                            Vec2::new(p.size * 2.0, area.bottom() - top),
                            s.color,
                        );
                    }
                }
            }
        }

        if !view.title.is_empty() {
            canvas.fill_text(&view.title, Vec2::new(area.origin.x, 20.0), TITLE);
        }
        if view.show_legend {
            let mut x = area.origin.x + area.extent.x;
            for s in series.iter().rev() {
                canvas.fill_text(&s.label, Vec2::new(x, 20.0), LEGEND.right());
                canvas.fill_circle(Vec2::new(x - 8.0 - s.label.len() as f32 * 6.0, 16.0), 4.0, s.color);
                x -= 24.0 + s.label.len() as f32 * 6.0;
            }
        }
    }

    /// `(series, sample)` under the click, from the last render.
    pub fn pick(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        nearest_hit(
            self.points.iter().map(|p| ((p.series, p.index), p.position, p.size)),
            Vec2::new(x, y),
        )
    }
}
