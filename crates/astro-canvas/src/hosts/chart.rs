use glam::Vec2;

use super::index_arg;
use crate::api::scene::{CanvasScene, FrameInfo};
use crate::canvas::{Canvas2D, Color, TextStyle};
use crate::charts::{ChartKind, ChartRenderer, ChartView, Series};
use crate::datasource::{sample_series, SeriesSource};
use crate::input::InputEvent;

/// Custom event: `a` = 0 line, 1 area, 2 bar.
pub const SET_CHART_KIND: u32 = 20;

const DEFAULT_WINDOW: usize = 48;
/// One new sample per source every this many ticks (2 s at 60 Hz).
const DEFAULT_SAMPLE_EVERY: u64 = 120;
const TOOLTIP: TextStyle = TextStyle::new(12.0, Color::new(1.0, 1.0, 1.0, 0.95));

/// Live chart fed by pluggable sources. Repaints when a sample arrives or
/// on input, not every frame.
pub struct ChartScene {
    sources: Vec<Box<dyn SeriesSource>>,
    series: Vec<Series>,
    view: ChartView,
    renderer: ChartRenderer,
    window: usize,
    sample_every: u64,
    fresh: bool,
    selected: Option<(usize, usize)>,
}

impl ChartScene {
    pub fn new(sources: Vec<Box<dyn SeriesSource>>, view: ChartView) -> Self {
        Self {
            sources,
            series: Vec::new(),
            view,
            renderer: ChartRenderer::new(),
            window: DEFAULT_WINDOW,
            sample_every: DEFAULT_SAMPLE_EVERY,
            fresh: false,
            selected: None,
        }
    }

    /// Keep `window` samples per series and pull a new one every
    /// `sample_every` ticks.
    pub fn with_sampling(mut self, window: usize, sample_every: u64) -> Self {
        self.window = window.max(1);
        self.sample_every = sample_every.max(1);
        self
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn view(&self) -> &ChartView {
        &self.view
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        self.view.kind = kind;
        self.selected = None;
    }

    /// `(label, value)` of the picked sample.
    pub fn selected(&self) -> Option<(&str, f32)> {
        let (si, index) = self.selected?;
        let series = self.series.get(si)?;
        let value = series.values.get(index)?;
        Some((series.label.as_str(), *value))
    }

    fn sample(&mut self) {
        for (source, series) in self.sources.iter_mut().zip(self.series.iter_mut()) {
            series.push_windowed(source.next_value(), self.window);
        }
        // Indices shift once the window is full.
        self.selected = None;
        self.fresh = true;
    }
}

impl CanvasScene for ChartScene {
    fn init(&mut self, _width: f32, _height: f32) {
        let window = self.window;
        self.series = self
            .sources
            .iter_mut()
            .map(|source| sample_series(source.as_mut(), window))
            .collect();
        self.selected = None;
        self.fresh = true;
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.selected = self.renderer.pick(x, y);
                true
            }
            InputEvent::Custom { kind: SET_CHART_KIND, a, .. } => {
                let kind = match index_arg(a) {
                    Some(0) => ChartKind::Line,
                    Some(1) => ChartKind::Area,
                    Some(2) => ChartKind::Bar,
                    _ => {
                        log::warn!("chart: unknown kind index {a}");
                        return false;
                    }
                };
                self.set_kind(kind);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, frame: &FrameInfo) {
        if frame.tick % self.sample_every == 0 {
            self.sample();
        }
    }

    fn needs_redraw(&self) -> bool {
        self.fresh
    }

    fn draw(&mut self, canvas: &mut dyn Canvas2D) {
        self.renderer.render(canvas, &self.series, &self.view);
        self.fresh = false;

        let Some((si, index)) = self.selected else { return };
        let Some(point) = self.renderer.points().iter().find(|p| p.series == si && p.index == index).copied() else {
            return;
        };
        if let Some((label, value)) = self.selected() {
            canvas.stroke_circle(point.position, point.size + 3.0, 1.5, Color::WHITE);
            let text = format!("{label}: {value:.1}");
            canvas.fill_text(&text, point.position + Vec2::new(8.0, -10.0), TOOLTIP);
        }
    }

    fn resize(&mut self, _width: f32, _height: f32) {
        self.selected = None;
    }
}
