use glam::Vec2;

use super::event::{EventCategory, TimelineEvent};
use super::position::{assign_positions, PositionedEvent};
use super::projector::{Projection, TimelineProjector};
use crate::canvas::{Canvas2D, Color, TextStyle};
use crate::config::TimelineConfig;
use crate::hit::nearest_hit;

const SPACE_TOP: Color = Color::rgb(0.0, 0.01, 0.05);
const SPACE_BOTTOM: Color = Color::rgb(0.04, 0.02, 0.12);
const THREAD: Color = Color::new(0.6, 0.7, 1.0, 0.2);
const YEAR: TextStyle = TextStyle::new(10.0, Color::new(0.8, 0.85, 1.0, 0.7));
const HEADLINE: TextStyle = TextStyle::new(13.0, Color::new(1.0, 1.0, 1.0, 0.95));
const DETAIL: TextStyle = TextStyle::new(12.0, Color::new(0.85, 0.9, 1.0, 0.9));
/// Year labels are only drawn for markers at least this big.
const YEAR_LABEL_MIN_SIZE: f32 = 6.0;

/// Which events are shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineFilter {
    pub category: Option<EventCategory>,
    /// First year of a decade (e.g. 1960).
    pub decade: Option<i32>,
    /// Case-insensitive substring over title and description.
    pub search: String,
}

impl TimelineFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.decade.is_none() && self.search.trim().is_empty()
    }

    pub fn matches(&self, event: &TimelineEvent) -> bool {
        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }
        if let Some(decade) = self.decade {
            if event.decade() != decade {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || event.title.to_lowercase().contains(&needle)
            || event.description.to_lowercase().contains(&needle)
    }
}

/// The 3D timeline host state: events, filter, camera, hover and selection.
pub struct TimelineView {
    events: Vec<TimelineEvent>,
    filter: TimelineFilter,
    positioned: Vec<PositionedEvent>,
    projector: TimelineProjector,
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl TimelineView {
    pub fn new(events: Vec<TimelineEvent>, config: &TimelineConfig) -> Self {
        let mut view = Self {
            events,
            filter: TimelineFilter::default(),
            positioned: Vec::new(),
            projector: TimelineProjector::new(config),
            selected: None,
            hovered: None,
        };
        view.refilter();
        view
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn filter(&self) -> &TimelineFilter {
        &self.filter
    }

    pub fn positioned(&self) -> &[PositionedEvent] {
        &self.positioned
    }

    pub fn projector(&self) -> &TimelineProjector {
        &self.projector
    }

    pub fn projector_mut(&mut self) -> &mut TimelineProjector {
        &mut self.projector
    }

    /// Replace the filter; positions are reassigned from scratch.
    pub fn set_filter(&mut self, filter: TimelineFilter) {
        self.filter = filter;
        self.refilter();
    }

    pub fn set_category(&mut self, category: Option<EventCategory>) {
        self.filter.category = category;
        self.refilter();
    }

    pub fn set_decade(&mut self, decade: Option<i32>) {
        self.filter.decade = decade;
        self.refilter();
    }

    pub fn set_search(&mut self, search: &str) {
        self.filter.search = search.to_string();
        self.refilter();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(TimelineFilter::default());
    }

    fn refilter(&mut self) {
        let shown: Vec<usize> = self
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| self.filter.matches(e))
            .map(|(i, _)| i)
            .collect();
        self.positioned = assign_positions(&shown);

        let still_shown = |id: Option<usize>| id.filter(|i| shown.contains(i));
        self.selected = still_shown(self.selected);
        self.hovered = still_shown(self.hovered);
    }

    pub fn tick(&mut self) {
        self.projector.tick();
    }

    /// Screen projection of every shown event, in list order.
    pub fn projections(&self, width: f32, height: f32) -> Vec<(usize, Projection)> {
        let center = Vec2::new(width / 2.0, height / 2.0);
        self.positioned
            .iter()
            .map(|p| (p.event, self.projector.project(p, center)))
            .collect()
    }

    /// Event under `point` using the "distance ≤ 3 × size" rule.
    pub fn hit_test(&self, point: Vec2, width: f32, height: f32) -> Option<usize> {
        nearest_hit(
            self.projections(width, height).into_iter().map(|(id, p)| (id, p.screen, p.size)),
            point,
        )
    }

    /// Select the event under `point`; a click on empty space clears it.
    pub fn click(&mut self, point: Vec2, width: f32, height: f32) -> Option<usize> {
        self.selected = self.hit_test(point, width, height);
        self.selected
    }

    /// Update the hovered event. Returns `true` when it changed.
    pub fn hover(&mut self, point: Option<Vec2>, width: f32, height: f32) -> bool {
        let hovered = point.and_then(|p| self.hit_test(p, width, height));
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn selected(&self) -> Option<&TimelineEvent> {
        self.selected.and_then(|i| self.events.get(i))
    }

    pub fn hovered(&self) -> Option<&TimelineEvent> {
        self.hovered.and_then(|i| self.events.get(i))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        let (width, height) = canvas.size();
        canvas.clear();
        canvas.fill_vertical_gradient(Vec2::ZERO, Vec2::new(width, height), SPACE_TOP, SPACE_BOTTOM);

        let projections = self.projections(width, height);
        if projections.len() >= 2 {
            let thread: Vec<Vec2> = projections.iter().map(|(_, p)| p.screen).collect();
            canvas.stroke_polyline(&thread, 1.0, THREAD);
        }

        // Painter's order: far (small depth) first.
        let mut ordered = projections;
        ordered.sort_by(|a, b| a.1.depth.total_cmp(&b.1.depth));

        for (id, p) in &ordered {
            let Some(event) = self.events.get(*id) else { continue };
            let color = event.category.color();
            canvas.fill_radial_glow(p.screen, p.size * 2.5, color.with_alpha(0.4), color.with_alpha(0.0));
            canvas.fill_circle(p.screen, p.size, color);
            if Some(*id) == self.selected {
                canvas.stroke_circle(p.screen, p.size + 4.0, 2.0, Color::WHITE);
            }
            if p.size >= YEAR_LABEL_MIN_SIZE {
                canvas.fill_text(&event.year.to_string(), p.screen + Vec2::new(0.0, p.size + 12.0), YEAR.centered());
            }
            if Some(*id) == self.hovered {
                canvas.fill_text(&event.title, p.screen + Vec2::new(p.size + 6.0, -p.size), HEADLINE);
            }
        }

        if let Some(event) = self.selected() {
            let x = 16.0;
            let y = height - 44.0;
            canvas.fill_text(&format!("{} · {}", event.year, event.title), Vec2::new(x, y), HEADLINE);
            canvas.fill_text(&event.description, Vec2::new(x, y + 18.0), DETAIL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::timeline::event::builtin_events;
    use crate::timeline::projector::BASE_SIZE;

    fn still_view() -> TimelineView {
        let config = TimelineConfig { auto_rotate: false, ..TimelineConfig::default() };
        TimelineView::new(builtin_events(), &config)
    }

    #[test]
    fn click_boundary_selects_then_misses() {
        let mut view = still_view();
        // First event sits at (550, 300) with size BASE_SIZE on an 800×600 canvas.
        let edge = 550.0 + 3.0 * BASE_SIZE;
        assert_eq!(view.click(Vec2::new(edge, 300.0), 800.0, 600.0), Some(0));
        assert_eq!(view.selected().map(|e| e.year), Some(1929));
        assert_eq!(view.click(Vec2::new(edge + 1.0, 300.0), 800.0, 600.0), None);
        assert!(view.selected().is_none());
    }

    #[test]
    fn filter_then_clear_restores_positions() {
        let mut view = still_view();
        let original = view.projections(800.0, 600.0);

        view.set_category(Some(EventCategory::Telescope));
        let filtered = view.projections(800.0, 600.0);
        assert_eq!(filtered.len(), 3);
        // Filtered events are re-laid out from slot 0.
        assert_eq!(filtered[0].1, original[0].1);
        assert_ne!(filtered[0].0, original[0].0);

        view.clear_filter();
        assert_eq!(view.projections(800.0, 600.0), original);
    }

    #[test]
    fn decade_and_search_filters_combine() {
        let mut view = still_view();
        view.set_decade(Some(2010));
        assert_eq!(view.positioned().len(), 4);
        view.set_search("PLUTO");
        assert_eq!(view.positioned().len(), 1);
        assert_eq!(view.events()[view.positioned()[0].event].title, "New Horizons at Pluto");
        view.set_decade(None);
        assert_eq!(view.positioned().len(), 2);
    }

    #[test]
    fn filtering_out_selection_clears_it() {
        let mut view = still_view();
        view.click(Vec2::new(550.0, 300.0), 800.0, 600.0);
        assert!(view.selected().is_some());
        view.set_category(Some(EventCategory::Mission));
        assert!(view.selected().is_none());
    }

    #[test]
    fn draw_shows_selection_details() {
        let mut view = still_view();
        view.click(Vec2::new(550.0, 300.0), 800.0, 600.0);
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        view.draw(&mut canvas);
        assert!(canvas.texts().iter().any(|t| t.contains("Expanding universe")));
    }

    #[test]
    fn empty_filter_result_draws_background_only() {
        let mut view = still_view();
        view.set_search("no such event");
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        view.draw(&mut canvas);
        assert_eq!(canvas.commands().len(), 2);
    }

    #[test]
    fn painter_order_draws_far_markers_first() {
        let view = still_view();
        let mut canvas = RecordingCanvas::new(800.0, 600.0);
        view.draw(&mut canvas);
        let sizes: Vec<f32> = canvas.circles().iter().map(|(_, r, _)| *r).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    }
}
