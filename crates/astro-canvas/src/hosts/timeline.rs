use glam::Vec2;

use super::index_arg;
use crate::api::scene::{CanvasScene, FrameInfo};
use crate::canvas::Canvas2D;
use crate::config::TimelineConfig;
use crate::input::InputEvent;
use crate::timeline::{EventCategory, TimelineEvent, TimelineView};

/// Custom event: `a` = category index, negative for all categories.
pub const SET_CATEGORY: u32 = 30;
/// Custom event: `a` = any year inside the decade, NaN for all decades.
pub const SET_DECADE: u32 = 31;
/// Custom event: pause or resume auto-rotation.
pub const TOGGLE_ROTATION: u32 = 32;
/// Custom event: drop category, decade and search filters.
pub const CLEAR_FILTER: u32 = 33;
/// Custom event: `a` = absolute zoom.
pub const SET_ZOOM: u32 = 34;

const KEY_SPACE: u32 = 32;
/// Zoom factor per wheel delta unit.
const WHEEL_ZOOM: f32 = 0.001;

/// Rotating 3D timeline of space milestones.
pub struct TimelineScene {
    view: TimelineView,
    size: (f32, f32),
}

impl TimelineScene {
    pub fn new(events: Vec<TimelineEvent>, config: &TimelineConfig) -> Self {
        Self {
            view: TimelineView::new(events, &config.sanitized()),
            size: (1.0, 1.0),
        }
    }

    pub fn view(&self) -> &TimelineView {
        &self.view
    }

    /// Mutable view for bridge calls such as free-text search.
    pub fn view_mut(&mut self) -> &mut TimelineView {
        &mut self.view
    }
}

impl CanvasScene for TimelineScene {
    fn init(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let (width, height) = self.size;
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.view.click(Vec2::new(x, y), width, height);
                true
            }
            InputEvent::PointerMove { x, y } => self.view.hover(Some(Vec2::new(x, y)), width, height),
            InputEvent::PointerLeave => self.view.hover(None, width, height),
            InputEvent::Wheel { delta } => {
                self.view.projector_mut().zoom_by((-delta * WHEEL_ZOOM).exp());
                true
            }
            InputEvent::KeyDown { key_code: KEY_SPACE }
            | InputEvent::Custom { kind: TOGGLE_ROTATION, .. } => {
                self.view.projector_mut().toggle();
                true
            }
            InputEvent::Custom { kind: SET_CATEGORY, a, .. } => {
                let category = index_arg(a).and_then(|i| EventCategory::ALL.get(i).copied());
                self.view.set_category(category);
                true
            }
            InputEvent::Custom { kind: SET_DECADE, a, .. } => {
                let decade = a.is_finite().then(|| (a as i32).div_euclid(10) * 10);
                self.view.set_decade(decade);
                true
            }
            InputEvent::Custom { kind: CLEAR_FILTER, .. } => {
                self.view.clear_filter();
                true
            }
            InputEvent::Custom { kind: SET_ZOOM, a, .. } => {
                self.view.projector_mut().set_zoom(a);
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, _frame: &FrameInfo) {
        self.view.tick();
    }

    fn needs_redraw(&self) -> bool {
        self.view.projector().is_running()
    }

    fn draw(&mut self, canvas: &mut dyn Canvas2D) {
        self.view.draw(canvas);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = (width, height);
    }
}
