use glam::Vec2;

use super::index_arg;
use crate::api::scene::{CanvasScene, FrameInfo};
use crate::canvas::{Canvas2D, Color, TextStyle};
use crate::config::{SkyConfig, SkyLayers};
use crate::input::InputEvent;
use crate::sky::{CelestialObject, Observer, SkyCatalog, SkyRenderer, SkyView};

/// Custom event: `a` = local sidereal hours.
pub const SET_HOURS: u32 = 10;
/// Custom event: `a` = latitude, `b` = longitude. NaN clears the location.
pub const SET_OBSERVER: u32 = 11;
/// Custom event: `a` = layer index (see `SkyLayers::set_by_index`), `b` = 0 off / 1 on.
pub const TOGGLE_LAYER: u32 = 12;

const HIGHLIGHT: Color = Color::new(1.0, 1.0, 1.0, 0.9);
const INFO: TextStyle = TextStyle::new(12.0, Color::new(0.95, 0.95, 1.0, 0.95));

/// Interactive planisphere. Static between inputs.
pub struct SkyMapScene {
    catalog: SkyCatalog,
    view: SkyView,
    renderer: SkyRenderer,
    selected: Option<usize>,
}

impl SkyMapScene {
    pub fn new(catalog: SkyCatalog, config: &SkyConfig) -> Self {
        Self {
            catalog,
            view: SkyView::from_config(config),
            renderer: SkyRenderer::new(),
            selected: None,
        }
    }

    pub fn catalog(&self) -> &SkyCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &SkyView {
        &self.view
    }

    pub fn set_catalog(&mut self, catalog: SkyCatalog) {
        self.catalog = catalog;
        self.selected = None;
    }

    pub fn set_layers(&mut self, layers: SkyLayers) {
        self.view.layers = layers;
    }

    pub fn selected(&self) -> Option<&CelestialObject> {
        self.selected.and_then(|i| self.catalog.get(i))
    }
}

impl CanvasScene for SkyMapScene {
    fn init(&mut self, _width: f32, _height: f32) {
        self.selected = None;
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.selected = self.renderer.pick(&self.catalog, x, y);
                true
            }
            InputEvent::Custom { kind: SET_HOURS, a, .. } => {
                if a.is_finite() {
                    self.view.hours = a.rem_euclid(24.0);
                }
                true
            }
            InputEvent::Custom { kind: SET_OBSERVER, a, b, .. } => {
                self.view.observer = (a.is_finite() && b.is_finite()).then(|| Observer::new(a, b));
                true
            }
            InputEvent::Custom { kind: TOGGLE_LAYER, a, b, .. } => {
                match index_arg(a) {
                    Some(layer) if self.view.layers.set_by_index(layer, b != 0.0) => true,
                    _ => {
                        log::warn!("sky map: unknown layer index {a}");
                        false
                    }
                }
            }
            _ => false,
        }
    }

    fn update(&mut self, _frame: &FrameInfo) {}

    fn needs_redraw(&self) -> bool {
        false
    }

    fn draw(&mut self, canvas: &mut dyn Canvas2D) {
        self.renderer.render(canvas, &self.catalog, &self.view);

        // Objects hidden by a layer toggle cannot stay selected.
        let Some(index) = self.selected else { return };
        let Some(item) = self.renderer.layout().iter().find(|s| s.index == index).copied() else {
            self.selected = None;
            return;
        };
        let Some(object) = self.catalog.get(index) else { return };

        canvas.stroke_circle(item.position, item.size * 3.0, 1.5, HIGHLIGHT);
        let (_, height) = canvas.size();
        let info = format!(
            "{}  mag {:.1}  alt {:.0}°  az {:.0}°",
            object.name, object.magnitude, object.altitude_deg, object.azimuth_deg
        );
        canvas.fill_text(&info, Vec2::new(10.0, height - 28.0), INFO);
    }

    fn resize(&mut self, _width: f32, _height: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::runner::SceneRunner;
    use crate::canvas::RecordingCanvas;
    use crate::sky::ObjectKind;

    fn runner(catalog: SkyCatalog) -> SceneRunner<SkyMapScene, RecordingCanvas> {
        let mut runner = SceneRunner::new(SkyMapScene::new(catalog, &SkyConfig::default()));
        runner.mount(Some(RecordingCanvas::new(600.0, 600.0)));
        runner.tick(0.0);
        runner
    }

    fn first_star(runner: &SceneRunner<SkyMapScene, RecordingCanvas>) -> (usize, Vec2) {
        let scene = runner.scene();
        scene
            .renderer
            .layout()
            .iter()
            .find(|s| scene.catalog.objects[s.index].kind == ObjectKind::Star)
            .map(|s| (s.index, s.position))
            .unwrap()
    }

    #[test]
    fn click_selects_and_shows_info() {
        let mut runner = runner(SkyCatalog::builtin());
        let (index, at) = first_star(&runner);
        runner.push_input(InputEvent::PointerDown { x: at.x, y: at.y });
        assert!(runner.tick(10.0));
        let name = runner.scene().selected().unwrap().name.clone();
        assert_eq!(name, runner.scene().catalog().objects[index].name);
        let texts = runner.canvas().unwrap().texts();
        assert!(texts.iter().any(|t| t.starts_with(&name) && t.contains("mag")));
    }

    #[test]
    fn hiding_layer_drops_selection() {
        let mut runner = runner(SkyCatalog::builtin());
        let (_, at) = first_star(&runner);
        runner.push_input(InputEvent::PointerDown { x: at.x, y: at.y });
        runner.tick(10.0);
        assert!(runner.scene().selected().is_some());

        runner.push_input(InputEvent::Custom { kind: TOGGLE_LAYER, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(20.0);
        assert!(!runner.scene().view().layers.stars);
        assert!(runner.scene().selected().is_none());
    }

    #[test]
    fn static_map_does_not_repaint_on_time_alone() {
        let mut runner = runner(SkyCatalog::builtin());
        assert!(!runner.tick(1000.0));
        runner.push_input(InputEvent::Custom { kind: SET_HOURS, a: 27.0, b: 0.0, c: 0.0 });
        assert!(runner.tick(1100.0));
        assert_eq!(runner.scene().view().hours, 3.0);
    }

    #[test]
    fn observer_can_be_set_and_cleared() {
        let mut runner = runner(SkyCatalog::default());
        runner.push_input(InputEvent::Custom { kind: SET_OBSERVER, a: 51.5, b: -0.1, c: 0.0 });
        runner.tick(10.0);
        assert_eq!(runner.scene().view().observer, Some(Observer::new(51.5, -0.1)));
        runner.push_input(InputEvent::Custom { kind: SET_OBSERVER, a: f32::NAN, b: 0.0, c: 0.0 });
        runner.tick(20.0);
        assert_eq!(runner.scene().view().observer, None);
    }

    #[test]
    fn click_on_empty_catalog_selects_nothing() {
        let mut runner = runner(SkyCatalog::default());
        runner.push_input(InputEvent::PointerDown { x: 300.0, y: 300.0 });
        runner.tick(10.0);
        assert!(runner.scene().selected().is_none());
    }
}
