use std::f64::consts::TAU;

use astro_canvas::canvas::{Canvas2D, Color, TextStyle};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `Canvas2D` over a browser `<canvas>` 2D context.
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Look up `<canvas id=...>` and its 2D context. `None` when the element
    /// is missing, is not a canvas, or the context cannot be created.
    pub fn acquire(canvas_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let element = document.get_element_by_id(canvas_id)?.dyn_into::<HtmlCanvasElement>().ok()?;
        let ctx = element
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { element, ctx })
    }

    fn set_style(&self, property: &str, value: &JsValue) {
        let _ = js_sys::Reflect::set(self.ctx.as_ref(), &JsValue::from_str(property), value);
    }

    fn set_fill(&self, color: Color) {
        self.set_style("fillStyle", &JsValue::from_str(&color.to_css()));
    }

    fn set_stroke(&self, color: Color, width: f32) {
        self.set_style("strokeStyle", &JsValue::from_str(&color.to_css()));
        self.ctx.set_line_width(f64::from(width));
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(f64::from(p.x), f64::from(p.y));
            } else {
                self.ctx.line_to(f64::from(p.x), f64::from(p.y));
            }
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(f64::from(center.x), f64::from(center.y), f64::from(radius.max(0.0)), 0.0, TAU)
            .is_ok()
    }
}

impl Canvas2D for WebCanvas {
    fn size(&self) -> (f32, f32) {
        (self.element.width() as f32, self.element.height() as f32)
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.element.set_width(width.max(1.0) as u32);
        self.element.set_height(height.max(1.0) as u32);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, f64::from(w), f64::from(h));
    }

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(
            f64::from(origin.x),
            f64::from(origin.y),
            f64::from(extent.x),
            f64::from(extent.y),
        );
    }

    fn fill_vertical_gradient(&mut self, origin: Vec2, extent: Vec2, top: Color, bottom: Color) {
        let gradient = self.ctx.create_linear_gradient(
            f64::from(origin.x),
            f64::from(origin.y),
            f64::from(origin.x),
            f64::from(origin.y + extent.y),
        );
        let _ = gradient.add_color_stop(0.0, &top.to_css());
        let _ = gradient.add_color_stop(1.0, &bottom.to_css());
        self.set_style("fillStyle", gradient.as_ref());
        self.ctx.fill_rect(
            f64::from(origin.x),
            f64::from(origin.y),
            f64::from(extent.x),
            f64::from(extent.y),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if self.circle_path(center, radius) {
            self.set_fill(color);
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if self.circle_path(center, radius) {
            self.set_stroke(color, width);
            self.ctx.stroke();
        }
    }

    fn fill_radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        let (x, y, r) = (f64::from(center.x), f64::from(center.y), f64::from(radius.max(0.0)));
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &inner.to_css());
        let _ = gradient.add_color_stop(1.0, &outer.to_css());
        if self.circle_path(center, radius) {
            self.set_style("fillStyle", gradient.as_ref());
            self.ctx.fill();
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.trace(points);
        self.set_stroke(color, width);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.trace(points);
        self.ctx.close_path();
        self.set_fill(color);
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, position: Vec2, style: TextStyle) {
        self.ctx.set_font(&format!("{}px system-ui, sans-serif", style.size_px));
        self.ctx.set_text_align(style.align.as_css());
        self.set_fill(style.color);
        let _ = self.ctx.fill_text(text, f64::from(position.x), f64::from(position.y));
    }
}
