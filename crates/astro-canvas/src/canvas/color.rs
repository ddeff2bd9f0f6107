use serde::{Deserialize, Serialize};

/// RGBA color with straight (non-premultiplied) components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with a replaced alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: clamp_unit(a), ..self }
    }

    /// Same color with alpha multiplied by `factor`, clamped to [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// CSS `rgba()` string for the browser canvas.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            clamp_unit(self.a),
        )
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn to_byte(v: f32) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}
