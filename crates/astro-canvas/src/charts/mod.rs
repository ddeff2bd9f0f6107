//! Astronomical charts: line, area and bar series over a shared value axis.

mod renderer;

pub use renderer::{ChartPoint, ChartRenderer, PlotArea};

use serde::{Deserialize, Serialize};

use crate::canvas::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    #[default]
    Line,
    Area,
    Bar,
}

/// One named run of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f32>,
    pub color: Color,
}

impl Series {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            values: Vec::new(),
            color,
        }
    }

    /// Append a sample, dropping the oldest beyond `window` samples.
    pub fn push_windowed(&mut self, value: f32, window: usize) {
        self.values.push(value);
        if self.values.len() > window {
            let excess = self.values.len() - window;
            self.values.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartView {
    pub kind: ChartKind,
    pub title: String,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Default for ChartView {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            title: String::new(),
            show_grid: true,
            show_legend: true,
        }
    }
}

/// Largest finite sample across all series, or 1 when there is none
/// (or it is not positive), so normalization never divides by zero.
pub fn value_ceiling(series: &[Series]) -> f32 {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}
