//! Pluggable sample feeds for the charts.
//!
//! Renderers never generate data themselves: a host pulls values from a
//! `SeriesSource`, so the mock random walks below can be swapped for a real
//! feed without touching any drawing code.

use crate::canvas::Color;
use crate::charts::Series;
use crate::core::rng::Rng;

/// A stream of samples for one chart series.
pub trait SeriesSource {
    fn label(&self) -> &str;

    fn color(&self) -> Color;

    /// Produce the next sample.
    fn next_value(&mut self) -> f32;
}

/// Fill a fresh series with `count` samples from `source`.
pub fn sample_series(source: &mut dyn SeriesSource, count: usize) -> Series {
    let mut series = Series::new(source.label(), source.color());
    series.values = (0..count).map(|_| source.next_value()).collect();
    series
}

/// Bounded random walk, the stand-in for live telemetry.
#[derive(Debug, Clone)]
pub struct RandomWalkSource {
    label: String,
    color: Color,
    value: f32,
    min: f32,
    max: f32,
    max_step: f32,
    rng: Rng,
}

impl RandomWalkSource {
    pub fn new(label: impl Into<String>, color: Color, min: f32, max: f32, max_step: f32, seed: u64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            label: label.into(),
            color,
            value: (min + max) / 2.0,
            min,
            max,
            max_step: max_step.abs(),
            rng: Rng::new(seed),
        }
    }
}

impl SeriesSource for RandomWalkSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn color(&self) -> Color {
        self.color
    }

    fn next_value(&mut self) -> f32 {
        self.value = (self.value + self.rng.signed(self.max_step)).clamp(self.min, self.max);
        self.value
    }
}

/// Replays a fixed list of values, cycling at the end.
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    color: Color,
    values: Vec<f32>,
    cursor: usize,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, color: Color, values: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            color,
            values,
            cursor: 0,
        }
    }
}

impl SeriesSource for StaticSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn color(&self) -> Color {
        self.color
    }

    fn next_value(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }
}

/// Mock solar activity feeds: sunspot number, solar wind speed (km/s / 10)
/// and planetary K-index (×10).
pub fn solar_activity_sources(seed: u64) -> Vec<Box<dyn SeriesSource>> {
    vec![
        Box::new(RandomWalkSource::new("Sunspots", Color::rgb(1.0, 0.75, 0.25), 40.0, 200.0, 12.0, seed)),
        Box::new(RandomWalkSource::new("Wind", Color::rgb(0.4, 0.75, 1.0), 30.0, 80.0, 4.0, seed.wrapping_add(1))),
        Box::new(RandomWalkSource::new("Kp", Color::rgb(0.55, 1.0, 0.6), 0.0, 90.0, 8.0, seed.wrapping_add(2))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_walk_stays_in_bounds() {
        let mut src = RandomWalkSource::new("x", Color::WHITE, 10.0, 20.0, 5.0, 3);
        for _ in 0..1000 {
            let v = src.next_value();
            assert!((10.0..=20.0).contains(&v));
        }
    }

    #[test]
    fn random_walk_is_deterministic_per_seed() {
        let mut a = RandomWalkSource::new("x", Color::WHITE, 0.0, 1.0, 0.1, 9);
        let mut b = RandomWalkSource::new("x", Color::WHITE, 0.0, 1.0, 0.1, 9);
        let sa = sample_series(&mut a, 20);
        let sb = sample_series(&mut b, 20);
        assert_eq!(sa, sb);
        assert_eq!(sa.values.len(), 20);
    }

    #[test]
    fn static_source_cycles() {
        let mut src = StaticSource::new("s", Color::WHITE, vec![1.0, 2.0]);
        let got: Vec<f32> = (0..5).map(|_| src.next_value()).collect();
        assert_eq!(got, vec![1.0, 2.0, 1.0, 2.0, 1.0]);
        let mut empty = StaticSource::new("e", Color::WHITE, vec![]);
        assert_eq!(empty.next_value(), 0.0);
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let mut src = RandomWalkSource::new("x", Color::WHITE, 5.0, 1.0, 1.0, 1);
        let v = src.next_value();
        assert!((1.0..=5.0).contains(&v));
    }
}
