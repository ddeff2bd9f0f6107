//! Pointer hit-testing shared by the sky map, the charts and the timeline.

use glam::Vec2;

/// A click selects an item when it lands within this many multiples of the
/// item's drawn size from its screen center.
pub const HIT_RADIUS_FACTOR: f32 = 3.0;

/// True when `point` is within `HIT_RADIUS_FACTOR × size` of `center`.
pub fn is_hit(center: Vec2, size: f32, point: Vec2) -> bool {
    center.distance(point) <= HIT_RADIUS_FACTOR * size
}

/// Return the key of the nearest item that passes [`is_hit`].
/// Ties keep the earliest item.
pub fn nearest_hit<K>(items: impl IntoIterator<Item = (K, Vec2, f32)>, point: Vec2) -> Option<K> {
    let mut best: Option<(K, f32)> = None;
    for (key, center, size) in items {
        if !is_hit(center, size, point) {
            continue;
        }
        let d = center.distance(point);
        match &best {
            Some((_, best_d)) if *best_d <= d => {}
            _ => best = Some((key, d)),
        }
    }
    best.map(|(k, _)| k)
}
