//! The canvas hosts mounted by the page: particle background, sky map,
//! charts and the 3D timeline. Each is a [`CanvasScene`](crate::api::scene::CanvasScene).
//!
//! UI controls reach a host as `InputEvent::Custom { kind, a, b, c }`;
//! the `kind` constants live next to each host.

mod background;
mod chart;
mod sky_map;
mod timeline;

pub use background::{ParticleBackground, SET_INTENSITY, SET_MODE};
pub use chart::{ChartScene, SET_CHART_KIND};
pub use sky_map::{SkyMapScene, SET_HOURS, SET_OBSERVER, TOGGLE_LAYER};
pub use timeline::{
    TimelineScene, CLEAR_FILTER, SET_CATEGORY, SET_DECADE, SET_ZOOM, TOGGLE_ROTATION,
};

/// Read a custom-event payload as a list index. Negative or non-finite
/// values mean "none".
pub(crate) fn index_arg(value: f32) -> Option<usize> {
    (value.is_finite() && value >= 0.0).then(|| value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_arg_rejects_negative_and_nan() {
        assert_eq!(index_arg(2.0), Some(2));
        assert_eq!(index_arg(2.9), Some(2));
        assert_eq!(index_arg(-1.0), None);
        assert_eq!(index_arg(f32::NAN), None);
    }
}
