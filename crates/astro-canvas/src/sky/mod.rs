//! Sky map: catalog data, dome projection, renderer and picking.

mod catalog;
mod projection;
mod renderer;

pub use catalog::{CelestialObject, Constellation, ObjectKind, SkyCatalog};
pub use projection::{Observer, SkyProjection, HORIZON_MARGIN};
pub use renderer::{layout, ScreenItem, SkyRenderer, SkyView};
