//! Canvas abstraction: colors, the `Canvas2D` drawing contract, and a
//! recording backend for headless use.

mod color;
mod recording;
mod traits;

pub use color::Color;
pub use recording::{DrawCommand, RecordingCanvas};
pub use traits::{Canvas2D, TextAlign, TextStyle};
