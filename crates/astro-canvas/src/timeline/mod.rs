//! 3D-ish timeline: events on a spiral, seen through a rotating camera.

mod event;
mod position;
mod projector;
mod view;

pub use event::{builtin_events, events_from_json, EventCategory, TimelineEvent};
pub use position::{
    assign_positions, spiral_position, PositionedEvent, SPIRAL_ANGLE_STEP, SPIRAL_BASE_RADIUS,
    SPIRAL_RADIUS_STEP, SPIRAL_RISE,
};
pub use projector::{project, Projection, TimelineProjector, BASE_SIZE, DEPTH_FACTOR, VERTICAL_FACTOR};
pub use view::{TimelineFilter, TimelineView};
