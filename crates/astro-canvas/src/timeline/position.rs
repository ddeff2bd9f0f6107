//! Spiral placement of timeline events.
//!
//! Positions are a pure function of each event's slot in the list being
//! shown. Filtering produces a new list and therefore new positions; the
//! unfiltered list always maps back to the same spiral.

use glam::Vec3;

/// Angle between consecutive events, in radians.
pub const SPIRAL_ANGLE_STEP: f32 = 0.6;
/// Radius of the first event.
pub const SPIRAL_BASE_RADIUS: f32 = 150.0;
/// Radius added per event.
pub const SPIRAL_RADIUS_STEP: f32 = 12.0;
/// Height added per event.
pub const SPIRAL_RISE: f32 = 18.0;

/// An event with its fixed pseudo-3D position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedEvent {
    /// Index of the event in the full event list.
    pub event: usize,
    pub position: Vec3,
}

/// Position of the `slot`-th shown event.
pub fn spiral_position(slot: usize) -> Vec3 {
    let i = slot as f32;
    let angle = i * SPIRAL_ANGLE_STEP;
    let radius = SPIRAL_BASE_RADIUS + i * SPIRAL_RADIUS_STEP;
    Vec3::new(angle.cos() * radius, i * SPIRAL_RISE, angle.sin() * radius)
}

/// Assign positions to the shown events, in order. `shown` holds indices
/// into the full event list.
pub fn assign_positions(shown: &[usize]) -> Vec<PositionedEvent> {
    shown
        .iter()
        .enumerate()
        .map(|(slot, &event)| PositionedEvent {
            event,
            position: spiral_position(slot),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_slot_is_on_the_x_axis() {
        assert_eq!(spiral_position(0), Vec3::new(150.0, 0.0, 0.0));
    }

    #[test]
    fn deterministic() {
        let shown: Vec<usize> = (0..17).collect();
        assert_eq!(assign_positions(&shown), assign_positions(&shown));
    }

    #[test]
    fn positions_follow_slot_not_event() {
        let filtered = assign_positions(&[4, 9]);
        assert_eq!(filtered[0].event, 4);
        assert_eq!(filtered[0].position, spiral_position(0));
        assert_eq!(filtered[1].position, spiral_position(1));
    }
}
