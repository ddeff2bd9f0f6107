/// Input events a canvas host understands.
/// Coordinates are canvas pixels; the bridge converts from client space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the canvas.
    PointerLeave,
    /// Wheel or pinch; positive `delta` scrolls away from the viewer.
    Wheel { delta: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A custom event from the UI layer (toggles, filters, sliders).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub fn pointer(&self) -> Option<glam::Vec2> {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::PointerMove { x, y } => Some(glam::Vec2::new(x, y)),
            _ => None,
        }
    }
}

/// A queue of input events.
/// JS pushes events between frames; the runner drains them once per tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta: -1.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn pointer_position_only_for_pointer_events() {
        let down = InputEvent::PointerMove { x: 3.0, y: 4.0 };
        assert_eq!(down.pointer(), Some(glam::Vec2::new(3.0, 4.0)));
        assert_eq!(InputEvent::PointerLeave.pointer(), None);
        assert_eq!(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 }.pointer(), None);
    }
}
