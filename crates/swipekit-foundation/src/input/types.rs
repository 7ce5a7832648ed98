use std::cell::Cell;
use std::rc::Rc;

use swipekit_graphics::Vector2;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Start,
    Move,
    End,
    Cancel,
}

/// Pointer input already normalized by the routing layer.
///
/// Mouse, touch and pen all arrive in this shape. The host-default flag is
/// shared between copies so the routing layer can observe whether the engine
/// asked for native scrolling/panning to be suppressed.
#[derive(Clone, Debug)]
pub struct InputEvent {
    pub kind: InputKind,
    pub position: Vector2,
    pub pointer_id: Option<PointerId>,
    pub is_primary_button: bool,
    host_default_prevented: Rc<Cell<bool>>,
}

impl InputEvent {
    pub fn new(kind: InputKind, position: Vector2) -> Self {
        Self {
            kind,
            position,
            pointer_id: None,
            is_primary_button: true,
            host_default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn start(x: f32, y: f32) -> Self {
        Self::new(InputKind::Start, Vector2::new(x, y))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(InputKind::Move, Vector2::new(x, y))
    }

    pub fn end(x: f32, y: f32) -> Self {
        Self::new(InputKind::End, Vector2::new(x, y))
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(InputKind::Cancel, Vector2::new(x, y))
    }

    pub fn with_pointer_id(mut self, id: PointerId) -> Self {
        self.pointer_id = Some(id);
        self
    }

    pub fn with_primary_button(mut self, is_primary: bool) -> Self {
        self.is_primary_button = is_primary;
        self
    }

    /// Asks the host to skip its native behavior (scroll, pan, text selection).
    pub fn prevent_host_default(&self) {
        self.host_default_prevented.set(true);
    }

    pub fn is_host_default_prevented(&self) -> bool {
        self.host_default_prevented.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_default_flag_is_shared_between_copies() {
        let event = InputEvent::moved(1.0, 2.0).with_pointer_id(7);
        let copy = event.clone();
        copy.prevent_host_default();
        assert!(event.is_host_default_prevented());
        assert_eq!(event.pointer_id, Some(7));
    }

    #[test]
    fn constructors_default_to_primary_button() {
        let event = InputEvent::start(0.0, 0.0);
        assert!(event.is_primary_button);
        assert!(!event.with_primary_button(false).is_primary_button);
    }
}
