use std::cell::Cell;
use std::rc::Rc;

use swipekit_graphics::Vector2;

use crate::gestures::{Axis, Direction, GestureSession};

pub type TargetId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEventKind {
    Start,
    Move,
    End,
    /// Terminal event of a throw, after snapping to whole pixels.
    Settle,
}

/// Draggable position in pixels and as a percentage of its container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedPosition {
    pub pixel: Vector2,
    pub percent: Vector2,
}

/// Normalized gesture data handed to subscribers.
///
/// Handlers receive `&GestureEvent`; the only thing they can change is the
/// shared `default_prevented` flag via [`GestureEvent::prevent_default`].
#[derive(Clone, Debug)]
pub struct GestureEvent {
    pub kind: GestureEventKind,
    pub target: TargetId,
    pub axis: Axis,
    /// Friction-scaled delta accumulated over the session (and throw).
    pub delta: Vector2,
    /// Milliseconds since the session started.
    pub delta_time: u64,
    pub start_position: Vector2,
    pub end_position: Vector2,
    /// Last sampled drag velocity, px/ms.
    pub velocity: Vector2,
    /// Throw velocity for `Settle`; equal to `velocity` otherwise.
    pub current_velocity: Vector2,
    pub distance: f32,
    pub direction: Direction,
    pub axis_direction: Direction,
    pub is_direction_on_axis: bool,
    pub did_move_on_axis: bool,
    pub position: ResolvedPosition,
    /// Set on the `End` event of a gesture closed by a cancel input.
    pub was_cancelled: bool,
    default_prevented: Rc<Cell<bool>>,
}

impl GestureEvent {
    pub fn from_session(
        kind: GestureEventKind,
        target: TargetId,
        axis: Axis,
        session: &GestureSession,
        velocity: Vector2,
        current_velocity: Vector2,
        position: ResolvedPosition,
    ) -> Self {
        let delta = session.cumulative_delta();
        let direction = Direction::classify(delta);
        let axis_direction = Direction::classify_on_axis(delta, axis);
        Self {
            kind,
            target,
            axis,
            delta,
            delta_time: session.elapsed_time(),
            start_position: session.start_position(),
            end_position: session.current_position(),
            velocity,
            current_velocity,
            distance: delta.length(),
            direction,
            axis_direction,
            is_direction_on_axis: axis.allows(direction),
            did_move_on_axis: axis.project(delta) != Vector2::ZERO,
            position,
            was_cancelled: false,
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn cancelled(mut self, was_cancelled: bool) -> Self {
        self.was_cancelled = was_cancelled;
        self
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
