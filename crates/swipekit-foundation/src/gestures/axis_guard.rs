//! Axis lock / deactivation heuristics.
//!
//! Two flags per session, both sticky until the next [`AxisGuard::begin`]:
//! `locked` (the drag owns the gesture, host scrolling is suppressed) and
//! `deactivated` (motion went off-axis first, position writes stop). Lock is
//! checked before deactivation on every observation, and a locked session is
//! never deactivated.

use swipekit_graphics::Vector2;

use crate::gesture_constants::{DRAG_THRESHOLD, LOCK_THRESHOLD};
use crate::gestures::Axis;

/// Flags that flipped during one [`AxisGuard::observe`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisGuardChange {
    pub locked: bool,
    pub deactivated: bool,
}

#[derive(Clone, Debug)]
pub struct AxisGuard {
    axis: Axis,
    lock_threshold: f32,
    drag_threshold: f32,
    locked: bool,
    deactivated: bool,
}

impl AxisGuard {
    pub fn new(axis: Axis) -> Self {
        Self::with_thresholds(axis, LOCK_THRESHOLD, DRAG_THRESHOLD)
    }

    pub fn with_thresholds(axis: Axis, lock_threshold: f32, drag_threshold: f32) -> Self {
        Self {
            axis,
            lock_threshold,
            drag_threshold,
            locked: false,
            deactivated: false,
        }
    }

    /// Resets both flags for a new session. `Both` locks immediately.
    pub fn begin(&mut self) -> AxisGuardChange {
        self.locked = self.axis == Axis::Both;
        self.deactivated = false;
        AxisGuardChange {
            locked: self.locked,
            deactivated: false,
        }
    }

    /// Feeds the session's accumulated delta.
    pub fn observe(&mut self, accumulated: Vector2) -> AxisGuardChange {
        let mut change = AxisGuardChange::default();
        if self.locked || self.deactivated {
            return change;
        }

        if self.axis.along(accumulated) > self.lock_threshold {
            self.locked = true;
            change.locked = true;
            log::debug!("axis {:?} locked at {accumulated:?}", self.axis);
        } else if self.axis.across(accumulated) > self.drag_threshold {
            self.deactivated = true;
            change.deactivated = true;
            log::debug!("axis {:?} deactivated at {accumulated:?}", self.axis);
        }
        change
    }

    /// Clears both flags when the session ends.
    pub fn end(&mut self) {
        self.locked = false;
        self.deactivated = false;
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_deactivated(&self) -> bool {
        self.deactivated
    }
}
