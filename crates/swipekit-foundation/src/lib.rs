//! Gesture foundation for swipekit.
//!
//! Normalized pointer input goes in; gesture sessions, sampled velocity,
//! axis lock/deactivation decisions and [`GestureEvent`]s come out. Nothing
//! here schedules work or touches a surface; see `swipekit-ui` for the engine
//! that wires these pieces to timers and a positioned element.

pub mod events;
pub mod gesture_constants;
pub mod gestures;
pub mod input;

pub use events::{
    GestureEvent, GestureEventBus, GestureEventKind, GestureEventSource, ResolvedPosition,
    SubscriptionId, TargetId,
};
pub use gestures::{
    Axis, AxisGuard, AxisGuardChange, Direction, GestureSession, VelocitySample, VelocityTracker,
};
pub use input::{InputEvent, InputKind, PointerId};
