//! Draggable elements for swipekit
//!
//! Ties the gesture primitives from `swipekit-foundation` to a positioned
//! element: axis-constrained dragging inside [`Limits`], percent/pixel
//! conversion against a measured container, and momentum throws on release.

mod draggable;
mod error;

pub use draggable::{DragTarget, Draggable, DraggableConfig, Positioner};
pub use error::{ConfigurationError, StateError};

pub use swipekit_foundation::{
    Axis, Direction, GestureEvent, GestureEventKind, GestureEventSource, InputEvent, InputKind,
    ResolvedPosition,
};
pub use swipekit_graphics::{Limits, Size, Vector2};

pub mod prelude {
    pub use crate::{
        Axis, DragTarget, Draggable, DraggableConfig, GestureEvent, GestureEventKind,
        GestureEventSource, InputEvent, Limits, Size, StateError, Vector2,
    };
}
