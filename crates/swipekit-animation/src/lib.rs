//! Momentum animation for swipekit.
//!
//! [`ThrowDecaySpec`] is the pure geometric-decay model; [`ThrowAnimation`]
//! drives it one display frame at a time through the runtime's frame clock.

mod throw_animation;
mod throw_spec;

pub use throw_animation::{ThrowAnimation, BOUNDARY_EPSILON};
pub use throw_spec::ThrowDecaySpec;
