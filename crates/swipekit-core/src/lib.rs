//! Single-threaded runtime for swipekit.
//!
//! Provides the two cooperative scheduling mechanisms the gesture engine is
//! built on: per-frame callbacks ([`FrameClock`]) and recurring interval
//! timers ([`RuntimeHandle::set_interval`]). Both hand out registrations that
//! cancel on drop, and both are driven explicitly by the host through
//! [`Runtime::drain_frame_callbacks`] and [`Runtime::pump_timers`].

mod frame_clock;
pub mod platform;
mod runtime;
mod timer;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{
    DefaultScheduler, ManualTimeSource, MonotonicTimeSource, RuntimeScheduler, TimeSource,
};
pub use runtime::{Runtime, RuntimeHandle};
pub use timer::IntervalRegistration;

pub type FrameCallbackId = u64;
pub type TimerId = u64;
