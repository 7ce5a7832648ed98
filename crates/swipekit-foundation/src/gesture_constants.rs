//! Shared gesture constants for consistent pointer handling.
//!
//! All distances are in logical pixels and all velocities in pixels per
//! millisecond unless stated otherwise.

/// Movement along the configured axis after which the drag is committed and
/// host scrolling is suppressed.
pub const LOCK_THRESHOLD: f32 = 6.0;

/// Movement perpendicular to the configured axis after which an unlocked
/// drag is abandoned.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Release velocity above which a throwable draggable starts a throw.
pub const SWIPE_VELOCITY: f32 = 0.6;

/// Per-axis cap on sampled velocity. Filters single-sample spikes.
pub const MAX_VELOCITY: f32 = 12.0;

/// Wall-clock period between velocity samples while a session is open.
pub const VELOCITY_SAMPLE_INTERVAL_MS: u64 = 100;

/// Throw velocity (px/frame) below which the throw settles.
pub const VELOCITY_STOP: f32 = 0.08;

/// Per-frame multiplier applied to throw velocity.
pub const THROW_FRICTION: f32 = 0.94;

/// Converts release velocity (px/ms) into throw velocity (px/frame).
///
/// One frame at 60Hz is ~16ms.
pub const DEFAULT_AMPLIFIER: f32 = 16.0;
