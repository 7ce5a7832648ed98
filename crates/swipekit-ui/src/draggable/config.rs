use swipekit_animation::ThrowDecaySpec;
use swipekit_foundation::gesture_constants::{
    DEFAULT_AMPLIFIER, DRAG_THRESHOLD, LOCK_THRESHOLD, MAX_VELOCITY, SWIPE_VELOCITY,
    THROW_FRICTION, VELOCITY_SAMPLE_INTERVAL_MS, VELOCITY_STOP,
};
use swipekit_foundation::Axis;

use crate::ConfigurationError;

/// Construction-time settings for a [`crate::Draggable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableConfig {
    pub axis: Axis,
    /// Multiplier in `[0, 1]` applied to every pointer increment.
    pub friction: f32,
    /// Release velocity (px/ms) to throw velocity (px/frame) factor.
    pub amplifier: f32,
    pub velocity_stop: f32,
    /// Per-frame throw decay in `(0, 1)`.
    pub throw_friction: f32,
    pub is_throwable: bool,
    /// Ask the host to suppress native scrolling once the axis locks.
    pub prevent_host_default: bool,
    pub sample_interval_ms: u64,
    pub max_velocity: f32,
    pub lock_threshold: f32,
    pub drag_threshold: f32,
    pub swipe_velocity: f32,
}

impl Default for DraggableConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Both,
            friction: 1.0,
            amplifier: DEFAULT_AMPLIFIER,
            velocity_stop: VELOCITY_STOP,
            throw_friction: THROW_FRICTION,
            is_throwable: false,
            prevent_host_default: true,
            sample_interval_ms: VELOCITY_SAMPLE_INTERVAL_MS,
            max_velocity: MAX_VELOCITY,
            lock_threshold: LOCK_THRESHOLD,
            drag_threshold: DRAG_THRESHOLD,
            swipe_velocity: SWIPE_VELOCITY,
        }
    }
}

impl DraggableConfig {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_amplifier(mut self, amplifier: f32) -> Self {
        self.amplifier = amplifier;
        self
    }

    pub fn with_velocity_stop(mut self, velocity_stop: f32) -> Self {
        self.velocity_stop = velocity_stop;
        self
    }

    pub fn with_throw_friction(mut self, throw_friction: f32) -> Self {
        self.throw_friction = throw_friction;
        self
    }

    pub fn throwable(mut self, is_throwable: bool) -> Self {
        self.is_throwable = is_throwable;
        self
    }

    pub fn with_prevent_host_default(mut self, prevent: bool) -> Self {
        self.prevent_host_default = prevent;
        self
    }

    pub fn with_sample_interval(mut self, millis: u64) -> Self {
        self.sample_interval_ms = millis;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check(
            "friction",
            self.friction,
            (0.0..=1.0).contains(&self.friction),
            "must be within [0, 1]",
        )?;
        check(
            "throw_friction",
            self.throw_friction,
            self.throw_friction > 0.0 && self.throw_friction < 1.0,
            "must be within (0, 1)",
        )?;
        check_positive("velocity_stop", self.velocity_stop)?;
        check_positive("amplifier", self.amplifier)?;
        check_positive("max_velocity", self.max_velocity)?;
        check_non_negative("lock_threshold", self.lock_threshold)?;
        check_non_negative("drag_threshold", self.drag_threshold)?;
        check_non_negative("swipe_velocity", self.swipe_velocity)?;
        if self.sample_interval_ms == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "sample_interval_ms",
                value: 0.0,
                reason: "must be at least 1ms",
            });
        }
        Ok(())
    }

    pub(crate) fn throw_spec(&self) -> ThrowDecaySpec {
        ThrowDecaySpec::new(self.throw_friction, self.velocity_stop)
    }
}

fn check(
    name: &'static str,
    value: f32,
    ok: bool,
    reason: &'static str,
) -> Result<(), ConfigurationError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    check(name, value, value.is_finite() && value > 0.0, "must be finite and positive")
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigurationError> {
    check(name, value, value.is_finite() && value >= 0.0, "must be finite and non-negative")
}
