//! Geometric velocity decay for throws.
//!
//! A throw advances by its current velocity once per frame, then multiplies
//! the velocity by `friction`. It stops at the first frame whose velocity
//! magnitude is at or below `velocity_stop`.

use swipekit_graphics::Vector2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowDecaySpec {
    friction: f32,
    velocity_stop: f32,
}

impl ThrowDecaySpec {
    pub const DEFAULT_FRICTION: f32 = 0.94;
    pub const DEFAULT_VELOCITY_STOP: f32 = 0.08;

    /// `friction` must be in `(0, 1)` and `velocity_stop` positive; callers
    /// validate configuration before building a spec.
    pub fn new(friction: f32, velocity_stop: f32) -> Self {
        debug_assert!(friction > 0.0 && friction < 1.0);
        debug_assert!(velocity_stop > 0.0);
        Self {
            friction,
            velocity_stop,
        }
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn velocity_stop(&self) -> f32 {
        self.velocity_stop
    }

    pub fn is_finished(&self, velocity: Vector2) -> bool {
        !(velocity.length() > self.velocity_stop)
    }

    pub fn decay(&self, velocity: Vector2) -> Vector2 {
        velocity.scale(self.friction)
    }

    /// Number of advancing frames before a throw starting at speed `v0`
    /// falls to the stop threshold: `ceil(ln(stop / |v0|) / ln(friction))`.
    pub fn steps_to_stop(&self, v0: f32) -> u32 {
        let speed = v0.abs();
        if !(speed > self.velocity_stop) {
            return 0;
        }
        let steps = ((self.velocity_stop / speed).ln() / self.friction.ln()).ceil();
        if steps.is_finite() {
            steps as u32
        } else {
            0
        }
    }

    /// Distance covered over `steps` advancing frames.
    pub fn distance_after(&self, v0: f32, steps: u32) -> f32 {
        v0 * (1.0 - self.friction.powi(steps as i32)) / (1.0 - self.friction)
    }

    /// Distance covered by the whole throw.
    pub fn total_distance(&self, v0: f32) -> f32 {
        self.distance_after(v0, self.steps_to_stop(v0))
    }
}

impl Default for ThrowDecaySpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRICTION, Self::DEFAULT_VELOCITY_STOP)
    }
}
