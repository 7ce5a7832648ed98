//! Interval-sampled drag velocity.
//!
//! Unlike a ring-buffer tracker fed on every move, this samples the session
//! on a fixed wall-clock interval: velocity is the friction-scaled movement
//! since the previous sample divided by the time since that sample. The
//! interval timer itself belongs to whoever owns the session; the tracker
//! only does the math and remembers the last sample.

use swipekit_graphics::Vector2;

use crate::gesture_constants::MAX_VELOCITY;
use crate::gestures::GestureSession;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocitySample {
    /// Pixels per millisecond, each component within `[-max, max]`.
    pub velocity: Vector2,
    pub sampled_at: u64,
}

#[derive(Clone, Debug)]
pub struct VelocityTracker {
    max_velocity: f32,
    last: VelocitySample,
    sampled_this_session: bool,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(MAX_VELOCITY)
    }
}

impl VelocityTracker {
    pub fn new(max_velocity: f32) -> Self {
        let max_velocity = if max_velocity.is_finite() && max_velocity > 0.0 {
            max_velocity
        } else {
            MAX_VELOCITY
        };
        Self {
            max_velocity,
            last: VelocitySample::default(),
            sampled_this_session: false,
        }
    }

    /// Prepares for a new session; the previous gesture's velocity is dropped.
    pub fn begin(&mut self, time: u64) {
        self.last = VelocitySample {
            velocity: Vector2::ZERO,
            sampled_at: time,
        };
        self.sampled_this_session = false;
    }

    /// Takes one sample from `session` at `now` and moves its sampling window.
    pub fn sample(&mut self, session: &mut GestureSession, now: u64) -> VelocitySample {
        let (raw, elapsed) = session.since_last_sample(now);
        let delta = session.apply_friction(raw);
        let velocity = velocity_over(delta, elapsed, self.max_velocity);
        session.mark_sampled(now);

        self.last = VelocitySample {
            velocity,
            sampled_at: now,
        };
        self.sampled_this_session = true;
        log::trace!(
            "velocity sample at {now}ms: ({:.3}, {:.3}) px/ms over {elapsed}ms",
            velocity.x,
            velocity.y
        );
        self.last
    }

    /// Closes the session. If the gesture was too short for the interval
    /// to fire, one final sample is forced.
    pub fn finish(&mut self, session: &mut GestureSession, now: u64) -> VelocitySample {
        if !self.sampled_this_session {
            self.sample(session, now);
        }
        self.last
    }

    pub fn velocity(&self) -> Vector2 {
        self.last.velocity
    }

    pub fn last_sample(&self) -> VelocitySample {
        self.last
    }

    pub fn has_sampled(&self) -> bool {
        self.sampled_this_session
    }

    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }
}

/// `delta / elapsed`, clamped per axis. A zero-length interval yields zero.
pub fn velocity_over(delta: Vector2, elapsed_millis: u64, max_velocity: f32) -> Vector2 {
    if elapsed_millis == 0 {
        if delta != Vector2::ZERO {
            log::warn!("velocity over a zero-length interval (delta {delta:?}) normalized to zero");
        }
        return Vector2::ZERO;
    }
    let elapsed = elapsed_millis as f32;
    let raw = Vector2::new(delta.x / elapsed, delta.y / elapsed);
    if !raw.is_finite() {
        log::warn!("non-finite velocity {raw:?} normalized to zero");
    }
    raw.finite_or_zero().clamp_components(max_velocity)
}
