//! Per-drag mutable record.

use swipekit_graphics::Vector2;

/// State of one continuous drag, from press to release or cancel.
///
/// Positions are raw pointer positions; `cumulative_delta` is the
/// friction-scaled sum of every incremental move. Friction scales only the
/// increments, never the positions themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    friction: f32,
    start_position: Vector2,
    current_position: Vector2,
    last_sampled_position: Vector2,
    last_delta: Vector2,
    cumulative_delta: Vector2,
    start_time: u64,
    last_sample_time: u64,
    elapsed_time: u64,
}

impl GestureSession {
    /// Opens a session at `position`. `friction` is clamped into `[0, 1]`.
    pub fn start(position: Vector2, time: u64, friction: f32) -> Self {
        let friction = if friction.is_finite() {
            friction.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            friction,
            start_position: position,
            current_position: position,
            last_sampled_position: position,
            last_delta: Vector2::ZERO,
            cumulative_delta: Vector2::ZERO,
            start_time: time,
            last_sample_time: time,
            elapsed_time: 0,
        }
    }

    /// Records a move and returns the friction-scaled increment.
    pub fn update(&mut self, position: Vector2, time: u64) -> Vector2 {
        let raw = position - self.current_position;
        self.last_delta = self.apply_friction(raw);
        self.cumulative_delta.accumulate(self.last_delta);
        self.current_position = position;
        self.elapsed_time = time.saturating_sub(self.start_time);
        self.last_delta
    }

    pub fn end(&mut self, time: u64) {
        self.elapsed_time = time.saturating_sub(self.start_time);
    }

    /// Adds an already-scaled increment, e.g. one throw frame.
    pub fn advance(&mut self, delta: Vector2) {
        self.last_delta = delta;
        self.cumulative_delta.accumulate(delta);
    }

    pub fn apply_friction(&self, raw: Vector2) -> Vector2 {
        raw.scale(self.friction)
    }

    /// Raw movement since the last velocity sample and the time it spanned.
    pub fn since_last_sample(&self, now: u64) -> (Vector2, u64) {
        (
            self.current_position - self.last_sampled_position,
            now.saturating_sub(self.last_sample_time),
        )
    }

    pub fn mark_sampled(&mut self, now: u64) {
        self.last_sampled_position = self.current_position;
        self.last_sample_time = now;
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn start_position(&self) -> Vector2 {
        self.start_position
    }

    pub fn current_position(&self) -> Vector2 {
        self.current_position
    }

    pub fn last_sampled_position(&self) -> Vector2 {
        self.last_sampled_position
    }

    pub fn last_delta(&self) -> Vector2 {
        self.last_delta
    }

    pub fn cumulative_delta(&self) -> Vector2 {
        self.cumulative_delta
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn last_sample_time(&self) -> u64 {
        self.last_sample_time
    }

    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }
}
