//! Platform abstraction traits for swipekit runtime services.
//!
//! These traits let the host decide when frames are produced and where time
//! comes from, so the gesture engine runs the same way under a real event
//! loop and under a scripted test.

use std::cell::Cell;
use web_time::Instant;

/// Receives frame requests from the runtime.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler for hosts that poll `Runtime::needs_frame` instead.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Monotonic millisecond clock used for gesture timestamps and timers.
pub trait TimeSource {
    fn now_millis(&self) -> u64;
}

/// Wall-clock time measured from construction.
pub struct MonotonicTimeSource {
    origin: Instant,
}

impl MonotonicTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to. Used by tests and input replay.
#[derive(Default)]
pub struct ManualTimeSource {
    now: Cell<u64>,
}

impl ManualTimeSource {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: Cell::new(start_millis),
        }
    }

    pub fn set(&self, millis: u64) {
        debug_assert!(millis >= self.now.get(), "manual clock moved backwards");
        self.now.set(millis.max(self.now.get()));
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualTimeSource::new(10);
        assert_eq!(clock.now_millis(), 10);
        clock.advance(16);
        assert_eq!(clock.now_millis(), 26);
        clock.set(100);
        assert_eq!(clock.now_millis(), 100);
    }

    #[test]
    fn monotonic_clock_never_decreases() {
        let clock = MonotonicTimeSource::new();
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(second >= first);
    }
}
