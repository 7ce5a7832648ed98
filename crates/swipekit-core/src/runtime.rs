use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::{DefaultScheduler, ManualTimeSource, MonotonicTimeSource};
use crate::platform::{RuntimeScheduler, TimeSource};
use crate::timer::IntervalRegistration;
use crate::{FrameCallbackId, TimerId};

pub(crate) struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

type TimerCallback = Rc<RefCell<Box<dyn FnMut(u64) + 'static>>>;

struct TimerEntry {
    id: TimerId,
    period_millis: u64,
    next_due_millis: u64,
    callback: TimerCallback,
}

struct RuntimeInner {
    scheduler: Rc<dyn RuntimeScheduler>,
    time_source: Rc<dyn TimeSource>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    timers: RefCell<SmallVec<[TimerEntry; 4]>>,
    next_timer_id: Cell<TimerId>,
    needs_frame: Cell<bool>,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn RuntimeScheduler>, time_source: Rc<dyn TimeSource>) -> Self {
        Self {
            scheduler,
            time_source,
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            timers: RefCell::new(SmallVec::new()),
            next_timer_id: Cell::new(1),
            needs_frame: Cell::new(false),
        }
    }

    fn schedule(&self) {
        if !self.needs_frame.replace(true) {
            self.scheduler.schedule_frame();
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        self.needs_frame.set(false);
        for callback in pending {
            callback(frame_time_nanos);
        }
        if self.has_frame_callbacks() {
            self.schedule();
        }
    }

    fn set_interval(&self, period_millis: u64, callback: Box<dyn FnMut(u64) + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        if period_millis == 0 {
            log::warn!("interval timer {id} requested a 0ms period; using 1ms");
        }
        let period_millis = period_millis.max(1);
        let now = self.time_source.now_millis();
        self.timers.borrow_mut().push(TimerEntry {
            id,
            period_millis,
            next_due_millis: now.saturating_add(period_millis),
            callback: Rc::new(RefCell::new(callback)),
        });
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|entry| entry.id != id);
    }

    /// Fires every timer whose deadline has passed, once each.
    ///
    /// Missed periods are skipped rather than replayed: the next deadline is
    /// the first multiple of the period strictly after `now`.
    fn pump_timers(&self) -> usize {
        let now = self.time_source.now_millis();
        let due: SmallVec<[(TimerId, TimerCallback); 4]> = {
            let mut timers = self.timers.borrow_mut();
            let mut due = SmallVec::new();
            for entry in timers.iter_mut() {
                if entry.next_due_millis <= now {
                    let behind = (now - entry.next_due_millis) / entry.period_millis + 1;
                    entry.next_due_millis += behind * entry.period_millis;
                    due.push((entry.id, Rc::clone(&entry.callback)));
                }
            }
            due
        };

        let mut fired = 0;
        for (id, callback) in due {
            // An earlier callback in this pump may have cancelled this timer.
            let still_registered = self.timers.borrow().iter().any(|entry| entry.id == id);
            if !still_registered {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => {
                    (&mut **callback)(now);
                    fired += 1;
                }
                Err(_) => {
                    log::warn!("interval timer {id} is already running; skipping re-entrant tick")
                }
            }
        }
        fired
    }

    fn has_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }
}

/// Owner of the frame queue, interval timers and clock for one host.
///
/// Everything here runs on the thread that created the runtime; callbacks may
/// capture `Rc`/`RefCell` values.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn RuntimeScheduler>, time_source: Rc<dyn TimeSource>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler, time_source)),
        }
    }

    /// Runtime driven by wall-clock time.
    pub fn monotonic() -> Self {
        Self::new(
            Rc::new(DefaultScheduler),
            Rc::new(MonotonicTimeSource::new()),
        )
    }

    /// Runtime whose clock only advances through the returned handle.
    pub fn manual(start_millis: u64) -> (Self, Rc<ManualTimeSource>) {
        let clock = Rc::new(ManualTimeSource::new(start_millis));
        let runtime = Self::new(Rc::new(DefaultScheduler), clock.clone());
        (runtime, clock)
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    pub fn now_millis(&self) -> u64 {
        self.inner.time_source.now_millis()
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    /// Runs due interval timers and returns how many fired.
    pub fn pump_timers(&self) -> usize {
        self.inner.pump_timers()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    pub fn has_timers(&self) -> bool {
        self.inner.has_timers()
    }
}

/// Non-owning access to a [`Runtime`].
///
/// Every operation is a no-op once the runtime has been dropped, so engines
/// holding a handle never keep the host's runtime alive.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn now_millis(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.time_source.now_millis())
            .unwrap_or(0)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Starts a recurring timer; the callback receives the pump time in ms.
    pub fn set_interval(
        &self,
        period_millis: u64,
        callback: impl FnMut(u64) + 'static,
    ) -> IntervalRegistration {
        match self.inner.upgrade() {
            Some(inner) => {
                let id = inner.set_interval(period_millis, Box::new(callback));
                IntervalRegistration::new(self.clone(), id)
            }
            None => IntervalRegistration::inactive(self.clone()),
        }
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_timer(id);
        }
    }

    pub fn pump_timers(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| inner.pump_timers())
            .unwrap_or(0)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingScheduler(Cell<usize>);

    impl RuntimeScheduler for CountingScheduler {
        fn schedule_frame(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn frame_callbacks_run_once_in_order() {
        let (runtime, _clock) = Runtime::manual(0);
        let handle = runtime.handle();
        let log = Rc::new(RefCell::new(Vec::new()));

        for label in ["a", "b"] {
            let log = Rc::clone(&log);
            handle.register_frame_callback(move |time| log.borrow_mut().push((label, time)));
        }
        assert!(runtime.needs_frame());

        runtime.drain_frame_callbacks(16);
        runtime.drain_frame_callbacks(32);

        assert_eq!(*log.borrow(), vec![("a", 16), ("b", 16)]);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn callbacks_registered_during_drain_wait_for_next_frame() {
        let (runtime, _clock) = Runtime::manual(0);
        let handle = runtime.handle();
        let hits = Rc::new(Cell::new(0));

        {
            let inner_handle = handle.clone();
            let hits = Rc::clone(&hits);
            handle.register_frame_callback(move |_| {
                hits.set(hits.get() + 1);
                let hits = Rc::clone(&hits);
                inner_handle.register_frame_callback(move |_| hits.set(hits.get() + 10));
            });
        }

        runtime.drain_frame_callbacks(1);
        assert_eq!(hits.get(), 1);
        assert!(runtime.needs_frame());
        runtime.drain_frame_callbacks(2);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn cancelled_frame_callback_never_runs() {
        let (runtime, _clock) = Runtime::manual(0);
        let handle = runtime.handle();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let id = handle
            .register_frame_callback(move |_| flag.set(true))
            .expect("runtime alive");
        handle.cancel_frame_callback(id);
        runtime.drain_frame_callbacks(16);
        assert!(!ran.get());
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn scheduler_is_notified_once_per_pending_frame() {
        let scheduler = Rc::new(CountingScheduler(Cell::new(0)));
        let runtime = Runtime::new(scheduler.clone(), Rc::new(ManualTimeSource::new(0)));
        let handle = runtime.handle();
        handle.register_frame_callback(|_| {});
        handle.register_frame_callback(|_| {});
        assert_eq!(scheduler.0.get(), 1);
        runtime.drain_frame_callbacks(0);
        handle.register_frame_callback(|_| {});
        assert_eq!(scheduler.0.get(), 2);
    }

    #[test]
    fn interval_fires_once_per_pump_and_skips_missed_periods() {
        let (runtime, clock) = Runtime::manual(0);
        let handle = runtime.handle();
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&ticks);
        let _registration = handle.set_interval(100, move |now| sink.borrow_mut().push(now));

        clock.set(99);
        assert_eq!(runtime.pump_timers(), 0);
        clock.set(100);
        assert_eq!(runtime.pump_timers(), 1);
        clock.set(450);
        assert_eq!(runtime.pump_timers(), 1);
        clock.set(499);
        assert_eq!(runtime.pump_timers(), 0);
        clock.set(500);
        assert_eq!(runtime.pump_timers(), 1);

        assert_eq!(*ticks.borrow(), vec![100, 450, 500]);
    }

    #[test]
    fn zero_period_interval_ticks_every_millisecond() {
        let (runtime, clock) = Runtime::manual(0);
        let ticks = Rc::new(Cell::new(0));
        let sink = Rc::clone(&ticks);
        let _registration = runtime.handle().set_interval(0, move |_| sink.set(sink.get() + 1));

        assert_eq!(runtime.pump_timers(), 0);
        clock.set(1);
        assert_eq!(runtime.pump_timers(), 1);
        clock.set(2);
        assert_eq!(runtime.pump_timers(), 1);
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn re_entrant_pump_skips_running_timer() {
        let (runtime, clock) = Runtime::manual(0);
        let handle = runtime.handle();
        let nested = Rc::new(Cell::new(None));
        let sink = Rc::clone(&nested);
        let inner_handle = handle.clone();
        let inner_clock = Rc::clone(&clock);
        let _registration = handle.set_interval(10, move |now| {
            if sink.get().is_none() {
                inner_clock.set(now + 10);
                sink.set(Some(inner_handle.pump_timers()));
            }
        });

        clock.set(10);
        assert_eq!(runtime.pump_timers(), 1);
        assert_eq!(nested.get(), Some(0));
    }

    #[test]
    fn dropping_interval_registration_cancels_timer() {
        let (runtime, clock) = Runtime::manual(0);
        let handle = runtime.handle();
        let registration = handle.set_interval(10, |_| {});
        assert!(runtime.has_timers());
        drop(registration);
        assert!(!runtime.has_timers());
        clock.set(100);
        assert_eq!(runtime.pump_timers(), 0);
    }

    #[test]
    fn handle_outliving_runtime_is_inert() {
        let (runtime, _clock) = Runtime::manual(5);
        let handle = runtime.handle();
        assert_eq!(handle.now_millis(), 5);
        drop(runtime);
        assert!(!handle.is_alive());
        assert!(handle.register_frame_callback(|_| {}).is_none());
        assert_eq!(handle.pump_timers(), 0);
        assert_eq!(handle.now_millis(), 0);
    }
}
