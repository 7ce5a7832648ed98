//! Scripted pointer driver for draggable tests
//!
//! [`DragTestRule`] owns a runtime on a manual clock, so tests decide exactly
//! when time passes, when the velocity sampler fires and when display frames
//! run. Nothing sleeps.
//!
//! ```
//! use swipekit_testing::DragTestRule;
//! use swipekit_ui::{DraggableConfig, Vector2};
//!
//! let rule = DragTestRule::new(200.0, 200.0, DraggableConfig::default());
//! rule.press(0.0, 0.0);
//! rule.advance(16);
//! rule.move_to(40.0, 0.0);
//! rule.release();
//! assert_eq!(rule.position(), Vector2::new(40.0, 0.0));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipekit_core::{ManualTimeSource, Runtime};
use swipekit_graphics::Vector2;
use swipekit_ui::{Draggable, DraggableConfig, InputEvent, ResolvedPosition};

use crate::{EventRecorder, TestSurface};

/// Nominal 60Hz frame length.
pub const FRAME_NANOS: u64 = 16_666_667;

pub struct DragTestRule {
    runtime: Runtime,
    clock: Rc<ManualTimeSource>,
    surface: Rc<TestSurface>,
    draggable: Draggable,
    recorder: EventRecorder,
    applied: Rc<RefCell<Vec<ResolvedPosition>>>,
    pointer: Cell<Vector2>,
    frames: Cell<u64>,
}

impl DragTestRule {
    /// Creates a draggable on a `width` x `height` container at time 0.
    ///
    /// Panics if `config` is invalid; use [`Draggable::new`] directly to test
    /// configuration errors.
    pub fn new(width: f32, height: f32, config: DraggableConfig) -> Self {
        let (runtime, clock) = Runtime::manual(0);
        let surface = TestSurface::new(width, height);
        let draggable = Draggable::new(runtime.handle(), surface.clone(), config)
            .unwrap_or_else(|err| panic!("test draggable rejected its config: {err}"));
        let recorder = EventRecorder::attach(draggable.events());
        let applied = Rc::new(RefCell::new(Vec::new()));
        {
            let applied = Rc::clone(&applied);
            draggable.set_position_applier(move |position| applied.borrow_mut().push(*position));
        }
        Self {
            runtime,
            clock,
            surface,
            draggable,
            recorder,
            applied,
            pointer: Cell::new(Vector2::ZERO),
            frames: Cell::new(0),
        }
    }

    pub fn draggable(&self) -> &Draggable {
        &self.draggable
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn surface(&self) -> &TestSurface {
        &self.surface
    }

    pub fn events(&self) -> &EventRecorder {
        &self.recorder
    }

    pub fn now(&self) -> u64 {
        self.runtime.now_millis()
    }

    /// Every position handed to the applier, oldest first.
    pub fn applied_positions(&self) -> Vec<ResolvedPosition> {
        self.applied.borrow().clone()
    }

    pub fn position(&self) -> Vector2 {
        self.draggable
            .get_position(false)
            .unwrap_or_else(|err| panic!("position unavailable: {err}"))
    }

    /// Sends a primary-button press. Returns whether the engine took it.
    pub fn press(&self, x: f32, y: f32) -> bool {
        self.send(InputEvent::start(x, y))
    }

    pub fn move_to(&self, x: f32, y: f32) -> bool {
        self.send(InputEvent::moved(x, y))
    }

    /// Releases at the last pointer position.
    pub fn release(&self) -> bool {
        let at = self.pointer.get();
        self.send(InputEvent::end(at.x, at.y))
    }

    pub fn cancel(&self) -> bool {
        let at = self.pointer.get();
        self.send(InputEvent::cancel(at.x, at.y))
    }

    /// Sends an arbitrary event, remembering its position for [`Self::release`].
    pub fn send(&self, input: InputEvent) -> bool {
        self.pointer.set(input.position);
        self.draggable.handle_input(&input)
    }

    /// Advances the clock and fires any interval timers that came due.
    pub fn advance(&self, millis: u64) -> usize {
        self.clock.advance(millis);
        self.runtime.pump_timers()
    }

    /// Moves from the current pointer position to `(x, y)` in `steps` equal
    /// moves, advancing `step_millis` before each.
    pub fn drag_to(&self, x: f32, y: f32, steps: u32, step_millis: u64) {
        let from = self.pointer.get();
        let to = Vector2::new(x, y);
        let steps = steps.max(1);
        for step in 1..=steps {
            self.advance(step_millis);
            let t = step as f32 / steps as f32;
            let at = from + (to - from) * t;
            self.move_to(at.x, at.y);
        }
    }

    /// Runs one display frame. Returns false if nothing was scheduled.
    pub fn run_frame(&self) -> bool {
        if !self.runtime.has_frame_callbacks() {
            return false;
        }
        let frame = self.frames.get() + 1;
        self.frames.set(frame);
        self.runtime.drain_frame_callbacks(frame * FRAME_NANOS);
        true
    }

    /// Runs frames until none are scheduled or `max` have run.
    pub fn run_frames(&self, max: usize) -> usize {
        let mut ran = 0;
        while ran < max && self.run_frame() {
            ran += 1;
        }
        ran
    }
}
