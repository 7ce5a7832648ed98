//! Throw animation driver.
//!
//! Drives [`ThrowDecaySpec`] through the runtime's frame callback system.
//! Each frame schedules exactly one follow-up frame; the pending
//! registration is the single cancellation handle for the whole chain.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipekit_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use swipekit_graphics::Vector2;

use crate::ThrowDecaySpec;

/// Minimum unapplied delta (in pixels) to consider a boundary hit.
pub const BOUNDARY_EPSILON: f32 = 0.5;

type StepFn = Rc<dyn Fn(Vector2) -> Vector2>;
type SettleFn = Box<dyn FnOnce(Vector2)>;

struct ThrowState {
    generation: u64,
    velocity: Vector2,
    spec: ThrowDecaySpec,
    frames: u32,
    on_step: StepFn,
    on_settle: Option<SettleFn>,
    /// Pending frame callback; dropping it cancels the chain.
    registration: Option<FrameCallbackRegistration>,
}

enum FrameAction {
    Advance(Vector2, StepFn),
    Settle(Vector2, Option<SettleFn>),
}

fn schedule_next_frame(
    state: Rc<RefCell<Option<ThrowState>>>,
    frame_clock: FrameClock,
    generation: u64,
) {
    let state_for_closure = Rc::clone(&state);
    let clock_for_closure = frame_clock.clone();

    let registration = frame_clock.with_frame_nanos(move |_frame_time_nanos| {
        let action = {
            let mut guard = state_for_closure.borrow_mut();
            let Some(throw) = guard.as_mut() else {
                return;
            };
            if throw.generation != generation {
                return;
            }
            if throw.spec.is_finished(throw.velocity) {
                let velocity = throw.velocity;
                let on_settle = throw.on_settle.take();
                *guard = None;
                FrameAction::Settle(velocity, on_settle)
            } else {
                FrameAction::Advance(throw.velocity, Rc::clone(&throw.on_step))
            }
        };

        match action {
            FrameAction::Settle(velocity, on_settle) => {
                log::debug!("throw settled with residual velocity {velocity:?}");
                if let Some(on_settle) = on_settle {
                    on_settle(velocity);
                }
            }
            FrameAction::Advance(velocity, on_step) => {
                let applied = on_step(velocity);
                {
                    let mut guard = state_for_closure.borrow_mut();
                    // `on_step` may have cancelled or replaced this throw.
                    let Some(throw) = guard.as_mut() else {
                        return;
                    };
                    if throw.generation != generation {
                        return;
                    }
                    let mut next = throw.spec.decay(velocity);
                    if (velocity.x - applied.x).abs() > BOUNDARY_EPSILON {
                        next.x = 0.0;
                    }
                    if (velocity.y - applied.y).abs() > BOUNDARY_EPSILON {
                        next.y = 0.0;
                    }
                    throw.velocity = next;
                    throw.frames += 1;
                    log::trace!(
                        "throw frame {}: moved {applied:?}, next velocity {next:?}",
                        throw.frames
                    );
                }
                schedule_next_frame(
                    Rc::clone(&state_for_closure),
                    clock_for_closure.clone(),
                    generation,
                );
            }
        }
    });

    if let Some(throw) = state.borrow_mut().as_mut() {
        if throw.generation == generation {
            throw.registration = Some(registration);
        }
    }
}

/// Drives a decaying throw on a positioned element.
///
/// Each frame it hands the current velocity (px/frame) to `on_step`, which
/// applies it and returns how much was actually applied. An axis where less
/// was applied than requested hit a limit, and its velocity drops to zero.
/// Once velocity falls to the stop threshold `on_settle` runs with the
/// residual velocity.
#[derive(Clone)]
pub struct ThrowAnimation {
    state: Rc<RefCell<Option<ThrowState>>>,
    generation: Rc<Cell<u64>>,
    frame_clock: FrameClock,
}

impl ThrowAnimation {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            frame_clock: runtime.frame_clock(),
        }
    }

    pub fn start<F, G>(&self, velocity: Vector2, spec: ThrowDecaySpec, on_step: F, on_settle: G)
    where
        F: Fn(Vector2) -> Vector2 + 'static,
        G: FnOnce(Vector2) + 'static,
    {
        self.cancel();

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        log::debug!(
            "throw started at {velocity:?} px/frame, ~{} frames",
            spec.steps_to_stop(velocity.length())
        );

        *self.state.borrow_mut() = Some(ThrowState {
            generation,
            velocity,
            spec,
            frames: 0,
            on_step: Rc::new(on_step),
            on_settle: Some(Box::new(on_settle)),
            registration: None,
        });

        schedule_next_frame(Rc::clone(&self.state), self.frame_clock.clone(), generation);
    }

    /// Stops the throw without running `on_settle`. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        let taken = self.state.borrow_mut().take();
        match taken {
            Some(throw) => {
                log::debug!("throw cancelled after {} frames", throw.frames);
                drop(throw);
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn velocity(&self) -> Option<Vector2> {
        self.state.borrow().as_ref().map(|throw| throw.velocity)
    }

    pub fn frames(&self) -> u32 {
        self.state.borrow().as_ref().map_or(0, |throw| throw.frames)
    }
}
