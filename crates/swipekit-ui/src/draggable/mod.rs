//! The draggable gesture engine.
//!
//! A [`Draggable`] turns normalized [`InputEvent`]s into a gesture session,
//! publishes `start`/`move`/`end`/`settle` events, moves one element within
//! its [`Limits`] and optionally throws it on release.
//!
//! All state lives behind one `RefCell`. It is never borrowed while events
//! are published or the position applier runs, so handlers may call back
//! into the draggable freely.

mod config;
mod positioner;
mod target;

pub use config::DraggableConfig;
pub use positioner::Positioner;
pub use target::DragTarget;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use swipekit_animation::ThrowAnimation;
use swipekit_core::{IntervalRegistration, RuntimeHandle};
use swipekit_foundation::{
    AxisGuard, GestureEvent, GestureEventBus, GestureEventKind, GestureEventSource,
    GestureSession, InputEvent, InputKind, PointerId, ResolvedPosition, SubscriptionId,
    VelocityTracker,
};
use swipekit_graphics::{Limits, Vector2};

use crate::{ConfigurationError, StateError};

type PositionApplier = Rc<dyn Fn(&ResolvedPosition)>;

struct DraggableState {
    config: DraggableConfig,
    positioner: Positioner,
    /// Open while a pointer is down.
    session: Option<GestureSession>,
    /// The released session a throw keeps advancing.
    throw_session: Option<GestureSession>,
    tracker: VelocityTracker,
    guard: AxisGuard,
    pointer_id: Option<PointerId>,
    sampler: Option<IntervalRegistration>,
    disposed: bool,
}

impl DraggableState {
    fn event(&self, kind: GestureEventKind, target: u64, session: &GestureSession) -> GestureEvent {
        let velocity = self.tracker.velocity();
        GestureEvent::from_session(
            kind,
            target,
            self.config.axis,
            session,
            velocity,
            velocity,
            self.positioner.resolved(),
        )
    }

    fn accepts_pointer(&self, pointer_id: Option<PointerId>) -> bool {
        match (self.pointer_id, pointer_id) {
            (Some(owner), Some(id)) => owner == id,
            _ => true,
        }
    }

    /// Axis-projected throw velocity in px/frame, if this release throws.
    fn throw_velocity(&self, cancelled: bool) -> Option<Vector2> {
        let config = &self.config;
        if !config.is_throwable || cancelled || self.guard.is_deactivated() {
            return None;
        }
        let release = config.axis.project(self.tracker.velocity());
        (release.length() > config.swipe_velocity).then(|| release.scale(config.amplifier))
    }
}

struct DraggableInner {
    target: Rc<dyn DragTarget>,
    runtime: RuntimeHandle,
    bus: GestureEventBus,
    state: RefCell<DraggableState>,
    throw: ThrowAnimation,
    applier: RefCell<Option<PositionApplier>>,
}

impl DraggableInner {
    fn target_id(&self) -> u64 {
        self.target.id()
    }

    fn warn_disposed(&self, input: &InputEvent) {
        log::warn!(
            "draggable {}: dropping {:?} input after dispose",
            self.target_id(),
            input.kind
        );
    }

    fn apply_position(&self, position: &ResolvedPosition) {
        let applier = self.applier.borrow().clone();
        if let Some(applier) = applier {
            applier(position);
        }
    }

    fn sample_velocity(&self, now: u64) {
        let mut guard = self.state.borrow_mut();
        let DraggableState {
            session, tracker, ..
        } = &mut *guard;
        if let Some(session) = session.as_mut() {
            tracker.sample(session, now);
        }
    }

    fn throw_step(&self, velocity: Vector2) -> Vector2 {
        let (applied, position) = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let Some(session) = state.throw_session.as_mut() else {
                return Vector2::ZERO;
            };
            let before = state.positioner.pixel();
            session.advance(velocity);
            let after = state.positioner.drag_to(session.cumulative_delta());
            (after - before, state.positioner.resolved())
        };
        if applied != Vector2::ZERO {
            self.apply_position(&position);
        }
        applied
    }

    fn settle(&self, residual: Vector2) {
        let (event, position) = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let Some(session) = state.throw_session.take() else {
                return;
            };
            let rounded = state.positioner.pixel().round();
            state.positioner.set_pixel(rounded);
            let velocity = state.tracker.velocity();
            let position = state.positioner.resolved();
            let event = GestureEvent::from_session(
                GestureEventKind::Settle,
                self.target_id(),
                state.config.axis,
                &session,
                velocity,
                residual,
                position,
            );
            (event, position)
        };
        log::debug!("draggable {} settled at {:?}", self.target_id(), position.pixel);
        self.apply_position(&position);
        self.bus.publish(&event);
    }
}

/// One draggable element driven by host input.
///
/// Cloning yields another handle to the same engine.
#[derive(Clone)]
pub struct Draggable {
    inner: Rc<DraggableInner>,
}

impl Draggable {
    /// Builds an engine for `target`. The container is measured immediately.
    pub fn new(
        runtime: RuntimeHandle,
        target: Rc<dyn DragTarget>,
        config: DraggableConfig,
    ) -> Result<Self, ConfigurationError> {
        if !target.is_drawable() {
            return Err(ConfigurationError::InvalidTarget);
        }
        config.validate()?;

        let mut positioner = Positioner::new(config.axis, Limits::UNBOUNDED);
        positioner.measure(target.container_size());
        let tracker = VelocityTracker::new(config.max_velocity);
        let guard =
            AxisGuard::with_thresholds(config.axis, config.lock_threshold, config.drag_threshold);
        log::debug!("draggable {} created on {:?}", target.id(), config.axis);

        Ok(Self {
            inner: Rc::new(DraggableInner {
                throw: ThrowAnimation::new(runtime.clone()),
                target,
                runtime,
                bus: GestureEventBus::new(),
                state: RefCell::new(DraggableState {
                    config,
                    positioner,
                    session: None,
                    throw_session: None,
                    tracker,
                    guard,
                    pointer_id: None,
                    sampler: None,
                    disposed: false,
                }),
                applier: RefCell::new(None),
            }),
        })
    }

    /// Feeds one normalized input event. Returns whether the engine used it.
    pub fn handle_input(&self, input: &InputEvent) -> bool {
        match input.kind {
            InputKind::Start => self.on_start(input),
            InputKind::Move => self.on_move(input),
            InputKind::End => self.on_release(input, false),
            InputKind::Cancel => self.on_release(input, true),
        }
    }

    fn on_start(&self, input: &InputEvent) -> bool {
        if !input.is_primary_button {
            return false;
        }
        {
            let state = self.inner.state.borrow();
            if state.disposed {
                self.inner.warn_disposed(input);
                return false;
            }
            if state.session.is_some() {
                return false;
            }
        }
        let now = self.inner.runtime.now_millis();
        let event = {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            let session = GestureSession::start(input.position, now, state.config.friction);
            state.guard.begin();
            state.pointer_id = input.pointer_id;
            // Velocity reads zero until the tracker is reset below.
            let event = GestureEvent::from_session(
                GestureEventKind::Start,
                self.inner.target_id(),
                state.config.axis,
                &session,
                Vector2::ZERO,
                Vector2::ZERO,
                state.positioner.resolved(),
            );
            state.session = Some(session);
            event
        };

        // A prevented start leaves any running throw untouched.
        if self.inner.bus.publish(&event) {
            log::debug!("draggable {}: start prevented", self.inner.target_id());
            let mut state = self.inner.state.borrow_mut();
            state.session = None;
            state.pointer_id = None;
            state.guard.end();
            return false;
        }

        {
            let state = self.inner.state.borrow();
            // A start handler may have disposed the engine.
            if state.disposed || state.session.is_none() {
                return false;
            }
        }
        if self.inner.throw.cancel() {
            log::debug!("draggable {}: throw interrupted by new gesture", self.inner.target_id());
        }
        let period = {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            state.throw_session = None;
            state.tracker.begin(now);
            state.positioner.begin_drag();
            state.config.sample_interval_ms
        };
        let weak: Weak<DraggableInner> = Rc::downgrade(&self.inner);
        let sampler = self.inner.runtime.set_interval(period, move |now| {
            if let Some(inner) = weak.upgrade() {
                inner.sample_velocity(now);
            }
        });
        self.inner.state.borrow_mut().sampler = Some(sampler);
        log::debug!(
            "draggable {}: gesture started at {:?}",
            self.inner.target_id(),
            input.position
        );
        true
    }

    fn on_move(&self, input: &InputEvent) -> bool {
        let now = self.inner.runtime.now_millis();
        let (event, moved, suppress_host) = {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            if state.disposed {
                self.inner.warn_disposed(input);
                return false;
            }
            if !state.accepts_pointer(input.pointer_id) {
                return false;
            }
            let Some(session) = state.session.as_mut() else {
                return false;
            };
            session.update(input.position, now);
            let cumulative = session.cumulative_delta();
            state.guard.observe(cumulative);

            let moved = if state.guard.is_deactivated() {
                None
            } else {
                let before = state.positioner.pixel();
                let after = state.positioner.drag_to(cumulative);
                (after != before).then(|| state.positioner.resolved())
            };
            let suppress_host = state.guard.is_locked() && state.config.prevent_host_default;
            let Some(session) = state.session.as_ref() else {
                return false;
            };
            let event = state.event(GestureEventKind::Move, self.inner.target_id(), session);
            (event, moved, suppress_host)
        };

        if let Some(position) = moved {
            self.inner.apply_position(&position);
        }
        let prevented = self.inner.bus.publish(&event);
        if suppress_host && !prevented {
            input.prevent_host_default();
        }
        log::trace!(
            "draggable {}: move delta {:?} at {:?}",
            self.inner.target_id(),
            event.delta,
            event.position.pixel
        );
        true
    }

    fn on_release(&self, input: &InputEvent, cancelled: bool) -> bool {
        let now = self.inner.runtime.now_millis();
        let (event, throw_velocity) = {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            if state.disposed {
                self.inner.warn_disposed(input);
                return false;
            }
            if !state.accepts_pointer(input.pointer_id) {
                return false;
            }
            let Some(mut session) = state.session.take() else {
                return false;
            };
            state.sampler = None;
            session.end(now);
            state.tracker.finish(&mut session, now);

            let event = state
                .event(GestureEventKind::End, self.inner.target_id(), &session)
                .cancelled(cancelled);
            let throw_velocity = state.throw_velocity(cancelled);
            state.guard.end();
            state.pointer_id = None;
            if throw_velocity.is_some() {
                state.positioner.rebase(session.cumulative_delta());
                state.throw_session = Some(session);
            }
            (event, throw_velocity)
        };

        log::debug!(
            "draggable {}: gesture {} with velocity {:?}",
            self.inner.target_id(),
            if cancelled { "cancelled" } else { "ended" },
            event.velocity
        );
        self.inner.bus.publish(&event);

        if let Some(velocity) = throw_velocity {
            let still_pending = {
                let state = self.inner.state.borrow();
                !state.disposed && state.session.is_none() && state.throw_session.is_some()
            };
            if still_pending {
                self.start_throw(velocity);
            }
        }
        true
    }

    fn start_throw(&self, velocity: Vector2) {
        let spec = self.inner.state.borrow().config.throw_spec();
        let step_target = Rc::downgrade(&self.inner);
        let settle_target = Weak::clone(&step_target);
        log::debug!(
            "draggable {}: throwing at {:?} px/frame for ~{} frames",
            self.inner.target_id(),
            velocity,
            spec.steps_to_stop(velocity.length())
        );
        self.inner.throw.start(
            velocity,
            spec,
            move |step| {
                step_target
                    .upgrade()
                    .map_or(Vector2::ZERO, |inner| inner.throw_step(step))
            },
            move |residual| {
                if let Some(inner) = settle_target.upgrade() {
                    inner.settle(residual);
                }
            },
        );
    }

    /// Current position in pixels, or in percent of the container.
    pub fn get_position(&self, as_percent: bool) -> Result<Vector2, StateError> {
        self.ensure_alive()?;
        if !as_percent {
            return Ok(self.inner.state.borrow().positioner.pixel());
        }
        self.ensure_measured()?;
        Ok(self.inner.state.borrow().positioner.percent())
    }

    /// Moves the element to a percentage of its container.
    ///
    /// Re-measures first when the container has no extent yet; fails with
    /// [`StateError::NotMeasured`] if it still has none. Any running throw
    /// is stopped.
    pub fn set_position(&self, x_percent: f32, y_percent: f32) -> Result<(), StateError> {
        self.ensure_alive()?;
        self.ensure_measured()?;
        self.stop_throw();
        let position = {
            let mut guard = self.inner.state.borrow_mut();
            let state = &mut *guard;
            let pixel = state
                .positioner
                .to_pixels(Vector2::new(x_percent, y_percent))?;
            state.positioner.set_pixel(pixel);
            if let Some(session) = state.session.as_ref() {
                state.positioner.rebase(session.cumulative_delta());
            }
            state.positioner.resolved()
        };
        self.inner.apply_position(&position);
        Ok(())
    }

    pub fn set_limits(&self, limits: Limits) -> Result<(), StateError> {
        self.ensure_alive()?;
        let moved = {
            let mut state = self.inner.state.borrow_mut();
            state
                .positioner
                .set_limits(limits)
                .then(|| state.positioner.resolved())
        };
        if let Some(position) = moved {
            self.inner.apply_position(&position);
        }
        Ok(())
    }

    /// Re-measures the container and re-applies the current position.
    pub fn update(&self) -> Result<(), StateError> {
        self.ensure_alive()?;
        let size = self.inner.target.container_size();
        let position = {
            let mut state = self.inner.state.borrow_mut();
            state.positioner.measure(size);
            let pixel = state.positioner.pixel();
            state.positioner.set_pixel(pixel);
            state.positioner.resolved()
        };
        self.inner.apply_position(&position);
        Ok(())
    }

    /// Registers the host callback that renders every position change.
    pub fn set_position_applier<F>(&self, applier: F)
    where
        F: Fn(&ResolvedPosition) + 'static,
    {
        *self.inner.applier.borrow_mut() = Some(Rc::new(applier));
    }

    /// Stops a running throw without emitting `settle`.
    pub fn stop_throw(&self) -> bool {
        let stopped = self.inner.throw.cancel();
        self.inner.state.borrow_mut().throw_session = None;
        stopped
    }

    /// Detaches everything: the open session, the velocity sampler, any
    /// throw, all subscribers and the position applier. Idempotent.
    pub fn dispose(&self) {
        let sampler = {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.session = None;
            state.throw_session = None;
            state.pointer_id = None;
            state.guard.end();
            state.sampler.take()
        };
        drop(sampler);
        self.inner.throw.cancel();
        self.inner.bus.clear();
        self.inner.applier.borrow_mut().take();
        log::debug!("draggable {} disposed", self.inner.target_id());
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.borrow().disposed
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.state.borrow().session.is_some()
    }

    pub fn is_throwing(&self) -> bool {
        self.inner.throw.is_running()
    }

    pub fn is_locked(&self) -> bool {
        self.inner.state.borrow().guard.is_locked()
    }

    pub fn is_deactivated(&self) -> bool {
        self.inner.state.borrow().guard.is_deactivated()
    }

    /// Last sampled release or drag velocity in px/ms.
    pub fn velocity(&self) -> Vector2 {
        self.inner.state.borrow().tracker.velocity()
    }

    pub fn config(&self) -> DraggableConfig {
        self.inner.state.borrow().config.clone()
    }

    pub fn events(&self) -> &dyn GestureEventSource {
        &self.inner.bus
    }

    fn ensure_alive(&self) -> Result<(), StateError> {
        if self.inner.state.borrow().disposed {
            Err(StateError::Disposed)
        } else {
            Ok(())
        }
    }

    fn ensure_measured(&self) -> Result<(), StateError> {
        let needs_measure = !self.inner.state.borrow().positioner.has_extent();
        if needs_measure {
            let size = self.inner.target.container_size();
            let mut state = self.inner.state.borrow_mut();
            state.positioner.measure(size);
            if !state.positioner.has_extent() {
                log::warn!(
                    "draggable {}: container {size:?} has no extent along {:?}",
                    self.inner.target_id(),
                    state.config.axis
                );
                return Err(StateError::NotMeasured);
            }
        }
        Ok(())
    }
}

impl GestureEventSource for Draggable {
    fn subscribe(
        &self,
        kind: GestureEventKind,
        handler: Box<dyn Fn(&GestureEvent) + 'static>,
    ) -> SubscriptionId {
        self.inner.bus.subscribe(kind, handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.bus.unsubscribe(id)
    }
}

impl std::fmt::Debug for Draggable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Draggable")
            .field("target", &self.inner.target_id())
            .field("axis", &state.config.axis)
            .field("position", &state.positioner.pixel())
            .field("dragging", &state.session.is_some())
            .field("throwing", &self.inner.throw.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use swipekit_core::Runtime;
    use swipekit_foundation::Axis;
    use swipekit_graphics::Size;

    struct Surface {
        size: Cell<Size>,
        drawable: bool,
    }

    impl DragTarget for Surface {
        fn id(&self) -> u64 {
            7
        }

        fn is_drawable(&self) -> bool {
            self.drawable
        }

        fn container_size(&self) -> Size {
            self.size.get()
        }
    }

    fn surface(width: f32, height: f32) -> Rc<Surface> {
        Rc::new(Surface {
            size: Cell::new(Size::new(width, height)),
            drawable: true,
        })
    }

    fn record(draggable: &Draggable, kind: GestureEventKind) -> Rc<RefCell<Vec<GestureEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        draggable.on(kind, move |event| sink.borrow_mut().push(event.clone()));
        seen
    }

    #[test]
    fn rejects_non_drawable_target() {
        let (runtime, _clock) = Runtime::manual(0);
        let target = Rc::new(Surface {
            size: Cell::new(Size::new(10.0, 10.0)),
            drawable: false,
        });
        let result = Draggable::new(runtime.handle(), target, DraggableConfig::default());
        assert!(matches!(result, Err(ConfigurationError::InvalidTarget)));
    }

    #[test]
    fn drag_moves_and_reports_position() {
        let (runtime, clock) = Runtime::manual(0);
        let draggable =
            Draggable::new(runtime.handle(), surface(200.0, 100.0), DraggableConfig::default())
                .expect("valid");
        let applied = Rc::new(Cell::new(Vector2::ZERO));
        {
            let applied = Rc::clone(&applied);
            draggable.set_position_applier(move |position| applied.set(position.pixel));
        }
        let moves = record(&draggable, GestureEventKind::Move);

        assert!(draggable.handle_input(&InputEvent::start(10.0, 10.0)));
        clock.advance(16);
        assert!(draggable.handle_input(&InputEvent::moved(30.0, 20.0)));

        assert_eq!(applied.get(), Vector2::new(20.0, 10.0));
        assert_eq!(draggable.get_position(false), Ok(Vector2::new(20.0, 10.0)));
        assert_eq!(draggable.get_position(true), Ok(Vector2::new(10.0, 10.0)));
        let moves = moves.borrow();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].position.pixel, Vector2::new(20.0, 10.0));
        assert_eq!(moves[0].delta_time, 16);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let (runtime, _clock) = Runtime::manual(0);
        let draggable =
            Draggable::new(runtime.handle(), surface(100.0, 100.0), DraggableConfig::default())
                .expect("valid");
        assert!(draggable.handle_input(&InputEvent::start(0.0, 0.0).with_pointer_id(1)));
        assert!(!draggable.handle_input(&InputEvent::start(5.0, 5.0).with_pointer_id(2)));
        assert!(!draggable.handle_input(&InputEvent::moved(50.0, 0.0).with_pointer_id(2)));
        assert!(!draggable.handle_input(&InputEvent::end(50.0, 0.0).with_pointer_id(2)));
        assert!(draggable.is_dragging());
        assert!(draggable.handle_input(&InputEvent::end(0.0, 0.0).with_pointer_id(1)));
        assert!(!draggable.is_dragging());
    }

    #[test]
    fn secondary_button_does_not_start() {
        let (runtime, _clock) = Runtime::manual(0);
        let draggable =
            Draggable::new(runtime.handle(), surface(100.0, 100.0), DraggableConfig::default())
                .expect("valid");
        let starts = record(&draggable, GestureEventKind::Start);
        assert!(!draggable.handle_input(&InputEvent::start(0.0, 0.0).with_primary_button(false)));
        assert!(starts.borrow().is_empty());
        assert!(!draggable.is_dragging());
    }

    #[test]
    fn deactivated_session_stops_moving_element() {
        let (runtime, clock) = Runtime::manual(0);
        let draggable = Draggable::new(
            runtime.handle(),
            surface(100.0, 100.0),
            DraggableConfig::new(Axis::X),
        )
        .expect("valid");
        draggable.handle_input(&InputEvent::start(0.0, 0.0));
        clock.advance(10);
        draggable.handle_input(&InputEvent::moved(1.0, 10.0));
        assert!(draggable.is_deactivated());
        let before = draggable.get_position(false);
        clock.advance(10);
        draggable.handle_input(&InputEvent::moved(40.0, 10.0));
        assert_eq!(draggable.get_position(false), before);
        assert!(!draggable.is_locked());
    }

    #[test]
    fn set_position_during_drag_rebases() {
        let (runtime, clock) = Runtime::manual(0);
        let draggable =
            Draggable::new(runtime.handle(), surface(200.0, 200.0), DraggableConfig::default())
                .expect("valid");
        draggable.handle_input(&InputEvent::start(0.0, 0.0));
        clock.advance(10);
        draggable.handle_input(&InputEvent::moved(10.0, 0.0));
        draggable.set_position(50.0, 50.0).expect("measured");
        clock.advance(10);
        draggable.handle_input(&InputEvent::moved(15.0, 0.0));
        assert_eq!(draggable.get_position(false), Ok(Vector2::new(105.0, 100.0)));
    }

    #[test]
    fn operations_after_dispose_fail() {
        let (runtime, _clock) = Runtime::manual(0);
        let draggable =
            Draggable::new(runtime.handle(), surface(100.0, 100.0), DraggableConfig::default())
                .expect("valid");
        draggable.handle_input(&InputEvent::start(0.0, 0.0));
        assert!(runtime.has_timers());
        draggable.dispose();
        draggable.dispose();
        assert!(!runtime.has_timers());
        assert!(!draggable.is_dragging());
        assert_eq!(draggable.set_position(10.0, 10.0), Err(StateError::Disposed));
        assert_eq!(draggable.get_position(false), Err(StateError::Disposed));
        assert!(!draggable.handle_input(&InputEvent::start(0.0, 0.0)));
    }
}
