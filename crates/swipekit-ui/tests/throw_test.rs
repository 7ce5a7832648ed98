//! Momentum throws driven frame by frame.

use std::cell::Cell;
use std::rc::Rc;

use swipekit_animation::ThrowDecaySpec;
use swipekit_testing::assertions::{assert_approx_eq, assert_event_order};
use swipekit_testing::DragTestRule;
use swipekit_ui::*;

/// Presses at the origin and releases after a 50px move in 10ms (5 px/ms).
fn flick(rule: &DragTestRule) {
    rule.press(0.0, 0.0);
    rule.advance(10);
    rule.move_to(50.0, 0.0);
    rule.release();
}

/// Distance and frame count for a throw starting at `v0` px/frame.
fn simulate(spec: ThrowDecaySpec, v0: f32) -> (f32, usize) {
    let mut velocity = Vector2::new(v0, 0.0);
    let mut travelled = 0.0;
    let mut frames = 0;
    while !spec.is_finished(velocity) {
        travelled += velocity.x;
        velocity = spec.decay(velocity);
        frames += 1;
    }
    (travelled, frames)
}

#[test]
fn non_throwable_release_never_settles() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X));
    flick(&rule);

    let end = rule.events().last(GestureEventKind::End).expect("end event");
    assert!(end.velocity.x > 0.6);
    assert!(!rule.draggable().is_throwing());
    assert!(!rule.runtime().has_frame_callbacks());
    assert_eq!(rule.run_frames(1_000), 0);
    assert_eq!(rule.events().count(GestureEventKind::Settle), 0);
}

#[test]
fn throw_decays_then_settles_on_integer_pixel() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    flick(&rule);
    assert!(rule.draggable().is_throwing());

    let frames = rule.run_frames(10_000);
    let spec = ThrowDecaySpec::default();
    let (travelled, steps) = simulate(spec, 5.0 * 16.0);
    assert_eq!(frames, steps + 1);
    assert!(spec.steps_to_stop(80.0).abs_diff(steps as u32) <= 1);

    let settle = rule.events().last(GestureEventKind::Settle).expect("settle event");
    assert_approx_eq(settle.position.pixel.x, 50.0 + travelled, 1.0, "settled x");
    assert_eq!(settle.position.pixel.x, settle.position.pixel.x.round());
    assert_eq!(settle.position.pixel.y, 0.0);
    assert!(settle.current_velocity.length() <= 0.08);
    assert_eq!(settle.velocity, Vector2::new(5.0, 0.0));
    assert_eq!(rule.position(), settle.position.pixel);
    assert!(!rule.draggable().is_throwing());

    use GestureEventKind::*;
    assert_event_order(&rule.events().kinds(), &[Start, Move, End, Settle], "throw");
}

#[test]
fn throw_positions_are_applied_each_frame() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    flick(&rule);
    let before = rule.applied_positions().len();
    rule.run_frame();
    rule.run_frame();
    let applied = rule.applied_positions();
    assert_eq!(applied.len(), before + 2);
    assert_approx_eq(applied[before].pixel.x, 130.0, 1e-3, "first frame");
    assert_approx_eq(applied[before + 1].pixel.x, 130.0 + 80.0 * 0.94, 1e-3, "second frame");
}

#[test]
fn throw_stops_at_limit() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    rule.draggable()
        .set_limits(Limits::horizontal(0.0, 300.0))
        .expect("live draggable");
    flick(&rule);

    let frames = rule.run_frames(10_000);
    assert!(frames < ThrowDecaySpec::default().steps_to_stop(80.0) as usize);
    let settle = rule.events().last(GestureEventKind::Settle).expect("settle event");
    assert_eq!(settle.position.pixel, Vector2::new(300.0, 0.0));
    assert_eq!(settle.current_velocity, Vector2::ZERO);
}

#[test]
fn prevented_start_leaves_throw_running() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    let block_next_start = Rc::new(Cell::new(false));
    let block = Rc::clone(&block_next_start);
    rule.draggable().on(GestureEventKind::Start, move |event| {
        if block.get() {
            event.prevent_default();
        }
    });
    flick(&rule);
    rule.run_frame();
    rule.run_frame();

    block_next_start.set(true);
    assert!(!rule.press(200.0, 0.0));
    assert!(rule.draggable().is_throwing());
    assert!(!rule.draggable().is_dragging());

    rule.run_frames(10_000);
    let settle = rule.events().last(GestureEventKind::Settle).expect("settle event");
    assert_eq!(settle.position.pixel.x, settle.position.pixel.x.round());
    assert_eq!(rule.position(), settle.position.pixel);

    use GestureEventKind::*;
    assert_event_order(
        &rule.events().kinds(),
        &[Start, Move, End, Start, Settle],
        "prevented start during throw",
    );
}

#[test]
fn new_gesture_cancels_throw() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    flick(&rule);
    rule.run_frame();
    rule.run_frame();
    let interrupted_at = rule.position();

    assert!(rule.press(200.0, 0.0));
    assert!(!rule.draggable().is_throwing());
    assert!(!rule.runtime().has_frame_callbacks());
    assert_eq!(rule.run_frames(1_000), 0);
    assert_eq!(rule.position(), interrupted_at);

    rule.advance(10);
    rule.move_to(210.0, 0.0);
    assert_eq!(rule.position(), interrupted_at + Vector2::new(10.0, 0.0));

    use GestureEventKind::*;
    assert_event_order(
        &rule.events().kinds(),
        &[Start, Move, End, Start, Move],
        "interrupted throw",
    );
}

#[test]
fn slow_release_does_not_throw() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    rule.press(0.0, 0.0);
    rule.advance(100);
    rule.move_to(50.0, 0.0);
    rule.release();
    assert!(!rule.draggable().is_throwing());
}

#[test]
fn off_axis_release_does_not_throw() {
    let rule = DragTestRule::new(1000.0, 1000.0, DraggableConfig::new(Axis::X).throwable(true));
    rule.press(0.0, 0.0);
    rule.advance(10);
    rule.move_to(2.0, 80.0);
    rule.release();
    assert!(!rule.draggable().is_throwing());
}

#[test]
fn stop_throw_skips_settle() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    flick(&rule);
    rule.run_frame();
    assert!(rule.draggable().stop_throw());
    assert!(!rule.draggable().stop_throw());
    assert_eq!(rule.run_frames(1_000), 0);
    assert_eq!(rule.events().count(GestureEventKind::Settle), 0);
}

#[test]
fn set_position_interrupts_throw() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    flick(&rule);
    rule.run_frame();
    rule.draggable().set_position(10.0, 0.0).expect("measured");
    assert!(!rule.draggable().is_throwing());
    assert_eq!(rule.run_frames(1_000), 0);
    assert_eq!(rule.position(), Vector2::new(100.0, 0.0));
}

#[test]
fn dispose_cancels_throw() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    flick(&rule);
    rule.run_frame();
    rule.draggable().dispose();
    assert!(!rule.draggable().is_throwing());
    assert!(!rule.runtime().has_frame_callbacks());
    assert_eq!(rule.events().count(GestureEventKind::Settle), 0);
}

#[test]
fn settle_handler_can_start_the_next_gesture() {
    let rule = DragTestRule::new(1000.0, 100.0, DraggableConfig::new(Axis::X).throwable(true));
    let draggable = rule.draggable().clone();
    rule.draggable().on(GestureEventKind::Settle, move |_| {
        draggable.handle_input(&InputEvent::start(0.0, 0.0));
    });
    flick(&rule);
    rule.run_frames(10_000);
    assert!(rule.draggable().is_dragging());
    assert_eq!(rule.events().count(GestureEventKind::Start), 2);
}
