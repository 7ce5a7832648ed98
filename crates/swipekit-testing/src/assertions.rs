//! Assertion utilities for drag tests
//!
//! Positions produced by throws and friction-scaled drags are rarely exact,
//! so most checks compare within a tolerance.

use swipekit_graphics::Vector2;
use swipekit_ui::GestureEventKind;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a vector is approximately equal to another, per component.
pub fn assert_vector_approx_eq(actual: Vector2, expected: Vector2, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that every component lies within `[-max, max]` and is finite.
pub fn assert_vector_bounded(actual: Vector2, max: f32, msg: &str) {
    assert!(
        actual.is_finite() && actual.x.abs() <= max && actual.y.abs() <= max,
        "{}: {:?} is not finite within ±{}",
        msg,
        actual,
        max
    );
}

/// Assert that a recorded event stream matches the expected kinds exactly.
pub fn assert_event_order(actual: &[GestureEventKind], expected: &[GestureEventKind], msg: &str) {
    assert_eq!(
        actual, expected,
        "{}: expected events {:?}, got {:?}",
        msg, expected, actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_accepts_values_within_tolerance() {
        assert_approx_eq(10.0, 10.4, 0.5, "close enough");
        assert_vector_approx_eq(Vector2::new(1.0, 2.0), Vector2::new(1.05, 1.95), 0.1, "vector");
        assert_vector_bounded(Vector2::new(-12.0, 3.0), 12.0, "bounded");
    }

    #[test]
    #[should_panic(expected = "too far")]
    fn approx_eq_rejects_distant_values() {
        assert_approx_eq(10.0, 12.0, 0.5, "too far");
    }
}
