//! Geometric primitives: Size, Limits

use crate::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// True when neither extent is a usable divisor.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0) && !(self.height > 0.0)
    }
}

/// Bounding rectangle a draggable is clamped into.
///
/// Any member may be `NaN`, meaning "no constraint on that edge": a `NaN`
/// `left` leaves the minimum unbounded, and a `NaN` in `left + width` leaves
/// the maximum unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Limits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Limits {
    pub const UNBOUNDED: Limits = Limits {
        left: f32::NAN,
        top: f32::NAN,
        width: f32::NAN,
        height: f32::NAN,
    };

    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Limits that only constrain the horizontal axis.
    pub const fn horizontal(left: f32, width: f32) -> Self {
        Self {
            left,
            top: f32::NAN,
            width,
            height: f32::NAN,
        }
    }

    /// Limits that only constrain the vertical axis.
    pub const fn vertical(top: f32, height: f32) -> Self {
        Self {
            left: f32::NAN,
            top,
            width: f32::NAN,
            height,
        }
    }

    pub fn x_range(&self) -> (f32, f32) {
        edge_range(self.left, self.width)
    }

    pub fn y_range(&self) -> (f32, f32) {
        edge_range(self.top, self.height)
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        let (min, max) = self.x_range();
        clamp_unbounded(x, min, max)
    }

    pub fn clamp_y(&self, y: f32) -> f32 {
        let (min, max) = self.y_range();
        clamp_unbounded(y, min, max)
    }

    pub fn clamp(&self, position: Vector2) -> Vector2 {
        Vector2::new(self.clamp_x(position.x), self.clamp_y(position.y))
    }
}

fn nan_or(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value
    }
}

fn edge_range(start: f32, extent: f32) -> (f32, f32) {
    (
        nan_or(start, f32::NEG_INFINITY),
        nan_or(start + extent, f32::INFINITY),
    )
}

// `f32::clamp` panics on inverted ranges; a negative extent collapses to `min`.
fn clamp_unbounded(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_finite_range() {
        let limits = Limits::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(limits.clamp(Vector2::new(150.0, -10.0)), Vector2::new(100.0, 0.0));
        assert_eq!(limits.clamp(Vector2::new(40.0, 20.0)), Vector2::new(40.0, 20.0));
    }

    #[test]
    fn nan_edges_are_unbounded() {
        let limits = Limits::horizontal(0.0, 100.0);
        for y in [-1.0e9, -3.5, 0.0, 7.0, 1.0e9] {
            assert_eq!(limits.clamp_y(y), y);
        }
        assert_eq!(limits.clamp_x(-5.0), 0.0);
    }

    #[test]
    fn nan_left_leaves_both_sides_open() {
        let limits = Limits::new(f32::NAN, 0.0, 100.0, 10.0);
        assert_eq!(limits.clamp_x(-1.0e6), -1.0e6);
        assert_eq!(limits.clamp_x(1.0e6), 1.0e6);
    }

    #[test]
    fn nan_width_keeps_lower_bound() {
        let limits = Limits::new(10.0, f32::NAN, f32::NAN, f32::NAN);
        assert_eq!(limits.clamp_x(0.0), 10.0);
        assert_eq!(limits.clamp_x(5000.0), 5000.0);
    }

    #[test]
    fn inverted_range_does_not_panic() {
        let limits = Limits::horizontal(50.0, -20.0);
        assert_eq!(limits.clamp_x(0.0), 50.0);
    }

    #[test]
    fn empty_size() {
        assert!(Size::ZERO.is_empty());
        assert!(!Size::new(10.0, 0.0).is_empty());
        assert!(Size::new(f32::NAN, 0.0).is_empty());
    }
}
