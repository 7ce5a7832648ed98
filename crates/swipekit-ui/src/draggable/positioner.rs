//! Pixel/percent bookkeeping for one draggable element.

use swipekit_foundation::{Axis, ResolvedPosition};
use swipekit_graphics::{Limits, Size, Vector2};

use crate::StateError;

/// Tracks where the element sits inside its container.
///
/// Every stored pixel position has passed through [`Limits::clamp`] and
/// [`Axis::project`], so an X-only positioner always reports `y == 0`.
#[derive(Clone, Debug)]
pub struct Positioner {
    axis: Axis,
    limits: Limits,
    container: Size,
    measured: bool,
    pixel: Vector2,
    origin: Vector2,
}

impl Positioner {
    pub fn new(axis: Axis, limits: Limits) -> Self {
        Self {
            axis,
            limits,
            container: Size::ZERO,
            measured: false,
            pixel: Vector2::ZERO,
            origin: Vector2::ZERO,
        }
    }

    pub fn measure(&mut self, container: Size) {
        self.container = container;
        self.measured = true;
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Whether the container has a usable extent along every moving axis.
    pub fn has_extent(&self) -> bool {
        let Size { width, height } = self.container;
        match self.axis {
            Axis::X => width > 0.0,
            Axis::Y => height > 0.0,
            Axis::Both => width > 0.0 && height > 0.0,
        }
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn pixel(&self) -> Vector2 {
        self.pixel
    }

    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    /// Captures the current position as the origin of a new drag.
    pub fn begin_drag(&mut self) {
        self.origin = self.pixel;
    }

    /// Moves the origin so that `origin + cumulative` lands on the current
    /// position. Used after the position was changed under an open drag.
    pub fn rebase(&mut self, cumulative: Vector2) {
        self.origin = self.pixel - self.axis.project(cumulative);
    }

    /// Resolves the drag position for the session's cumulative delta.
    pub fn drag_to(&mut self, cumulative: Vector2) -> Vector2 {
        self.set_pixel(self.origin + self.axis.project(cumulative))
    }

    /// Stores `position` after clamping and projection, returning what was stored.
    pub fn set_pixel(&mut self, position: Vector2) -> Vector2 {
        let position = position.finite_or_zero();
        self.pixel = self.axis.project(self.limits.clamp(position));
        self.pixel
    }

    /// Replaces the limits and re-clamps. Returns whether the position moved.
    pub fn set_limits(&mut self, limits: Limits) -> bool {
        self.limits = limits;
        let before = self.pixel;
        self.set_pixel(before) != before
    }

    /// Converts a percentage of the container into pixels.
    pub fn to_pixels(&self, percent: Vector2) -> Result<Vector2, StateError> {
        if !self.has_extent() {
            return Err(StateError::NotMeasured);
        }
        Ok(self.axis.project(Vector2::new(
            percent.x / 100.0 * self.container.width,
            percent.y / 100.0 * self.container.height,
        )))
    }

    /// Percent of the container for the current position. Axes without a
    /// usable extent report 0.
    pub fn percent(&self) -> Vector2 {
        let ratio = |value: f32, extent: f32| {
            if extent > 0.0 {
                value / extent * 100.0
            } else {
                0.0
            }
        };
        self.axis.project(Vector2::new(
            ratio(self.pixel.x, self.container.width),
            ratio(self.pixel.y, self.container.height),
        ))
    }

    pub fn resolved(&self) -> ResolvedPosition {
        ResolvedPosition {
            pixel: self.pixel,
            percent: self.percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_clamps_to_limits_on_axis() {
        let mut positioner = Positioner::new(Axis::X, Limits::horizontal(0.0, 100.0));
        positioner.set_pixel(Vector2::new(10.0, 0.0));
        positioner.begin_drag();
        let pixel = positioner.drag_to(Vector2::new(140.0, 37.0));
        assert_eq!(pixel, Vector2::new(100.0, 0.0));
    }

    #[test]
    fn nan_limits_leave_edges_unbounded() {
        let limits = Limits::new(f32::NAN, 0.0, f32::NAN, 50.0);
        let mut positioner = Positioner::new(Axis::Both, limits);
        positioner.begin_drag();
        assert_eq!(
            positioner.drag_to(Vector2::new(-1.0e6, 80.0)),
            Vector2::new(-1.0e6, 50.0)
        );
    }

    #[test]
    fn narrowing_limits_reclamps() {
        let mut positioner = Positioner::new(Axis::Y, Limits::UNBOUNDED);
        positioner.set_pixel(Vector2::new(0.0, 300.0));
        assert!(positioner.set_limits(Limits::vertical(0.0, 200.0)));
        assert_eq!(positioner.pixel(), Vector2::new(0.0, 200.0));
        assert!(!positioner.set_limits(Limits::vertical(0.0, 250.0)));
    }

    #[test]
    fn percent_needs_extent_on_axis_only() {
        let mut positioner = Positioner::new(Axis::X, Limits::UNBOUNDED);
        assert_eq!(
            positioner.to_pixels(Vector2::new(50.0, 0.0)),
            Err(StateError::NotMeasured)
        );
        positioner.measure(Size::new(400.0, 0.0));
        assert_eq!(
            positioner.to_pixels(Vector2::new(50.0, 80.0)),
            Ok(Vector2::new(200.0, 0.0))
        );
        positioner.set_pixel(Vector2::new(100.0, 0.0));
        assert_eq!(positioner.percent(), Vector2::new(25.0, 0.0));
    }

    #[test]
    fn rebase_keeps_drag_continuous() {
        let mut positioner = Positioner::new(Axis::Both, Limits::UNBOUNDED);
        positioner.begin_drag();
        positioner.drag_to(Vector2::new(20.0, 20.0));
        positioner.set_pixel(Vector2::new(100.0, 100.0));
        positioner.rebase(Vector2::new(20.0, 20.0));
        assert_eq!(
            positioner.drag_to(Vector2::new(25.0, 20.0)),
            Vector2::new(105.0, 100.0)
        );
    }

    #[test]
    fn non_finite_writes_fall_back_to_zero() {
        let mut positioner = Positioner::new(Axis::Both, Limits::UNBOUNDED);
        assert_eq!(
            positioner.set_pixel(Vector2::new(f32::NAN, 4.0)),
            Vector2::new(0.0, 4.0)
        );
    }
}
