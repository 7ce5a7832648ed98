//! Direction classification and axis projection.

use swipekit_graphics::Vector2;

/// Axis a draggable is allowed to move along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    #[default]
    Both,
}

impl Axis {
    /// Zeroes the component(s) not covered by this axis.
    pub fn project(self, v: Vector2) -> Vector2 {
        match self {
            Axis::X => Vector2::new(v.x, 0.0),
            Axis::Y => Vector2::new(0.0, v.y),
            Axis::Both => v,
        }
    }

    /// Magnitude of motion along this axis.
    pub fn along(self, v: Vector2) -> f32 {
        match self {
            Axis::X => v.x.abs(),
            Axis::Y => v.y.abs(),
            Axis::Both => v.length(),
        }
    }

    /// Magnitude of motion perpendicular to this axis. Always 0 for `Both`.
    pub fn across(self, v: Vector2) -> f32 {
        match self {
            Axis::X => v.y.abs(),
            Axis::Y => v.x.abs(),
            Axis::Both => 0.0,
        }
    }

    pub fn allows(self, direction: Direction) -> bool {
        match direction {
            Direction::None => false,
            Direction::Left | Direction::Right => matches!(self, Axis::X | Axis::Both),
            Direction::Up | Direction::Down => matches!(self, Axis::Y | Axis::Both),
        }
    }

    pub fn includes_x(self) -> bool {
        matches!(self, Axis::X | Axis::Both)
    }

    pub fn includes_y(self) -> bool {
        matches!(self, Axis::Y | Axis::Both)
    }
}

/// Dominant direction of a delta in screen coordinates (y grows downwards).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The larger-magnitude component wins; equal magnitudes (including a
    /// zero delta) classify as `None`.
    pub fn classify(delta: Vector2) -> Direction {
        let (ax, ay) = (delta.x.abs(), delta.y.abs());
        if ax > ay {
            if delta.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if ay > ax {
            if delta.y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else {
            Direction::None
        }
    }

    /// Classifies motion from `start` to `end`.
    pub fn between(start: Vector2, end: Vector2) -> Direction {
        Self::classify(end - start)
    }

    /// Classifies after zeroing what `axis` does not cover.
    pub fn classify_on_axis(delta: Vector2, axis: Axis) -> Direction {
        Self::classify(axis.project(delta))
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}
