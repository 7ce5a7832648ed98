//! Pure math for pointer input in swipekit
//!
//! This crate contains the value types shared by every other swipekit crate:
//! 2D vectors, container sizes and the drag limits rectangle.

mod geometry;
mod vector;

pub use geometry::*;
pub use vector::*;

pub mod prelude {
    pub use crate::geometry::{Limits, Size};
    pub use crate::vector::Vector2;
}
