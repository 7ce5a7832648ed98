//! Testing utilities and harness for swipekit

pub mod assertions;
pub mod recorder;
pub mod rule;
pub mod surface;

pub use recorder::EventRecorder;
pub use rule::{DragTestRule, FRAME_NANOS};
pub use surface::TestSurface;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::assertions::{assert_approx_eq, assert_vector_approx_eq};
    pub use crate::recorder::EventRecorder;
    pub use crate::rule::DragTestRule;
    pub use crate::surface::TestSurface;
}
