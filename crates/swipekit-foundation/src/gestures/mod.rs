pub mod axis_guard;
pub mod direction;
pub mod session;
pub mod velocity;

pub use axis_guard::{AxisGuard, AxisGuardChange};
pub use direction::{Axis, Direction};
pub use session::GestureSession;
pub use velocity::{velocity_over, VelocitySample, VelocityTracker};
