mod bus;
mod event;

pub use bus::{GestureEventBus, GestureEventSource, SubscriptionId};
pub use event::{GestureEvent, GestureEventKind, ResolvedPosition, TargetId};
