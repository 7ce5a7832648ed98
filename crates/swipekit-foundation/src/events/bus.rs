//! Synchronous, in-order publish/subscribe for gesture events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;

use super::{GestureEvent, GestureEventKind};

pub type SubscriptionId = u64;

type Handler = Rc<dyn Fn(&GestureEvent) + 'static>;

/// What consumers of gesture events depend on.
pub trait GestureEventSource {
    fn subscribe(
        &self,
        kind: GestureEventKind,
        handler: Box<dyn Fn(&GestureEvent) + 'static>,
    ) -> SubscriptionId;

    /// Returns false if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    fn on<F>(&self, kind: GestureEventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&GestureEvent) + 'static,
        Self: Sized,
    {
        self.subscribe(kind, Box::new(handler))
    }
}

struct Subscriber {
    id: SubscriptionId,
    kind: GestureEventKind,
    handler: Handler,
}

#[derive(Default)]
pub struct GestureEventBus {
    subscribers: RefCell<SmallVec<[Subscriber; 4]>>,
    next_id: Cell<SubscriptionId>,
}

impl GestureEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every subscriber of its kind, in subscription
    /// order, and reports whether any of them prevented the default.
    ///
    /// The subscriber list is snapshotted first: handlers added or removed
    /// during dispatch take effect from the next publish.
    pub fn publish(&self, event: &GestureEvent) -> bool {
        let handlers: SmallVec<[Handler; 4]> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|subscriber| subscriber.kind == event.kind)
            .map(|subscriber| Rc::clone(&subscriber.handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
        event.is_default_prevented()
    }

    pub fn has_subscribers(&self, kind: GestureEventKind) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .any(|subscriber| subscriber.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.subscribers.borrow_mut().clear();
    }
}

impl GestureEventSource for GestureEventBus {
    fn subscribe(
        &self,
        kind: GestureEventKind,
        handler: Box<dyn Fn(&GestureEvent) + 'static>,
    ) -> SubscriptionId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            kind,
            handler: Rc::from(handler),
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|subscriber| subscriber.id != id);
        subscribers.len() != before
    }
}
