use std::cell::RefCell;
use std::rc::Rc;

use swipekit_ui::{GestureEvent, GestureEventKind, GestureEventSource};

const ALL_KINDS: [GestureEventKind; 4] = [
    GestureEventKind::Start,
    GestureEventKind::Move,
    GestureEventKind::End,
    GestureEventKind::Settle,
];

/// Subscribes to every event kind and keeps a copy of each delivery.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<GestureEvent>>>,
}

impl EventRecorder {
    pub fn attach(source: &dyn GestureEventSource) -> Self {
        let recorder = Self::default();
        for kind in ALL_KINDS {
            let events = Rc::clone(&recorder.events);
            source.subscribe(
                kind,
                Box::new(move |event| events.borrow_mut().push(event.clone())),
            );
        }
        recorder
    }

    pub fn kinds(&self) -> Vec<GestureEventKind> {
        self.events.borrow().iter().map(|event| event.kind).collect()
    }

    pub fn count(&self, kind: GestureEventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind == kind)
            .count()
    }

    pub fn last(&self, kind: GestureEventKind) -> Option<GestureEvent> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|event| event.kind == kind)
            .cloned()
    }

    pub fn all(&self) -> Vec<GestureEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
