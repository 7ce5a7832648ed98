use std::cell::Cell;
use std::rc::Rc;

use swipekit_foundation::TargetId;
use swipekit_graphics::Size;
use swipekit_ui::DragTarget;

/// In-memory drag target whose container size can be changed mid-test.
#[derive(Debug)]
pub struct TestSurface {
    id: TargetId,
    drawable: bool,
    size: Cell<Size>,
    measurements: Cell<usize>,
}

impl TestSurface {
    pub fn new(width: f32, height: f32) -> Rc<Self> {
        Rc::new(Self {
            id: 1,
            drawable: true,
            size: Cell::new(Size::new(width, height)),
            measurements: Cell::new(0),
        })
    }

    /// A handle that does not refer to a live surface.
    pub fn detached() -> Rc<Self> {
        Rc::new(Self {
            id: 0,
            drawable: false,
            size: Cell::new(Size::ZERO),
            measurements: Cell::new(0),
        })
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.size.set(Size::new(width, height));
    }

    /// How many times the engine asked for the container size.
    pub fn measurements(&self) -> usize {
        self.measurements.get()
    }
}

impl DragTarget for TestSurface {
    fn id(&self) -> TargetId {
        self.id
    }

    fn is_drawable(&self) -> bool {
        self.drawable
    }

    fn container_size(&self) -> Size {
        self.measurements.set(self.measurements.get() + 1);
        self.size.get()
    }
}
