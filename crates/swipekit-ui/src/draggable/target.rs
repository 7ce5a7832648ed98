use swipekit_foundation::TargetId;
use swipekit_graphics::Size;

/// Host-side handle to the element being dragged.
///
/// The engine only reads from it: an identity for events, whether it is a
/// live drawable surface, and the size of the container percentages are
/// relative to. Rendering happens through the position applier instead.
pub trait DragTarget {
    fn id(&self) -> TargetId;

    /// False when the handle does not refer to a live, drawable surface.
    fn is_drawable(&self) -> bool {
        true
    }

    /// Current size of the container the element moves within.
    fn container_size(&self) -> Size;
}
