use crate::runtime::RuntimeHandle;
use crate::TimerId;

/// Cancellation handle for a recurring timer created by
/// [`RuntimeHandle::set_interval`].
///
/// The timer stays registered for as long as the handle lives.
pub struct IntervalRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl IntervalRegistration {
    pub(crate) fn new(runtime: RuntimeHandle, id: TimerId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub(crate) fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for IntervalRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl std::fmt::Debug for IntervalRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalRegistration")
            .field("id", &self.id)
            .finish()
    }
}
