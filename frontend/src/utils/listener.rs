use std::fmt;

/// Owns a live browser subscription. The teardown runs once, on
/// [`ListenerHandle::dispose`] or when the handle is dropped.
pub struct ListenerHandle {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl ListenerHandle {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn dispose(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}
