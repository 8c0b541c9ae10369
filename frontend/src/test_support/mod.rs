#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod runtime;

#[cfg(test)]
pub mod fakes {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::error::DomError;
    use crate::theme::{ColorSchemeSource, Theme, ThemeTarget};
    use crate::utils::listener::ListenerHandle;

    type Listeners = Rc<RefCell<Vec<(usize, Box<dyn FnMut(bool)>)>>>;

    /// Color-scheme source driven by the test.
    pub struct FakeColorScheme {
        supported: bool,
        notifies: bool,
        dark: Cell<bool>,
        next_id: Cell<usize>,
        listeners: Listeners,
    }

    impl FakeColorScheme {
        pub fn new(dark: bool) -> Self {
            Self {
                supported: true,
                notifies: true,
                dark: Cell::new(dark),
                next_id: Cell::new(0),
                listeners: Rc::default(),
            }
        }

        pub fn without_change_events(dark: bool) -> Self {
            Self {
                notifies: false,
                ..Self::new(dark)
            }
        }

        /// No media query capability at all.
        pub fn unsupported() -> Self {
            Self {
                supported: false,
                notifies: false,
                ..Self::new(true)
            }
        }

        pub fn flip(&self, dark: bool) {
            self.dark.set(dark);
            for (_, listener) in self.listeners.borrow_mut().iter_mut() {
                listener(dark);
            }
        }

        pub fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }
    }

    impl ColorSchemeSource for FakeColorScheme {
        fn prefers_dark(&self) -> bool {
            self.supported && self.dark.get()
        }

        fn watch(&self, on_change: Box<dyn FnMut(bool)>) -> Option<ListenerHandle> {
            if !self.notifies {
                return None;
            }
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.listeners.borrow_mut().push((id, on_change));
            let listeners = Rc::downgrade(&self.listeners);
            Some(ListenerHandle::new(move || {
                if let Some(listeners) = listeners.upgrade() {
                    listeners.borrow_mut().retain(|(other, _)| *other != id);
                }
            }))
        }
    }

    #[derive(Default)]
    pub struct RecordingTarget {
        writes: RefCell<Vec<Theme>>,
    }

    impl RecordingTarget {
        pub fn writes(&self) -> Vec<Theme> {
            self.writes.borrow().clone()
        }

        pub fn last(&self) -> Option<Theme> {
            self.writes.borrow().last().copied()
        }
    }

    impl ThemeTarget for RecordingTarget {
        fn write_theme(&self, theme: Theme) -> Result<(), DomError> {
            self.writes.borrow_mut().push(theme);
            Ok(())
        }
    }
}
