use std::rc::Rc;

use leptos::*;

use crate::theme::{read_platform_theme, ColorSchemeSource, Theme, ThemeTarget};
use crate::utils::listener::ListenerHandle;

/// Mirrors the platform color-scheme preference onto a [`ThemeTarget`] for
/// as long as it is alive and not disposed.
pub struct ThemeSynchronizer {
    theme: RwSignal<Theme>,
    target: Rc<dyn ThemeTarget>,
    listener: Option<ListenerHandle>,
}

impl ThemeSynchronizer {
    pub fn initialize(source: &dyn ColorSchemeSource, target: Rc<dyn ThemeTarget>) -> Self {
        let initial = read_platform_theme(source);
        let theme = create_rw_signal(initial);
        write_theme(target.as_ref(), theme, initial);

        let listener = {
            let target = Rc::clone(&target);
            source.watch(Box::new(move |prefers_dark| {
                write_theme(target.as_ref(), theme, Theme::from_prefers_dark(prefers_dark));
            }))
        };
        if listener.is_none() {
            log::debug!("platform does not report color scheme changes");
        }

        Self {
            theme,
            target,
            listener,
        }
    }

    pub fn apply_theme(&self, theme: Theme) {
        write_theme(self.target.as_ref(), self.theme, theme);
    }

    pub fn current_theme(&self) -> Theme {
        self.theme.get_untracked()
    }

    pub fn signal(&self) -> ReadSignal<Theme> {
        self.theme.read_only()
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Stops following the platform preference. The last applied theme stays
    /// in place.
    pub fn dispose(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.dispose();
        }
    }
}

fn write_theme(target: &dyn ThemeTarget, signal: RwSignal<Theme>, theme: Theme) {
    if let Err(err) = target.write_theme(theme) {
        log::warn!("failed to apply {} theme: {}", theme, err);
    }
    signal.set(theme);
    log::debug!("applied {} theme", theme);
}
