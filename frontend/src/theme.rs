use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomError, ParseThemeError};
use crate::utils::listener::ListenerHandle;

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Where the platform's color-scheme preference comes from.
pub trait ColorSchemeSource {
    /// `false` when the platform cannot answer.
    fn prefers_dark(&self) -> bool;

    /// Calls `on_change` with the new preference on every flip. `None` when
    /// the platform does not report changes.
    fn watch(&self, on_change: Box<dyn FnMut(bool)>) -> Option<ListenerHandle>;
}

/// Where the applied theme is written.
pub trait ThemeTarget {
    fn write_theme(&self, theme: Theme) -> Result<(), DomError>;
}

pub fn read_platform_theme(source: &dyn ColorSchemeSource) -> Theme {
    Theme::from_prefers_dark(source.prefers_dark())
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, MediaQueryList, MediaQueryListEvent};

    use super::{ColorSchemeSource, Theme, ThemeTarget, DARK_SCHEME_QUERY};
    use crate::error::DomError;
    use crate::utils::{dom, listener::ListenerHandle};

    /// `window.matchMedia("(prefers-color-scheme: dark)")`.
    pub struct MediaQuerySource {
        list: Option<MediaQueryList>,
    }

    impl MediaQuerySource {
        pub fn new() -> Self {
            let list =
                web_sys::window().and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten());
            if list.is_none() {
                log::debug!("matchMedia unavailable, assuming light color scheme");
            }
            Self { list }
        }
    }

    impl Default for MediaQuerySource {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ColorSchemeSource for MediaQuerySource {
        fn prefers_dark(&self) -> bool {
            self.list.as_ref().map(|list| list.matches()).unwrap_or(false)
        }

        fn watch(&self, mut on_change: Box<dyn FnMut(bool)>) -> Option<ListenerHandle> {
            let list = self.list.clone()?;
            let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
                move |event: MediaQueryListEvent| on_change(event.matches()),
            );
            if let Err(err) =
                list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            {
                log::warn!(
                    "color scheme changes will not be followed: {}",
                    DomError::js("addEventListener", err)
                );
                return None;
            }
            Some(ListenerHandle::new(move || {
                let _ = list.remove_event_listener_with_callback(
                    "change",
                    closure.as_ref().unchecked_ref(),
                );
            }))
        }
    }

    /// Writes the theme into an attribute on `document.documentElement`.
    pub struct RootAttributeTarget {
        root: Element,
        attribute: String,
    }

    impl RootAttributeTarget {
        pub fn new(attribute: impl Into<String>) -> Result<Self, DomError> {
            Ok(Self::with_root(dom::root_element()?, attribute))
        }

        pub fn with_root(root: Element, attribute: impl Into<String>) -> Self {
            Self {
                root,
                attribute: attribute.into(),
            }
        }
    }

    impl ThemeTarget for RootAttributeTarget {
        fn write_theme(&self, theme: Theme) -> Result<(), DomError> {
            self.root
                .set_attribute(&self.attribute, theme.as_str())
                .map_err(|err| DomError::js("setAttribute", err))
        }
    }

    pub fn system_theme() -> Theme {
        super::read_platform_theme(&MediaQuerySource::new())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{system_theme, MediaQuerySource, RootAttributeTarget};

/// No media queries outside the browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn system_theme() -> Theme {
    Theme::default()
}
