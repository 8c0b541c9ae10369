use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::RuntimeConfig;
use crate::error::DomError;
use crate::images::{self, ImageObserver};
use crate::state::theme::ThemeSynchronizer;
use crate::theme;
use crate::utils::dom;

/// Global under which the started page is published for other scripts.
pub const HANDLE_GLOBAL: &str = "themeManager";

/// Everything started for one page. The two parts are independent; either
/// may be absent if it failed to start.
#[derive(Default)]
pub struct PageContext {
    theme: Option<ThemeSynchronizer>,
    images: Option<ImageObserver>,
}

impl PageContext {
    pub fn start(config: &RuntimeConfig) -> Self {
        let theme = start_theme(config)
            .inspect_err(|err| log::warn!("theme synchronizer not started: {}", err))
            .ok();
        let images = images::initialize_detection(Rc::new(config.classifier()))
            .inspect_err(|err| log::warn!("image orientation detection not started: {}", err))
            .ok();
        log::info!(
            "page started (theme: {}, image detection: {})",
            theme
                .as_ref()
                .map(|sync| sync.current_theme().as_str())
                .unwrap_or("off"),
            if images.is_some() { "on" } else { "off" },
        );
        Self { theme, images }
    }

    pub fn theme(&self) -> Option<&ThemeSynchronizer> {
        self.theme.as_ref()
    }

    pub fn is_detecting_images(&self) -> bool {
        self.images.is_some()
    }

    pub fn dispose(&mut self) {
        if let Some(theme) = self.theme.as_mut() {
            theme.dispose();
        }
        if let Some(images) = self.images.take() {
            images.dispose();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn start_theme(config: &RuntimeConfig) -> Result<ThemeSynchronizer, DomError> {
    let target = theme::RootAttributeTarget::new(config.theme_attribute.as_str())?;
    Ok(ThemeSynchronizer::initialize(
        &theme::MediaQuerySource::new(),
        Rc::new(target),
    ))
}

#[cfg(not(target_arch = "wasm32"))]
fn start_theme(_config: &RuntimeConfig) -> Result<ThemeSynchronizer, DomError> {
    Err(DomError::NoWindow)
}

/// Script-facing view of a started page (`window.themeManager`).
#[wasm_bindgen]
pub struct PageHandle {
    context: PageContext,
}

#[wasm_bindgen]
impl PageHandle {
    #[wasm_bindgen(js_name = getCurrentTheme)]
    pub fn current_theme(&self) -> String {
        self.context
            .theme()
            .map(ThemeSynchronizer::current_theme)
            .unwrap_or_default()
            .to_string()
    }

    /// The platform preference right now, whatever was last applied.
    #[wasm_bindgen(js_name = getSystemTheme)]
    pub fn system_theme(&self) -> String {
        theme::system_theme().to_string()
    }

    pub fn dispose(&mut self) {
        self.context.dispose();
    }
}

impl PageHandle {
    pub fn new(context: PageContext) -> Self {
        Self { context }
    }
}

fn publish(context: PageContext) -> Result<(), DomError> {
    let window = dom::window()?;
    let handle = JsValue::from(PageHandle::new(context));
    js_sys::Reflect::set(&window, &HANDLE_GLOBAL.into(), &handle)
        .map_err(|err| DomError::js("publish page handle", err))?;
    Ok(())
}

fn start_and_publish(config: &RuntimeConfig) {
    if let Err(err) = publish(PageContext::start(config)) {
        log::warn!("{}", err);
    }
}

/// Starts the page once the initial document has been parsed.
pub fn run_when_ready(config: RuntimeConfig) -> Result<(), DomError> {
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        start_and_publish(&config);
        return Ok(());
    }

    let on_ready = Closure::once_into_js(move || start_and_publish(&config));
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(|err| DomError::js("addEventListener", err))
}
