//! Page enhancements for the Postboard site: mirrors the platform color
//! scheme onto `<html>` and labels post image containers by orientation.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod images;
pub mod orientation;
pub mod page;
pub mod state;
pub mod theme;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::RuntimeConfig;
pub use error::{ConfigError, DomError};
pub use images::{ClassifierConfig, ImageObserver};
pub use orientation::{Orientation, OrientationThresholds};
pub use page::{PageContext, PageHandle};
pub use state::theme::ThemeSynchronizer;
pub use theme::Theme;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (RuntimeConfig::default(), Some(err)),
    };
    if console_log::init_with_level(config.log_level()).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    if let Some(err) = config_error {
        log::warn!("ignoring runtime config: {}", err);
    }
    web_sys::console::log_1(&"Starting Postboard frontend (wasm)".into());

    if let Err(err) = page::run_when_ready(config) {
        log::warn!("page enhancements not started: {}", err);
    }
}
