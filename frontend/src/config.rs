use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::images::ClassifierConfig;
use crate::orientation::{OrientationThresholds, DEFAULT_LANDSCAPE_ABOVE, DEFAULT_PORTRAIT_BELOW};

/// Optional page global: `window.__POSTBOARD_CONFIG = { image_selector: "..." }`.
const CONFIG_GLOBAL: &str = "__POSTBOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub theme_attribute: String,
    pub image_selector: String,
    pub container_selector: String,
    pub landscape_above: f64,
    pub portrait_below: f64,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            theme_attribute: "data-bs-theme".into(),
            image_selector: ".post-image".into(),
            container_selector: ".post-image-container".into(),
            landscape_above: DEFAULT_LANDSCAPE_ABOVE,
            portrait_below: DEFAULT_PORTRAIT_BELOW,
            log_level: "info".into(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("theme_attribute", &self.theme_attribute),
            ("image_selector", &self.image_selector),
            ("container_selector", &self.container_selector),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }
        for (name, value) in [
            ("landscape_above", self.landscape_above),
            ("portrait_below", self.portrait_below),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidThreshold(name));
            }
        }
        if self.portrait_below > self.landscape_above {
            return Err(ConfigError::InvertedThresholds {
                portrait_below: self.portrait_below,
                landscape_above: self.landscape_above,
            });
        }
        log::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))?;
        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }

    pub fn thresholds(&self) -> OrientationThresholds {
        OrientationThresholds {
            landscape_above: self.landscape_above,
            portrait_below: self.portrait_below,
        }
    }

    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig {
            image_selector: self.image_selector.clone(),
            container_selector: self.container_selector.clone(),
            thresholds: self.thresholds(),
        }
    }
}

fn read_window_config() -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

/// Reads the page's runtime config. A missing global yields the defaults.
pub fn load() -> Result<RuntimeConfig, ConfigError> {
    match read_window_config() {
        Some(raw) => RuntimeConfig::from_json(&raw),
        None => Ok(RuntimeConfig::default()),
    }
}
