use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("document has no root element")]
    NoRootElement,
    #[error("{context} failed: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

impl DomError {
    /// Wraps an exception thrown by a browser API.
    pub fn js(context: &'static str, value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|err| String::from(err.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        DomError::Js { context, message }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("runtime config is not valid JSON: {0}")]
    Parse(String),
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
    #[error("`{0}` must be a positive finite number")]
    InvalidThreshold(&'static str),
    #[error("portrait_below ({portrait_below}) must not exceed landscape_above ({landscape_above})")]
    InvertedThresholds {
        portrait_below: f64,
        landscape_above: f64,
    },
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}`")]
pub struct ParseThemeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_offending_field() {
        assert_eq!(
            ConfigError::Empty("image_selector").to_string(),
            "`image_selector` must not be empty"
        );
        let inverted = ConfigError::InvertedThresholds {
            portrait_below: 1.5,
            landscape_above: 1.2,
        };
        assert!(inverted.to_string().contains("1.5"));
        assert!(inverted.to_string().contains("1.2"));
    }

    #[test]
    fn dom_errors_render_context() {
        let err = DomError::Js {
            context: "closest",
            message: "SyntaxError".into(),
        };
        assert_eq!(err.to_string(), "closest failed: SyntaxError");
        assert_eq!(DomError::NoBody.to_string(), "document has no body");
    }
}
