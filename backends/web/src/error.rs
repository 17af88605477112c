use core::fmt;

use hashnav_core::NavError;

/// Error type produced by the web backend.
#[derive(Debug, Clone)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    DomUnavailable,
    /// Wrapper around JavaScript exceptions.
    Js(String),
    /// The navigator rejected an operation or a handler failed.
    Navigation(String),
    /// A value passed from JavaScript could not be converted.
    InvalidDescriptor(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomUnavailable => write!(f, "DOM is not available"),
            Self::Js(msg) => write!(f, "JavaScript error: {msg}"),
            Self::Navigation(msg) => write!(f, "navigation error: {msg}"),
            Self::InvalidDescriptor(msg) => write!(f, "invalid fragment descriptor: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

/// Best-effort text for a thrown JavaScript value.
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(js_message(&value))
    }
}

impl From<NavError> for WebError {
    fn from(value: NavError) -> Self {
        Self::Navigation(value.to_string())
    }
}

impl From<serde_json::Error> for WebError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidDescriptor(value.to_string())
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        match value {
            WebError::Js(msg) => Self::from(msg),
            other => js_sys::Error::new(&other.to_string()).into(),
        }
    }
}

/// Converts a failed DOM call into a [`NavError::Host`].
pub(crate) fn host_error(context: &str, value: &wasm_bindgen::JsValue) -> NavError {
    NavError::host(format_args!("{context}: {}", js_message(value)))
}
