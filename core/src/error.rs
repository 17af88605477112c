//! Error types shared by the navigator, its scheduler and host implementations.

use alloc::string::String;

/// Errors produced while binding handlers, dispatching events or talking to the host.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// `bind` was called with an empty event name.
    #[error("event name must not be empty")]
    EmptyEventName,
    /// A handler bound to `event` returned an error. Remaining handlers were skipped.
    #[error("handler for event `{event}` failed: {source}")]
    Handler {
        /// Name of the event being dispatched.
        event: String,
        /// The error returned by the handler.
        #[source]
        source: anyhow::Error,
    },
    /// The host environment (location, document or timer) reported a failure.
    #[error("host error: {0}")]
    Host(String),
}

impl NavError {
    /// Builds a [`NavError::Host`] from anything displayable.
    pub fn host(message: impl core::fmt::Display) -> Self {
        Self::Host(alloc::format!("{message}"))
    }

    /// Returns the event name when this error came from a handler.
    #[must_use]
    pub fn event(&self) -> Option<&str> {
        match self {
            Self::Handler { event, .. } => Some(event),
            _ => None,
        }
    }
}
