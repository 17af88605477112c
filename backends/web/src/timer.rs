//! `setTimeout` and document-ready signals for the scheduler.

use core::time::Duration;

use hashnav_core::{NavError, ReadySignal, Timer};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Window};

use crate::error::host_error;

/// Schedules tasks with `window.setTimeout`.
#[derive(Debug, Clone)]
pub struct WindowTimer {
    window: Window,
}

impl WindowTimer {
    /// Creates a timer on `window`.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Timer for WindowTimer {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), NavError> {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let callback = Closure::once_into_js(move || task());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
            .map(drop)
            .map_err(|e| host_error("setTimeout", &e))
    }
}

/// Fires once the document has been parsed.
///
/// Runs the callback immediately when `document.readyState` is already past
/// `loading`, otherwise on `DOMContentLoaded`.
#[derive(Debug, Clone)]
pub struct DocumentReady {
    document: Document,
}

impl DocumentReady {
    /// Creates a signal for `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ReadySignal for DocumentReady {
    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), NavError> {
        if self.document.ready_state() != "loading" {
            callback();
            return Ok(());
        }

        let mut callback = Some(callback);
        let listener = Closure::<dyn FnMut()>::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
        });
        let result = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", listener.as_ref().unchecked_ref());
        // The listener lives for the rest of the page.
        listener.forget();
        result.map_err(|e| host_error("listening for DOMContentLoaded", &e))
    }
}
