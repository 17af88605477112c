//! Capabilities the navigator needs from its hosting page.
//!
//! A browser backend implements these over the DOM; tests implement them over
//! plain data. The navigator itself never touches a concrete document type.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::time::Duration;

use crate::NavError;

/// Read and change the current page address.
pub trait Location {
    /// Returns the full current URI, fragment included.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Host`] if the address cannot be read.
    fn href(&self) -> Result<String, NavError>;

    /// Navigates the page to `uri`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Host`] if the navigation is rejected.
    fn assign(&self, uri: &str) -> Result<(), NavError>;
}

/// Element lookup in the hosting document.
pub trait Document {
    /// Handle to a document element. Handlers receive it as their context.
    type Element: Clone + Debug + 'static;

    /// The root content element used as context when no anchor applies.
    fn root(&self) -> Self::Element;

    /// Looks up an element by its identifier.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All named anchor elements, in document order.
    fn anchors(&self) -> Vec<Self::Element>;

    /// The `name` attribute of `element`, if any.
    fn anchor_name(&self, element: &Self::Element) -> Option<String>;

    /// Horizontal and vertical offset of `element`, when it has a layout position.
    fn offset(&self, element: &Self::Element) -> Option<(i32, i32)>;
}

/// Control over the visible part of the page.
pub trait Viewport {
    /// Scrolls the viewport so that `(x, y)` is at its top-left corner.
    fn scroll_to(&self, x: i32, y: i32);
}

/// Everything a [`Navigator`](crate::Navigator) needs from its host.
pub trait Host: Location + Document + Viewport {}

impl<T: Location + Document + Viewport> Host for T {}

/// One-shot delayed execution.
pub trait Timer {
    /// Runs `task` once after `delay`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Host`] if the task cannot be scheduled.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), NavError>;
}

/// Signals when the hosting document's structure is available.
pub trait ReadySignal {
    /// Invokes `callback` once the document is ready, at most once.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Host`] if the callback cannot be registered.
    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), NavError>;
}

/// A [`ReadySignal`] for hosts that are ready from the start.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateReady;

impl ReadySignal for ImmediateReady {
    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), NavError> {
        callback();
        Ok(())
    }
}
