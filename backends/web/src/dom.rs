use hashnav_core::{Document as HostDocument, Location, NavError, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::{WebError, host_error};

/// The browser page as seen by the navigator.
#[derive(Debug, Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
    fallback_root: Element,
}

impl WebHost {
    /// Binds to the current window and document.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::DomUnavailable`] outside of a browser or when the
    /// document has no root element.
    pub fn new() -> Result<Self, WebError> {
        let window: Window = web_sys::window().ok_or(WebError::DomUnavailable)?;
        let document: Document = window.document().ok_or(WebError::DomUnavailable)?;
        let fallback_root = document
            .document_element()
            .ok_or(WebError::DomUnavailable)?;
        Ok(Self {
            window,
            document,
            fallback_root,
        })
    }

    /// Returns the owning window.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }
}

impl Location for WebHost {
    fn href(&self) -> Result<String, NavError> {
        self.window
            .location()
            .href()
            .map_err(|e| host_error("reading location.href", &e))
    }

    fn assign(&self, uri: &str) -> Result<(), NavError> {
        self.window
            .location()
            .set_href(uri)
            .map_err(|e| host_error("setting location.href", &e))
    }
}

impl HostDocument for WebHost {
    type Element = Element;

    fn root(&self) -> Element {
        self.document
            .body()
            .map(Element::from)
            .or_else(|| self.document.document_element())
            .unwrap_or_else(|| self.fallback_root.clone())
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn anchors(&self) -> Vec<Element> {
        let anchors = self.document.anchors();
        (0..anchors.length()).filter_map(|i| anchors.item(i)).collect()
    }

    fn anchor_name(&self, element: &Element) -> Option<String> {
        element.get_attribute("name")
    }

    fn offset(&self, element: &Element) -> Option<(i32, i32)> {
        element
            .dyn_ref::<HtmlElement>()
            .map(|html| (html.offset_left(), html.offset_top()))
    }
}

impl Viewport for WebHost {
    fn scroll_to(&self, x: i32, y: i32) {
        self.window
            .scroll_to_with_x_and_y(f64::from(x), f64::from(y));
    }
}
