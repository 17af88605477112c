//! Anchor lookup and scrolling.

use crate::host::{Document, Viewport};

/// Resolves fragment anchors to document elements.
#[derive(Debug)]
pub struct AnchorResolver<'a, H> {
    host: &'a H,
}

impl<'a, H> AnchorResolver<'a, H>
where
    H: Document + Viewport,
{
    /// Creates a resolver over `host`.
    #[must_use]
    pub const fn new(host: &'a H) -> Self {
        Self { host }
    }

    /// Finds the element identified by `name`.
    ///
    /// Tries the element id first, then the first named anchor whose `name`
    /// attribute equals `name`. An empty `name` never matches.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<H::Element> {
        if name.is_empty() {
            return None;
        }
        self.host.element_by_id(name).or_else(|| {
            self.host
                .anchors()
                .into_iter()
                .find(|anchor| self.host.anchor_name(anchor).as_deref() == Some(name))
        })
    }

    /// Scrolls the viewport to `element`.
    ///
    /// Elements sitting on either axis (offset `0`) are treated as having no
    /// position and leave the viewport alone. Returns `true` if it scrolled.
    pub fn scroll_to(&self, element: &H::Element) -> bool {
        match self.host.offset(element) {
            Some((x, y)) if x != 0 && y != 0 => {
                tracing::trace!(x, y, "scrolling to anchor");
                self.host.scroll_to(x, y);
                true
            }
            _ => false,
        }
    }

    /// Finds `name` and scrolls to it. Returns the element when found.
    pub fn reveal(&self, name: &str) -> Option<H::Element> {
        let element = self.find(name)?;
        self.scroll_to(&element);
        Some(element)
    }
}
