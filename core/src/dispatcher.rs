//! Delivery of a descriptor to its bound handlers.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::anchor::AnchorResolver;
use crate::host::{Document, Viewport};
use crate::registry::{EventRegistry, Handler};
use crate::{FragmentDescriptor, NavError};

/// Invokes the handlers bound to a descriptor's event.
pub struct EventDispatcher<'a, H: Document> {
    host: &'a H,
    registry: &'a RefCell<EventRegistry<H::Element>>,
}

impl<H: Document> fmt::Debug for EventDispatcher<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<'a, H> EventDispatcher<'a, H>
where
    H: Document + Viewport,
{
    /// Creates a dispatcher over `host` and `registry`.
    #[must_use]
    pub const fn new(host: &'a H, registry: &'a RefCell<EventRegistry<H::Element>>) -> Self {
        Self { host, registry }
    }

    /// Dispatches `descriptor`.
    ///
    /// The anchor, when it resolves, is scrolled into view and becomes the
    /// handlers' context; otherwise the document root is used. Handlers run in
    /// registration order and the first failure stops the rest.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Handler`] with the first handler error.
    pub fn fire(&self, descriptor: &FragmentDescriptor) -> Result<(), NavError> {
        let context = descriptor
            .anchor()
            .filter(|anchor| !anchor.is_empty())
            .and_then(|anchor| AnchorResolver::new(self.host).reveal(anchor))
            .unwrap_or_else(|| self.host.root());

        let Some(event) = descriptor.event().filter(|event| !event.is_empty()) else {
            return Ok(());
        };

        // Snapshot so handlers can bind/unbind while we iterate.
        let handlers: Vec<Handler<H::Element>> = self
            .registry
            .borrow()
            .handlers(event)
            .map(<[_]>::to_vec)
            .unwrap_or_default();

        tracing::debug!(event, handlers = handlers.len(), "firing fragment event");

        for handler in &handlers {
            handler
                .call(&context, descriptor.params())
                .map_err(|source| NavError::Handler {
                    event: String::from(event),
                    source,
                })?;
        }
        Ok(())
    }
}
