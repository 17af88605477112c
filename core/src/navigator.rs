//! The navigator ties parsing, watching and dispatching to one host.

use core::cell::RefCell;
use core::fmt;

use crate::anchor::AnchorResolver;
use crate::dispatcher::EventDispatcher;
use crate::host::Host;
use crate::registry::{EventRegistry, Handler};
use crate::watcher::{NavigationWatcher, ProcessState, Transition};
use crate::{FragmentDescriptor, NavError};

/// Outcome of one [`Navigator::check_uri`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The address had not changed.
    Unchanged,
    /// The address changed but described the event already fired.
    Coincident,
    /// An anchor-only address had the previous event re-attached.
    Restored,
    /// A new descriptor was dispatched.
    Fired,
}

/// Fragment-driven event navigator bound to one host.
///
/// Owns the event registry and the process state. All methods take `&self`
/// so that handlers may bind, unbind or fire while being dispatched.
///
/// ```
/// # use hashnav_core::{Handler, Navigator};
/// # fn demo<H: hashnav_core::Host>(host: H) -> Result<(), hashnav_core::NavError> {
/// let navigator = Navigator::new(host);
/// navigator.bind("login", Handler::new(|_context, params| {
///     assert_eq!(params.len(), 2);
///     Ok(())
/// }))?;
/// navigator.check_uri()?;
/// # Ok(())
/// # }
/// ```
pub struct Navigator<H: Host> {
    host: H,
    registry: RefCell<EventRegistry<H::Element>>,
    watcher: RefCell<NavigationWatcher>,
}

impl<H: Host> fmt::Debug for Navigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("registry", &self.registry)
            .field("watcher", &self.watcher)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Navigator<H> {
    /// Creates a navigator with an empty registry and fresh process state.
    #[must_use]
    pub const fn new(host: H) -> Self {
        Self {
            host,
            registry: RefCell::new(EventRegistry::new()),
            watcher: RefCell::new(NavigationWatcher::new()),
        }
    }

    /// The host this navigator drives.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// A snapshot of the last observed address and last fired descriptor.
    #[must_use]
    pub fn process_state(&self) -> ProcessState {
        self.watcher.borrow().state().clone()
    }

    /// Runs one tick: reads the address, classifies it and acts on it.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Host`] if the address cannot be read or changed, and
    /// [`NavError::Handler`] if a dispatched handler fails. The process state
    /// is updated before dispatch and stays updated on error.
    pub fn check_uri(&self) -> Result<Tick, NavError> {
        let href = self.host.href()?;
        let transition = self.watcher.borrow_mut().observe(&href);

        match transition {
            Transition::Unchanged => Ok(Tick::Unchanged),
            Transition::Coincident => {
                tracing::trace!(uri = %href, "address describes the current event");
                Ok(Tick::Coincident)
            }
            Transition::Restore { uri, anchor } => {
                tracing::debug!(from = %href, to = %uri, "restoring event after anchor navigation");
                self.host.assign(&uri)?;
                AnchorResolver::new(&self.host).reveal(&anchor);
                Ok(Tick::Restored)
            }
            Transition::Fire(descriptor) => {
                self.fire(&descriptor)?;
                Ok(Tick::Fired)
            }
        }
    }

    /// Binds `handler` to `event`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyEventName`] if `event` is empty.
    pub fn bind(&self, event: &str, handler: Handler<H::Element>) -> Result<(), NavError> {
        self.registry.borrow_mut().bind(event, handler)?;
        tracing::debug!(event, "handler bound");
        Ok(())
    }

    /// Unbinds `handler` from `event`, or every handler when `handler` is `None`.
    ///
    /// Returns `true` if anything was removed.
    pub fn unbind(&self, event: &str, handler: Option<&Handler<H::Element>>) -> bool {
        let removed = self.registry.borrow_mut().unbind(event, handler);
        if removed {
            tracing::debug!(event, all = handler.is_none(), "handler unbound");
        }
        removed
    }

    /// Returns `true` if `event` has at least one handler.
    #[must_use]
    pub fn has_event(&self, event: &str) -> bool {
        self.registry.borrow().contains(event)
    }

    /// Number of handlers bound to `event`.
    #[must_use]
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry.borrow().handlers(event).map_or(0, <[_]>::len)
    }

    /// Dispatches `descriptor` directly, bypassing the watcher.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Handler`] if a handler fails.
    pub fn fire(&self, descriptor: &FragmentDescriptor) -> Result<(), NavError> {
        EventDispatcher::new(&self.host, &self.registry).fire(descriptor)
    }
}
