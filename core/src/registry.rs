//! Event name → handler list.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::NavError;

type HandlerFn<E> = dyn Fn(&E, &[String]) -> anyhow::Result<()>;

/// A callback bound to a fragment event.
///
/// Handlers receive the invocation context element and the decoded fragment
/// parameters. Clones share identity: binding a clone of an already bound
/// handler is a no-op, and unbinding a clone removes the original.
pub struct Handler<E> {
    inner: Rc<HandlerFn<E>>,
}

impl<E> Handler<E> {
    /// Wraps a closure into a handler with a fresh identity.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&E, &[String]) -> anyhow::Result<()> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Invokes the handler.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped closure returns.
    pub fn call(&self, context: &E, params: &[String]) -> anyhow::Result<()> {
        (self.inner)(context, params)
    }

    /// Returns `true` if both handles refer to the same callback.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> PartialEq for Handler<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<E> Eq for Handler<E> {}

impl<E> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

/// Mapping from event name to its ordered, duplicate-free handler list.
#[derive(Debug)]
pub struct EventRegistry<E> {
    entries: BTreeMap<String, Vec<Handler<E>>>,
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventRegistry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Appends `handler` to the list for `name` unless it is already there.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyEventName`] if `name` is empty.
    pub fn bind(&mut self, name: &str, handler: Handler<E>) -> Result<(), NavError> {
        if name.is_empty() {
            return Err(NavError::EmptyEventName);
        }

        let handlers = self.entries.entry(String::from(name)).or_default();
        if !handlers.contains(&handler) {
            handlers.push(handler);
        }
        Ok(())
    }

    /// Removes `handler` from `name`, or the whole entry when `handler` is `None`.
    ///
    /// An entry whose list becomes empty is dropped. Returns `true` if anything
    /// was removed.
    pub fn unbind(&mut self, name: &str, handler: Option<&Handler<E>>) -> bool {
        let Some(handler) = handler else {
            return self.entries.remove(name).is_some();
        };
        let Some(handlers) = self.entries.get_mut(name) else {
            return false;
        };

        let before = handlers.len();
        handlers.retain(|bound| !bound.same_as(handler));
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            self.entries.remove(name);
        }
        removed
    }

    /// The handlers bound to `name`, in registration order.
    #[must_use]
    pub fn handlers(&self, name: &str) -> Option<&[Handler<E>]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Returns `true` if `name` has an entry.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct event names with at least one handler.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no event has handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler<()> {
        Handler::new(|_, _| Ok(()))
    }

    #[test]
    fn test_bind_creates_entry() {
        let mut registry = EventRegistry::new();
        registry.bind("go", noop()).unwrap();
        assert!(registry.contains("go"));
        assert_eq!(registry.handlers("go").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_bind_rejects_empty_name() {
        let mut registry = EventRegistry::new();
        let result = registry.bind("", noop());
        assert!(matches!(result, Err(NavError::EmptyEventName)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_bind_same_handler_twice_keeps_one() {
        let mut registry = EventRegistry::new();
        let handler = noop();
        registry.bind("go", handler.clone()).unwrap();
        registry.bind("go", handler).unwrap();
        assert_eq!(registry.handlers("go").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_bind_preserves_registration_order() {
        let mut registry = EventRegistry::new();
        let first = noop();
        let second = noop();
        registry.bind("go", first.clone()).unwrap();
        registry.bind("go", second.clone()).unwrap();
        registry.bind("go", first.clone()).unwrap();
        assert_eq!(registry.handlers("go"), Some(&[first, second][..]));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = EventRegistry::new();
        registry.bind("Go", noop()).unwrap();
        assert!(!registry.contains("go"));
    }

    #[test]
    fn test_unbind_removes_only_that_handler() {
        let mut registry = EventRegistry::new();
        let keep = noop();
        let gone = noop();
        registry.bind("go", keep.clone()).unwrap();
        registry.bind("go", gone.clone()).unwrap();

        assert!(registry.unbind("go", Some(&gone)));
        assert_eq!(registry.handlers("go"), Some(&[keep][..]));
        assert!(!registry.unbind("go", Some(&gone)));
    }

    #[test]
    fn test_unbind_last_handler_drops_entry() {
        let mut registry = EventRegistry::new();
        let handler = noop();
        registry.bind("go", handler.clone()).unwrap();
        assert!(registry.unbind("go", Some(&handler)));
        assert!(!registry.contains("go"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unbind_without_handler_drops_whole_entry() {
        let mut registry = EventRegistry::new();
        registry.bind("go", noop()).unwrap();
        registry.bind("go", noop()).unwrap();
        registry.bind("stay", noop()).unwrap();

        assert!(registry.unbind("go", None));
        assert!(!registry.contains("go"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unbind_unknown_name_is_noop() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        assert!(!registry.unbind("missing", None));
        assert!(!registry.unbind("missing", Some(&noop())));
    }
}
