//! URI transition classification.
//!
//! The watcher is a pure state machine: it receives the current address and
//! decides whether nothing happened, a new event should fire, or an anchor-only
//! navigation should get the previous event re-attached. Performing the
//! decision is left to [`Navigator`](crate::Navigator).

use alloc::string::String;

use crate::{FragmentDescriptor, parse_uri};

/// The state carried between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessState {
    /// The last address the watcher acted upon.
    pub last_observed_uri: String,
    /// The descriptor of the most recent fire or restore.
    pub last_fired: FragmentDescriptor,
}

/// What a tick decided for the observed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The address is the one last acted upon.
    Unchanged,
    /// The address changed but parses to the last fired descriptor.
    Coincident,
    /// An anchor-only address followed an event; navigate to `uri` and reveal `anchor`.
    Restore {
        /// The address with the previous event appended.
        uri: String,
        /// The anchor the user navigated to.
        anchor: String,
    },
    /// A new descriptor should be dispatched.
    Fire(FragmentDescriptor),
}

/// Owns [`ProcessState`] and classifies every observed address.
#[derive(Debug, Clone, Default)]
pub struct NavigationWatcher {
    state: ProcessState,
}

impl NavigationWatcher {
    /// Creates a watcher that has observed nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ProcessState {
                last_observed_uri: String::new(),
                last_fired: FragmentDescriptor::new(),
            },
        }
    }

    /// The current process state.
    #[must_use]
    pub const fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Classifies `uri` and updates the state accordingly.
    ///
    /// A [`Transition::Coincident`] result leaves the last observed address
    /// untouched, so the same address is parsed again on the next call.
    pub fn observe(&mut self, uri: &str) -> Transition {
        if uri == self.state.last_observed_uri {
            return Transition::Unchanged;
        }

        let descriptor = parse_uri(uri);
        if descriptor == self.state.last_fired {
            return Transition::Coincident;
        }

        // Empty tokens count as unset: `page.html#` clears the event context.
        let restores = self.state.last_fired.event().is_some_and(|event| !event.is_empty())
            && descriptor.event().is_none_or(str::is_empty);
        match descriptor
            .anchor()
            .filter(|anchor| !anchor.is_empty())
            .map(String::from)
        {
            Some(anchor) if restores => {
                let mut rebuilt = String::from(uri);
                rebuilt.push_str(&self.state.last_fired.to_fragment_suffix());

                self.state.last_fired = parse_uri(&rebuilt);
                self.state.last_observed_uri.clone_from(&rebuilt);
                Transition::Restore {
                    uri: rebuilt,
                    anchor,
                }
            }
            _ => {
                self.state.last_observed_uri = String::from(uri);
                self.state.last_fired = descriptor.clone();
                Transition::Fire(descriptor)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let watcher = NavigationWatcher::new();
        assert_eq!(watcher.state().last_observed_uri, "");
        assert_eq!(watcher.state().last_fired, FragmentDescriptor::new());
    }

    #[test]
    fn test_same_uri_is_unchanged() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html#a;go;1");
        assert_eq!(watcher.observe("p.html#a;go;1"), Transition::Unchanged);
    }

    #[test]
    fn test_first_plain_uri_is_coincident_with_empty_state() {
        let mut watcher = NavigationWatcher::new();
        assert_eq!(watcher.observe("p.html"), Transition::Coincident);
        assert_eq!(watcher.state().last_observed_uri, "");
    }

    #[test]
    fn test_new_event_fires() {
        let mut watcher = NavigationWatcher::new();
        let transition = watcher.observe("p.html#a;go;1");
        let expected = FragmentDescriptor::new()
            .with_anchor("a")
            .with_event("go")
            .with_params(["1"]);
        assert_eq!(transition, Transition::Fire(expected.clone()));
        assert_eq!(watcher.state().last_observed_uri, "p.html#a;go;1");
        assert_eq!(watcher.state().last_fired, expected);
    }

    #[test]
    fn test_anchor_only_after_event_restores() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html#a;go;hello world");
        let transition = watcher.observe("p.html#b");
        assert_eq!(
            transition,
            Transition::Restore {
                uri: "p.html#b;go;hello%20world".into(),
                anchor: "b".into(),
            }
        );
        assert_eq!(watcher.state().last_observed_uri, "p.html#b;go;hello%20world");
        assert_eq!(
            watcher.state().last_fired,
            FragmentDescriptor::new()
                .with_anchor("b")
                .with_event("go")
                .with_params(["hello world"])
        );
        // The navigation to the rebuilt address is recognised next tick.
        assert_eq!(
            watcher.observe("p.html#b;go;hello%20world"),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_anchor_only_without_previous_event_fires() {
        let mut watcher = NavigationWatcher::new();
        assert!(matches!(watcher.observe("p.html#b"), Transition::Fire(_)));
    }

    #[test]
    fn test_leaving_fragment_after_event_fires_empty() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html#a;go");
        assert_eq!(
            watcher.observe("p.html"),
            Transition::Fire(FragmentDescriptor::new())
        );
    }

    #[test]
    fn test_bare_hash_after_event_fires_instead_of_restoring() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html#a;go;1");
        let transition = watcher.observe("p.html#");
        assert_eq!(
            transition,
            Transition::Fire(FragmentDescriptor::new().with_anchor(""))
        );
        assert_eq!(watcher.state().last_observed_uri, "p.html#");
        assert_eq!(watcher.state().last_fired.event(), None);
    }

    #[test]
    fn test_empty_event_is_not_restored() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html#a;");
        assert_eq!(
            watcher.observe("p.html#b"),
            Transition::Fire(FragmentDescriptor::new().with_anchor("b"))
        );
        assert_eq!(watcher.state().last_observed_uri, "p.html#b");
    }

    #[test]
    fn test_anchor_with_empty_event_after_event_restores() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html#a;go");
        assert_eq!(
            watcher.observe("p.html#b;"),
            Transition::Restore {
                uri: "p.html#b;;go".into(),
                anchor: "b".into(),
            }
        );
    }

    #[test]
    fn test_coincident_descriptor_keeps_stale_uri() {
        let mut watcher = NavigationWatcher::new();
        watcher.observe("p.html?x=1#a;go;1");
        assert_eq!(watcher.observe("p.html?x=2#a;go;1"), Transition::Coincident);
        assert_eq!(watcher.state().last_observed_uri, "p.html?x=1#a;go;1");
        assert_eq!(watcher.observe("p.html?x=2#a;go;1"), Transition::Coincident);
    }
}
