//! In-memory host, timer and ready signal for tests.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::time::Duration;

use crate::NavError;
use crate::host::{Document, Location, ReadySignal, Timer, Viewport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MockElement {
    pub(crate) label: &'static str,
    id: Option<&'static str>,
    name: Option<&'static str>,
    offset: Option<(i32, i32)>,
}

impl MockElement {
    pub(crate) const fn root() -> Self {
        Self {
            label: "body",
            id: None,
            name: None,
            offset: None,
        }
    }

    pub(crate) const fn with_id(id: &'static str, offset: (i32, i32)) -> Self {
        Self {
            label: id,
            id: Some(id),
            name: None,
            offset: Some(offset),
        }
    }

    pub(crate) const fn named_anchor(name: &'static str, offset: (i32, i32)) -> Self {
        Self {
            label: name,
            id: None,
            name: Some(name),
            offset: Some(offset),
        }
    }

    pub(crate) const fn labelled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

/// Scripted page: an address, a fixed element table and logs of side effects.
#[derive(Debug, Default)]
pub(crate) struct MockHost {
    href: RefCell<String>,
    elements: Vec<MockElement>,
    navigations: RefCell<Vec<String>>,
    scrolls: RefCell<Vec<(i32, i32)>>,
    broken: Cell<bool>,
}

impl MockHost {
    pub(crate) fn new(href: &str) -> Self {
        Self {
            href: RefCell::new(String::from(href)),
            ..Self::default()
        }
    }

    pub(crate) fn with_element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Simulates the user changing the address without the navigator noticing.
    pub(crate) fn set_href(&self, href: &str) {
        *self.href.borrow_mut() = String::from(href);
    }

    pub(crate) fn current_href(&self) -> String {
        self.href.borrow().clone()
    }

    /// Makes every location access fail until called again with `false`.
    pub(crate) fn set_broken(&self, broken: bool) {
        self.broken.set(broken);
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub(crate) fn scrolls(&self) -> Vec<(i32, i32)> {
        self.scrolls.borrow().clone()
    }
}

impl Location for MockHost {
    fn href(&self) -> Result<String, NavError> {
        if self.broken.get() {
            return Err(NavError::host("location unavailable"));
        }
        Ok(self.current_href())
    }

    fn assign(&self, uri: &str) -> Result<(), NavError> {
        if self.broken.get() {
            return Err(NavError::host("navigation blocked"));
        }
        self.navigations.borrow_mut().push(String::from(uri));
        self.set_href(uri);
        Ok(())
    }
}

impl Document for MockHost {
    type Element = MockElement;

    fn root(&self) -> MockElement {
        MockElement::root()
    }

    fn element_by_id(&self, id: &str) -> Option<MockElement> {
        self.elements
            .iter()
            .find(|element| element.id == Some(id))
            .cloned()
    }

    fn anchors(&self) -> Vec<MockElement> {
        self.elements
            .iter()
            .filter(|element| element.name.is_some())
            .cloned()
            .collect()
    }

    fn anchor_name(&self, element: &MockElement) -> Option<String> {
        element.name.map(String::from)
    }

    fn offset(&self, element: &MockElement) -> Option<(i32, i32)> {
        element.offset
    }
}

impl Viewport for MockHost {
    fn scroll_to(&self, x: i32, y: i32) {
        self.scrolls.borrow_mut().push((x, y));
    }
}

/// Timer whose tasks run only when the test says so.
#[derive(Default)]
pub(crate) struct ManualTimer {
    pending: RefCell<VecDeque<(Duration, Box<dyn FnOnce()>)>>,
    refuse: Cell<bool>,
}

impl core::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ManualTimer")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl ManualTimer {
    pub(crate) fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub(crate) fn next_delay(&self) -> Option<Duration> {
        self.pending.borrow().front().map(|(delay, _)| *delay)
    }

    /// Runs the oldest pending task. Returns `false` if nothing was pending.
    pub(crate) fn run_next(&self) -> bool {
        let Some((_, task)) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        task();
        true
    }

    pub(crate) fn set_refuse(&self, refuse: bool) {
        self.refuse.set(refuse);
    }
}

impl Timer for ManualTimer {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Result<(), NavError> {
        if self.refuse.get() {
            return Err(NavError::host("timer refused"));
        }
        self.pending.borrow_mut().push_back((delay, task));
        Ok(())
    }
}

/// Ready signal that holds its callback until [`ManualReady::fire`].
#[derive(Default)]
pub(crate) struct ManualReady {
    callbacks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualReady {
    pub(crate) fn fire(&self) {
        let callbacks = core::mem::take(&mut *self.callbacks.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }
}

impl ReadySignal for ManualReady {
    fn on_ready(&self, callback: Box<dyn FnOnce()>) -> Result<(), NavError> {
        self.callbacks.borrow_mut().push(callback);
        Ok(())
    }
}
