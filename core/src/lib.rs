//! Core of `hashnav`: fragment-driven events for pages without history APIs.
//!
//! An address such as `page.html#results;search;rust;2` carries an anchor
//! (`results`), an event (`search`) and its parameters (`rust`, `2`). A
//! [`Navigator`] watches the address, dispatches new events to the handlers
//! bound with [`Navigator::bind`], and when the user follows a plain anchor link
//! it re-attaches the last event so the page keeps its state.
//!
//! This crate knows nothing about browsers. The page is reached through the
//! [`Host`] traits and time through [`Timer`]; `hashnav-web` implements both
//! over `web-sys`.
//!
//! # Polling
//!
//! [`Scheduler::start`] waits for a [`ReadySignal`], then calls
//! [`Navigator::check_uri`] every [`NavigatorConfig::poll_interval`] until the
//! returned [`PollHandle`] is stopped.

extern crate alloc;

mod anchor;
mod config;
mod dispatcher;
mod error;
mod fragment;
pub mod host;
mod navigator;
mod registry;
mod scheduler;
mod watcher;

#[cfg(test)]
mod mock;

pub use anchor::AnchorResolver;
pub use config::{DEFAULT_POLL_INTERVAL, NavigatorConfig};
pub use dispatcher::EventDispatcher;
pub use error::NavError;
pub use fragment::{FragmentDescriptor, escape, parse_uri, unescape};
pub use host::{Document, Host, ImmediateReady, Location, ReadySignal, Timer, Viewport};
pub use navigator::{Navigator, Tick};
pub use registry::{EventRegistry, Handler};
pub use scheduler::{ErrorReporter, PollHandle, Scheduler, TracingReporter};
pub use watcher::{NavigationWatcher, ProcessState, Transition};
