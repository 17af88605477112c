#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Browser backend for `hashnav`.
//!
//! [`WebHost`] implements the core host traits over `web-sys`, [`WindowTimer`]
//! and [`DocumentReady`] drive the polling scheduler, and [`WebNavigator`] is
//! the entry point exported to JavaScript:
//!
//! ```js
//! const nav = new WebNavigator();
//! nav.bind("login", function (user, pass) { this.classList.add("active"); });
//! const polling = nav.start();
//! // later
//! polling.stop();
//! ```
//!
//! Handlers are called with the anchor element (or `document.body`) as `this`
//! and the decoded fragment parameters as arguments.

mod app;
mod dom;
mod error;
pub mod logging;
mod timer;

pub use app::{WebNavigator, WebNavigatorBuilder, WebPollHandle};
pub use dom::WebHost;
pub use error::WebError;
pub use timer::{DocumentReady, WindowTimer};
