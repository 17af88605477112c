#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

#[doc(inline)]
pub use hashnav_core::*;

/// Browser backend built on `web-sys`.
#[cfg(feature = "web")]
pub use hashnav_web as web;

pub mod prelude {
    //! Commonly used types for binding handlers and driving a navigator.
    //!
    //! ```rust
    //! use hashnav::prelude::*;
    //!
    //! let descriptor = parse_uri("http://example.com/#top;open;a;b");
    //! assert_eq!(descriptor.event(), Some("open"));
    //! ```
    pub use hashnav_core::{
        FragmentDescriptor, Handler, Host, NavError, Navigator, NavigatorConfig, PollHandle,
        Scheduler, Tick, parse_uri,
    };

    #[cfg(feature = "web")]
    pub use hashnav_web::{WebNavigator, WebNavigatorBuilder};
}
