//! Polling configuration.

use core::time::Duration;

/// Default delay between two ticks, and before the first one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Timing knobs for the polling [`Scheduler`](crate::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavigatorConfig {
    /// Delay between the end of one tick and the start of the next.
    pub poll_interval: Duration,
    /// Delay between the document becoming ready and the first tick.
    pub initial_delay: Duration,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigatorConfig {
    /// Creates the default configuration: 200 ms for both delays.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_delay: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the delay between ticks.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the delay before the first tick.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }
}
