//! Cancellable polling loop.
//!
//! Each tick schedules the next one only after it has returned, so ticks never
//! overlap. A failing tick is handed to an [`ErrorReporter`] and polling goes on.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;
use core::time::Duration;

use crate::host::{Host, ReadySignal, Timer};
use crate::{NavError, Navigator, NavigatorConfig};

/// Receives errors raised by ticks that ran on the scheduler.
pub trait ErrorReporter {
    /// Reports `error`. Must not panic.
    fn report(&self, error: &NavError);
}

impl<F: Fn(&NavError)> ErrorReporter for F {
    fn report(&self, error: &NavError) {
        self(error);
    }
}

/// Reports errors through `tracing::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &NavError) {
        tracing::error!(error = %error, event = error.event(), "fragment navigation tick failed");
    }
}

#[derive(Debug, Default)]
struct PollStatus {
    stopped: Cell<bool>,
    ticks: Cell<u64>,
}

/// Controls one running polling chain.
#[derive(Debug, Clone)]
pub struct PollHandle {
    status: Rc<PollStatus>,
}

impl PollHandle {
    /// Stops the chain. The pending timer still fires but runs no tick.
    pub fn stop(&self) {
        self.status.stopped.set(true);
    }

    /// Returns `true` until [`stop`](Self::stop) is called or scheduling fails.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.status.stopped.get()
    }

    /// Number of ticks run so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.status.ticks.get()
    }
}

/// Starts polling chains that drive a [`Navigator`].
pub struct Scheduler<T> {
    timer: Rc<T>,
    config: NavigatorConfig,
    reporter: Rc<dyn ErrorReporter>,
}

impl<T: fmt::Debug> fmt::Debug for Scheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("timer", &self.timer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Timer + 'static> Scheduler<T> {
    /// Creates a scheduler with the default configuration and [`TracingReporter`].
    #[must_use]
    pub fn new(timer: T) -> Self {
        Self {
            timer: Rc::new(timer),
            config: NavigatorConfig::default(),
            reporter: Rc::new(TracingReporter),
        }
    }

    /// Replaces the timing configuration.
    #[must_use]
    pub const fn with_config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the error reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Rc::new(reporter);
        self
    }

    /// The timer used to schedule ticks.
    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Starts polling `navigator` once `ready` fires.
    ///
    /// Every call starts an independent chain.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Host`] if the ready callback cannot be registered.
    pub fn start<H, R>(&self, navigator: Rc<Navigator<H>>, ready: &R) -> Result<PollHandle, NavError>
    where
        H: Host + 'static,
        R: ReadySignal + ?Sized,
    {
        let status = Rc::new(PollStatus::default());
        let poll = Rc::new(PollLoop {
            navigator,
            timer: Rc::clone(&self.timer),
            reporter: Rc::clone(&self.reporter),
            interval: self.config.poll_interval,
            status: Rc::clone(&status),
        });

        let initial_delay = self.config.initial_delay;
        ready.on_ready(Box::new(move || {
            tracing::debug!("document ready, starting fragment polling");
            poll.arm(initial_delay);
        }))?;

        Ok(PollHandle { status })
    }
}

struct PollLoop<H: Host, T> {
    navigator: Rc<Navigator<H>>,
    timer: Rc<T>,
    reporter: Rc<dyn ErrorReporter>,
    interval: Duration,
    status: Rc<PollStatus>,
}

impl<H: Host + 'static, T: Timer + 'static> PollLoop<H, T> {
    fn arm(self: Rc<Self>, delay: Duration) {
        if self.status.stopped.get() {
            return;
        }

        let next = Rc::clone(&self);
        if let Err(error) = self.timer.set_timeout(delay, Box::new(move || next.run())) {
            self.reporter.report(&error);
            self.status.stopped.set(true);
        }
    }

    fn run(self: Rc<Self>) {
        if self.status.stopped.get() {
            return;
        }

        self.status.ticks.set(self.status.ticks.get() + 1);
        match self.navigator.check_uri() {
            Ok(tick) => tracing::trace!(?tick, "fragment tick"),
            Err(error) => self.reporter.report(&error),
        }

        let interval = self.interval;
        self.arm(interval);
    }
}
