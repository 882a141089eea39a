//! Bounded visibility polling.
//!
//! A wait is a bounded sequence of one-shot visibility probes. The deadline
//! is hard wall-clock time measured from the call's start: when it expires
//! the loop stops issuing further probes rather than finishing a cadence.
//! At least one probe is always issued, and the sleep between probes is
//! capped at the remaining budget so the deadline is honored without a
//! trailing full-interval sleep.

use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::result::{DeslizarError, DeslizarResult};
use crate::selector::Selector;
use crate::surface::{AutomationSurface, ElementHandle};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for one-shot waits (30 seconds)
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 30_000;

/// Default polling cadence (250ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

// =============================================================================
// POLL OPTIONS
// =============================================================================

/// Options for a bounded poll
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl PollOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set timeout in whole seconds
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_ms = timeout_secs * 1000;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// POLL OUTCOME
// =============================================================================

/// Result of one bounded poll: the located element, or a timeout signal.
/// There is no partial or intermediate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The predicate became true; the resolved element.
    Found(ElementHandle),
    /// The deadline elapsed without the predicate holding.
    TimedOut {
        /// Wall-clock time spent polling
        waited: Duration,
    },
}

// =============================================================================
// VISIBILITY POLLER
// =============================================================================

/// Repeats the surface's one-shot visibility predicate until it holds or a
/// deadline elapses.
///
/// The throwing ([`wait_until_visible`](Self::wait_until_visible)) and
/// non-throwing ([`is_visible_within`](Self::is_visible_within)) variants
/// share the same loop; the split lets a retry orchestrator treat "not yet
/// visible" as expected-and-retriable while a top-level wait still fails
/// loudly.
#[derive(Debug)]
pub struct VisibilityPoller<'a, S: AutomationSurface> {
    surface: &'a S,
}

impl<'a, S: AutomationSurface> VisibilityPoller<'a, S> {
    /// Create a poller over `surface`.
    #[must_use]
    pub const fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// Run one bounded poll for `selector`.
    ///
    /// Resolves the element once the predicate holds; a predicate that
    /// holds but no longer resolves is an [`DeslizarError::ElementVanished`].
    pub fn poll(&self, selector: &Selector, options: &PollOptions) -> DeslizarResult<PollOutcome> {
        selector.validate()?;
        debug!(selector = %selector, timeout_ms = options.timeout_ms, "polling for visibility");
        match self.probe_until_deadline(selector, options)? {
            Some(elapsed) => match self.surface.find_element(selector)? {
                Some(handle) => {
                    debug!(selector = %selector, ?elapsed, "element visible");
                    Ok(PollOutcome::Found(handle))
                }
                None => Err(DeslizarError::ElementVanished {
                    selector: selector.to_string(),
                }),
            },
            None => {
                debug!(selector = %selector, timeout_ms = options.timeout_ms, "poll timed out");
                Ok(PollOutcome::TimedOut {
                    waited: options.timeout(),
                })
            }
        }
    }

    /// Block until `selector` is visible, failing with
    /// [`DeslizarError::Timeout`] when the deadline elapses first.
    pub fn wait_until_visible(
        &self,
        selector: &Selector,
        options: &PollOptions,
    ) -> DeslizarResult<ElementHandle> {
        match self.poll(selector, options)? {
            PollOutcome::Found(handle) => Ok(handle),
            PollOutcome::TimedOut { .. } => Err(DeslizarError::Timeout {
                selector: selector.to_string(),
                waited_ms: options.timeout_ms,
            }),
        }
    }

    /// Same polling loop, boolean outcome. "Not visible in time" is not an
    /// error here; surface errors still propagate.
    pub fn is_visible_within(
        &self,
        selector: &Selector,
        options: &PollOptions,
    ) -> DeslizarResult<bool> {
        selector.validate()?;
        Ok(self.probe_until_deadline(selector, options)?.is_some())
    }

    /// Probe at the configured cadence until the predicate holds
    /// (`Some(elapsed)`) or the deadline expires (`None`).
    fn probe_until_deadline(
        &self,
        selector: &Selector,
        options: &PollOptions,
    ) -> DeslizarResult<Option<Duration>> {
        let start = Instant::now();
        let timeout = options.timeout();
        let interval = options.poll_interval();
        loop {
            trace!(selector = %selector, "visibility probe");
            if self.surface.is_match_visible(selector)? {
                return Ok(Some(start.elapsed()));
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Ok(None);
            }
            std::thread::sleep(interval.min(timeout - elapsed));
        }
    }
}
