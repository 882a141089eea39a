//! Result and error types for Deslizar.

use thiserror::Error;

/// Result type for Deslizar operations
pub type DeslizarResult<T> = Result<T, DeslizarError>;

/// Errors that can occur while driving an automation surface.
///
/// Every public operation either fully succeeds or fails with exactly one
/// of these kinds; there is no partial-success reporting.
#[derive(Debug, Error)]
pub enum DeslizarError {
    /// A required argument was missing or out of range. Detected eagerly,
    /// before any surface interaction, and never retried.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// A one-shot wait exceeded its deadline without the visibility
    /// predicate becoming true.
    #[error("timed out after {waited_ms}ms waiting for {selector}")]
    Timeout {
        /// Selector that never became visible
        selector: String,
        /// Configured wait bound in milliseconds
        waited_ms: u64,
    },

    /// All configured swipe attempts were performed without the target
    /// becoming visible. Terminal; nothing is retried beyond the
    /// configured attempt count.
    #[error("swiped {attempts} times with an offset of {offset} but {selector} never became visible")]
    ExhaustedRetries {
        /// Number of gestures issued
        attempts: u32,
        /// Vertical swipe offset that was applied
        offset: i32,
        /// Target selector that never appeared
        selector: String,
    },

    /// The visibility predicate was satisfied but the follow-up element
    /// resolve came back empty. UI churn between the probe and the
    /// resolve can race like this.
    #[error("{selector} matched the visibility predicate but vanished before it could be resolved")]
    ElementVanished {
        /// Selector that vanished
        selector: String,
    },

    /// An error reported by the automation surface itself (disconnected
    /// session, stale element reference, ...). Propagated unchanged,
    /// never interpreted or retried.
    #[error("automation surface error: {message}")]
    Surface {
        /// Error message from the surface
        message: String,
    },
}
