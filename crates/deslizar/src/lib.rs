//! Deslizar: bounded wait/retry gesture engine for asynchronously-rendering
//! UI surfaces.
//!
//! Deslizar (Spanish: "to slide/swipe") lets a caller express intent —
//! "tap this element", "swipe until that element appears" — against a
//! mobile screen or browser viewport where elements appear, move, or become
//! interactable only after unpredictable delays, without hand-coding
//! polling loops, coordinate math, or retry bounds.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         DESLIZAR                                 │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   GestureController (facade)                                     │
//! │        │                                                         │
//! │        ├── RetryOrchestrator ── gesture + short-poll, bounded    │
//! │        ├── VisibilityPoller ─── deadline-bounded predicate loop  │
//! │        ├── GestureEngine ────── single tap / linear swipe        │
//! │        └── geometry ─────────── center math + boundary clamp     │
//! │                │                                                 │
//! │                ▼                                                 │
//! │   AutomationSurface (trait) ── device / browser driver, external │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The automation surface — the thing that actually finds elements and
//! executes input — is an external collaborator behind the
//! [`AutomationSurface`] trait. This crate never opens or manages that
//! connection and never interprets selector syntax or visibility
//! semantics; it supplies the waiting, clamping, and retry discipline on
//! top.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod controller;
mod gesture;
/// Coordinate computation: boundary clamp and gesture endpoint resolution.
pub mod geometry;
mod poll;
mod result;
mod retry;
mod selector;
/// The automation surface boundary and the scripted mock implementation.
pub mod surface;

pub use controller::GestureController;
pub use gesture::{
    GestureEngine, GestureSpec, DEFAULT_SWIPE_DURATION_MS, DEFAULT_TAP_DURATION_MS,
};
pub use geometry::{
    clamp_to_extent, horizontal_sweep_endpoints, vertical_swipe_endpoints, Dimension,
    ElementGeometry, Point, SweepDirection, EDGE_MARGIN, FAR_EDGE_OFFSET, SWEEP_FAR_PERCENT,
    SWEEP_NEAR_PERCENT,
};
pub use poll::{
    PollOptions, PollOutcome, VisibilityPoller, DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_TIMEOUT_MS,
};
pub use result::{DeslizarError, DeslizarResult};
pub use retry::{RetryOrchestrator, RetryPolicy, DEFAULT_ATTEMPTS, DEFAULT_PROBE_TIMEOUT_MS};
pub use selector::Selector;
pub use surface::{AutomationSurface, ElementHandle, MockSurface, ScriptedElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        AutomationSurface, DeslizarError, DeslizarResult, ElementHandle, GestureController,
        PollOptions, RetryPolicy, Selector,
    };
}
