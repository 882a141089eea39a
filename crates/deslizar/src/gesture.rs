//! Single-gesture execution against the automation surface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::Point;
use crate::result::DeslizarResult;
use crate::surface::AutomationSurface;

/// Default press duration for taps, in milliseconds.
pub const DEFAULT_TAP_DURATION_MS: u32 = 500;

/// Default press duration for swipes, in milliseconds.
pub const DEFAULT_SWIPE_DURATION_MS: u32 = 1000;

/// A fully-resolved swipe: start point, end point, press duration.
///
/// Constructed fresh for every gesture; never cached between retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureSpec {
    /// Start point
    pub start: Point,
    /// End point
    pub end: Point,
    /// Press duration in milliseconds
    pub duration_ms: u32,
}

impl GestureSpec {
    /// Create a new gesture spec
    #[must_use]
    pub const fn new(start: Point, end: Point, duration_ms: u32) -> Self {
        Self {
            start,
            end,
            duration_ms,
        }
    }
}

/// Issues single taps and linear swipes.
///
/// Stateless and synchronous. The surface connection is assumed to be
/// established; errors the surface reports propagate unmodified, and once
/// a gesture is issued it runs to completion.
#[derive(Debug)]
pub struct GestureEngine<'a, S: AutomationSurface> {
    surface: &'a S,
}

impl<'a, S: AutomationSurface> GestureEngine<'a, S> {
    /// Create an engine over `surface`.
    #[must_use]
    pub const fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// Press and release at `point` for `duration_ms`.
    pub fn tap(&self, point: Point, duration_ms: u32) -> DeslizarResult<()> {
        debug!(%point, duration_ms, "tap");
        self.surface.perform_tap(point, duration_ms)
    }

    /// Drag linearly along `spec`.
    pub fn swipe(&self, spec: &GestureSpec) -> DeslizarResult<()> {
        debug!(start = %spec.start, end = %spec.end, duration_ms = spec.duration_ms, "swipe");
        self.surface.perform_swipe(spec.start, spec.end, spec.duration_ms)
    }
}
