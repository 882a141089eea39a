//! Bounded swipe-until-visible retries.
//!
//! One attempt is one gesture plus one short-timeout visibility probe.
//! A run either returns the now-visible target or fails with
//! [`DeslizarError::ExhaustedRetries`] after the configured attempt count;
//! there is no partial or paused state, and no attempt's gesture is undone.

use tracing::debug;

use crate::gesture::{GestureEngine, GestureSpec, DEFAULT_SWIPE_DURATION_MS};
use crate::geometry::vertical_swipe_endpoints;
use crate::poll::{PollOptions, VisibilityPoller};
use crate::result::{DeslizarError, DeslizarResult};
use crate::selector::Selector;
use crate::surface::{AutomationSurface, ElementHandle};

/// Default number of swipe attempts before giving up.
pub const DEFAULT_ATTEMPTS: u32 = 5;

/// Default per-attempt visibility probe timeout (3 seconds).
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3_000;

/// Configuration for one retry run. Not mutated while the run executes.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of gestures to issue
    pub attempts: u32,
    /// Visibility probe timeout per attempt, in milliseconds
    pub per_attempt_timeout_ms: u64,
    /// Press duration for each swipe, in milliseconds
    pub press_duration_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            per_attempt_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            press_duration_ms: DEFAULT_SWIPE_DURATION_MS,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt count
    #[must_use]
    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Set the per-attempt probe timeout in milliseconds
    #[must_use]
    pub const fn with_per_attempt_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_attempt_timeout_ms = timeout_ms;
        self
    }

    /// Set the swipe press duration in milliseconds
    #[must_use]
    pub const fn with_press_duration(mut self, duration_ms: u32) -> Self {
        self.press_duration_ms = duration_ms;
        self
    }

    /// Reject unusable policies before any surface interaction.
    pub fn validate(&self) -> DeslizarResult<()> {
        if self.attempts == 0 {
            return Err(DeslizarError::InvalidArgument {
                message: "attempt count must be at least 1".to_string(),
            });
        }
        if self.per_attempt_timeout_ms == 0 {
            return Err(DeslizarError::InvalidArgument {
                message: "per-attempt timeout must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Composes the gesture engine and the visibility poller into a bounded
/// swipe-until-visible loop.
#[derive(Debug)]
pub struct RetryOrchestrator<'a, S: AutomationSurface> {
    surface: &'a S,
}

impl<'a, S: AutomationSurface> RetryOrchestrator<'a, S> {
    /// Create an orchestrator over `surface`.
    #[must_use]
    pub const fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// Swipe on `swipe_selector` until `target_selector` becomes visible.
    ///
    /// The swipe endpoints are computed once, outside the loop: the swipe
    /// origin does not depend on the not-yet-visible target, so
    /// re-resolving each iteration buys nothing. The gesture always
    /// precedes the first probe, so the best case issues exactly one
    /// gesture and the worst case exactly `attempts`.
    pub fn swipe_until_visible(
        &self,
        swipe_selector: &Selector,
        target_selector: &Selector,
        offset: i32,
        policy: &RetryPolicy,
    ) -> DeslizarResult<ElementHandle> {
        swipe_selector.validate()?;
        target_selector.validate()?;
        policy.validate()?;

        let poller = VisibilityPoller::new(self.surface);
        let probe_options = PollOptions::new().with_timeout(policy.per_attempt_timeout_ms);
        let source = poller.wait_until_visible(swipe_selector, &probe_options)?;

        // Geometry and screen are read fresh here, right before endpoint
        // computation; nothing from an earlier poll is reused.
        let geometry = self.surface.element_geometry(&source)?;
        let screen = self.surface.screen_dimension()?;
        let (start, end) = vertical_swipe_endpoints(&geometry, screen, offset);
        let spec = GestureSpec::new(start, end, policy.press_duration_ms);
        let engine = GestureEngine::new(self.surface);

        for attempt in 1..=policy.attempts {
            debug!(attempt, attempts = policy.attempts, target = %target_selector, "swipe attempt");
            engine.swipe(&spec)?;
            if poller.is_visible_within(target_selector, &probe_options)? {
                return match self.surface.find_element(target_selector)? {
                    Some(handle) => Ok(handle),
                    None => Err(DeslizarError::ElementVanished {
                        selector: target_selector.to_string(),
                    }),
                };
            }
        }

        Err(DeslizarError::ExhaustedRetries {
            attempts: policy.attempts,
            offset,
            selector: target_selector.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dimension, ElementGeometry, Point, FAR_EDGE_OFFSET};
    use crate::surface::{MockSurface, ScriptedElement};

    fn list_geometry() -> ElementGeometry {
        ElementGeometry::new(Point::new(10, 20), Dimension::new(100, 50))
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new()
            .with_attempts(5)
            .with_per_attempt_timeout(10)
            .with_press_duration(1000)
    }

    fn surface_with_list() -> MockSurface {
        let mut surface = MockSurface::new(Dimension::new(1000, 800));
        surface.add_element(ScriptedElement::new(
            Selector::id("list"),
            "el-list",
            list_geometry(),
        ));
        surface
    }

    mod policy_tests {
        use super::*;

        #[test]
        fn test_default_policy_matches_documented_defaults() {
            let policy = RetryPolicy::default();
            assert_eq!(policy.attempts, 5);
            assert_eq!(policy.per_attempt_timeout_ms, 3_000);
            assert_eq!(policy.press_duration_ms, 1000);
        }

        #[test]
        fn test_zero_attempts_is_invalid() {
            let err = RetryPolicy::new().with_attempts(0).validate().unwrap_err();
            assert!(matches!(err, DeslizarError::InvalidArgument { .. }));
        }

        #[test]
        fn test_zero_probe_timeout_is_invalid() {
            let err = RetryPolicy::new()
                .with_per_attempt_timeout(0)
                .validate()
                .unwrap_err();
            assert!(matches!(err, DeslizarError::InvalidArgument { .. }));
        }
    }

    mod orchestration_tests {
        use super::*;

        #[test]
        fn test_exhaustion_is_deterministic() {
            let mut surface = surface_with_list();
            surface.add_element(
                ScriptedElement::new(Selector::id("row-99"), "el-99", list_geometry())
                    .never_visible(),
            );
            let orchestrator = RetryOrchestrator::new(&surface);
            let err = orchestrator
                .swipe_until_visible(
                    &Selector::id("list"),
                    &Selector::id("row-99"),
                    -FAR_EDGE_OFFSET,
                    &fast_policy(),
                )
                .unwrap_err();
            match err {
                DeslizarError::ExhaustedRetries {
                    attempts,
                    offset,
                    selector,
                } => {
                    assert_eq!(attempts, 5);
                    assert_eq!(offset, -FAR_EDGE_OFFSET);
                    assert_eq!(selector, "id=row-99");
                }
                other => panic!("expected ExhaustedRetries, never Timeout; got {other:?}"),
            }
            assert_eq!(surface.swipe_count(), 5);
        }

        #[test]
        fn test_target_visible_after_third_swipe_stops_at_three_gestures() {
            let mut surface = surface_with_list();
            surface.add_element(
                ScriptedElement::new(Selector::id("row-7"), "el-7", list_geometry())
                    .visible_after_swipes(3),
            );
            let orchestrator = RetryOrchestrator::new(&surface);
            let handle = orchestrator
                .swipe_until_visible(
                    &Selector::id("list"),
                    &Selector::id("row-7"),
                    -FAR_EDGE_OFFSET,
                    &fast_policy(),
                )
                .unwrap();
            assert_eq!(handle.id, "el-7");
            assert_eq!(surface.swipe_count(), 3);
        }

        #[test]
        fn test_already_visible_target_still_gets_one_gesture() {
            let mut surface = surface_with_list();
            surface.add_element(ScriptedElement::new(
                Selector::id("row-1"),
                "el-1",
                list_geometry(),
            ));
            let orchestrator = RetryOrchestrator::new(&surface);
            orchestrator
                .swipe_until_visible(
                    &Selector::id("list"),
                    &Selector::id("row-1"),
                    -FAR_EDGE_OFFSET,
                    &fast_policy(),
                )
                .unwrap();
            // the gesture precedes the first probe: one swipe, never zero
            assert_eq!(surface.swipe_count(), 1);
        }

        #[test]
        fn test_endpoints_computed_once_outside_loop() {
            let mut surface = surface_with_list();
            surface.add_element(
                ScriptedElement::new(Selector::id("row-9"), "el-9", list_geometry())
                    .never_visible(),
            );
            let orchestrator = RetryOrchestrator::new(&surface);
            let _ = orchestrator.swipe_until_visible(
                &Selector::id("list"),
                &Selector::id("row-9"),
                -FAR_EDGE_OFFSET,
                &fast_policy(),
            );
            let geometry_reads = surface
                .history()
                .iter()
                .filter(|c| c.starts_with("element_geometry"))
                .count();
            assert_eq!(geometry_reads, 1);
        }

        #[test]
        fn test_swipe_endpoints_are_clamped() {
            let mut surface = surface_with_list();
            surface.add_element(
                ScriptedElement::new(Selector::id("row-9"), "el-9", list_geometry())
                    .never_visible(),
            );
            let orchestrator = RetryOrchestrator::new(&surface);
            let _ = orchestrator.swipe_until_visible(
                &Selector::id("list"),
                &Selector::id("row-9"),
                -FAR_EDGE_OFFSET,
                &fast_policy(),
            );
            // element center (60,45), swiped to the clamped top edge
            assert!(surface.was_called("swipe:(60,45)->(60,10):1000"));
        }

        #[test]
        fn test_surface_gesture_error_aborts_run() {
            let mut surface = surface_with_list();
            surface.add_element(
                ScriptedElement::new(Selector::id("row-9"), "el-9", list_geometry())
                    .never_visible(),
            );
            surface.fail_gestures("stale session");
            let orchestrator = RetryOrchestrator::new(&surface);
            let err = orchestrator
                .swipe_until_visible(
                    &Selector::id("list"),
                    &Selector::id("row-9"),
                    -FAR_EDGE_OFFSET,
                    &fast_policy(),
                )
                .unwrap_err();
            assert!(matches!(err, DeslizarError::Surface { .. }));
            assert_eq!(surface.swipe_count(), 0);
        }

        #[test]
        fn test_invalid_policy_rejected_before_any_surface_call() {
            let surface = surface_with_list();
            let orchestrator = RetryOrchestrator::new(&surface);
            let err = orchestrator
                .swipe_until_visible(
                    &Selector::id("list"),
                    &Selector::id("row-1"),
                    -FAR_EDGE_OFFSET,
                    &RetryPolicy::new().with_attempts(0),
                )
                .unwrap_err();
            assert!(matches!(err, DeslizarError::InvalidArgument { .. }));
            assert!(surface.history().is_empty());
        }

        #[test]
        fn test_missing_swipe_source_fails_with_timeout() {
            let surface = MockSurface::new(Dimension::new(1000, 800));
            let orchestrator = RetryOrchestrator::new(&surface);
            let err = orchestrator
                .swipe_until_visible(
                    &Selector::id("list"),
                    &Selector::id("row-1"),
                    -FAR_EDGE_OFFSET,
                    &fast_policy(),
                )
                .unwrap_err();
            assert!(matches!(err, DeslizarError::Timeout { .. }));
            assert_eq!(surface.swipe_count(), 0);
        }
    }
}
