//! High-level gesture facade over an automation surface.
//!
//! This is the entry point test authors use. Every method follows the same
//! shape: wait for the named element, re-read its geometry, compute clamped
//! coordinates, issue the gesture. No coordinate reaches the surface
//! without passing the boundary clamp.
//!
//! # Example
//!
//! ```ignore
//! let driver = GestureController::new(my_surface);
//! driver.tap(&Selector::id("login"), 10)?;
//! driver.swipe_until_visible(&Selector::id("feed"), &Selector::text("Load more"))?;
//! ```

use crate::gesture::{GestureEngine, GestureSpec, DEFAULT_SWIPE_DURATION_MS, DEFAULT_TAP_DURATION_MS};
use crate::geometry::{
    clamp_to_extent, horizontal_sweep_endpoints, vertical_swipe_endpoints, Point, SweepDirection,
    EDGE_MARGIN, FAR_EDGE_OFFSET,
};
use crate::poll::{PollOptions, VisibilityPoller};
use crate::result::DeslizarResult;
use crate::retry::{RetryOrchestrator, RetryPolicy};
use crate::selector::Selector;
use crate::surface::{AutomationSurface, ElementHandle};

/// Drives taps, swipes, and bounded swipe-until-visible runs against one
/// surface session.
///
/// The controller owns the surface handle but not the connection behind
/// it; opening and closing the session is the caller's concern.
#[derive(Debug)]
pub struct GestureController<S: AutomationSurface> {
    surface: S,
}

impl<S: AutomationSurface> GestureController<S> {
    /// Create a controller over an established surface session.
    #[must_use]
    pub const fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Borrow the underlying surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Give the surface back to the caller.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    // =========================================================================
    // TAPS
    // =========================================================================

    /// Wait for `selector` to become visible, then tap its center.
    ///
    /// Returns the element that was tapped. Elements are sometimes present
    /// but not clickable through their native click path; tapping by
    /// coordinates sidesteps that.
    pub fn tap(&self, selector: &Selector, wait_timeout_secs: u64) -> DeslizarResult<ElementHandle> {
        self.tap_with_offset(selector, 0, 0, wait_timeout_secs)
    }

    /// Wait for `selector`, then tap at its center shifted by the given
    /// offsets (either may be negative). Returns the element that anchored
    /// the coordinates.
    pub fn tap_with_offset(
        &self,
        selector: &Selector,
        offset_x: i32,
        offset_y: i32,
        wait_timeout_secs: u64,
    ) -> DeslizarResult<ElementHandle> {
        let options = PollOptions::new().with_timeout_secs(wait_timeout_secs);
        let handle = self.poller().wait_until_visible(selector, &options)?;
        self.tap_element_at_offset(&handle, offset_x, offset_y, DEFAULT_TAP_DURATION_MS)?;
        Ok(handle)
    }

    /// Tap an already-resolved element's center, pressing for `press_ms`.
    pub fn tap_element(&self, element: &ElementHandle, press_ms: u32) -> DeslizarResult<()> {
        self.tap_element_at_offset(element, 0, 0, press_ms)
    }

    fn tap_element_at_offset(
        &self,
        element: &ElementHandle,
        offset_x: i32,
        offset_y: i32,
        press_ms: u32,
    ) -> DeslizarResult<()> {
        // Geometry and screen are read fresh per tap; the element may have
        // moved since it was resolved.
        let center = self.surface.element_geometry(element)?.center();
        let screen = self.surface.screen_dimension()?;
        let point = Point::new(
            clamp_to_extent(center.x.saturating_add(offset_x), screen.width, EDGE_MARGIN),
            clamp_to_extent(center.y.saturating_add(offset_y), screen.height, EDGE_MARGIN),
        );
        GestureEngine::new(&self.surface).tap(point, press_ms)
    }

    // =========================================================================
    // VERTICAL SWIPES
    // =========================================================================

    /// Swipe up on `selector` as far as the boundary clamp allows.
    pub fn swipe_up(&self, selector: &Selector) -> DeslizarResult<()> {
        self.swipe_vertical(selector, -FAR_EDGE_OFFSET, DEFAULT_SWIPE_DURATION_MS)
    }

    /// Swipe down on `selector` as far as the boundary clamp allows.
    pub fn swipe_down(&self, selector: &Selector) -> DeslizarResult<()> {
        self.swipe_vertical(selector, FAR_EDGE_OFFSET, DEFAULT_SWIPE_DURATION_MS)
    }

    /// Swipe vertically on `selector`. Negative offsets swipe up, positive
    /// down; the end coordinate is clamped to the screen.
    pub fn swipe_vertical(
        &self,
        selector: &Selector,
        offset: i32,
        duration_ms: u32,
    ) -> DeslizarResult<()> {
        let handle = self
            .poller()
            .wait_until_visible(selector, &PollOptions::default())?;
        let geometry = self.surface.element_geometry(&handle)?;
        let screen = self.surface.screen_dimension()?;
        let (start, end) = vertical_swipe_endpoints(&geometry, screen, offset);
        GestureEngine::new(&self.surface).swipe(&GestureSpec::new(start, end, duration_ms))
    }

    // =========================================================================
    // SWIPE UNTIL VISIBLE
    // =========================================================================

    /// Swipe up on `swipe_selector` until `target_selector` becomes
    /// visible, with the default retry policy. Returns the target element.
    pub fn swipe_until_visible(
        &self,
        swipe_selector: &Selector,
        target_selector: &Selector,
    ) -> DeslizarResult<ElementHandle> {
        self.swipe_until_visible_with(
            swipe_selector,
            target_selector,
            -FAR_EDGE_OFFSET,
            &RetryPolicy::default(),
        )
    }

    /// Swipe down on `swipe_selector` until `target_selector` becomes
    /// visible, with the default retry policy.
    pub fn swipe_down_until_visible(
        &self,
        swipe_selector: &Selector,
        target_selector: &Selector,
    ) -> DeslizarResult<ElementHandle> {
        self.swipe_until_visible_with(
            swipe_selector,
            target_selector,
            FAR_EDGE_OFFSET,
            &RetryPolicy::default(),
        )
    }

    /// Fully-parameterized swipe-until-visible: explicit offset, attempt
    /// count, probe timeout, and press duration.
    pub fn swipe_until_visible_with(
        &self,
        swipe_selector: &Selector,
        target_selector: &Selector,
        offset: i32,
        policy: &RetryPolicy,
    ) -> DeslizarResult<ElementHandle> {
        RetryOrchestrator::new(&self.surface).swipe_until_visible(
            swipe_selector,
            target_selector,
            offset,
            policy,
        )
    }

    // =========================================================================
    // FULL SWEEPS
    // =========================================================================

    /// Wait for `selector`, then sweep left-to-right across the screen at
    /// its vertical midpoint.
    pub fn full_sweep_right(
        &self,
        selector: &Selector,
        press_ms: u32,
        wait_timeout_secs: u64,
    ) -> DeslizarResult<()> {
        let handle = self.wait_for_sweep_anchor(selector, wait_timeout_secs)?;
        self.full_sweep_right_element(&handle, press_ms)
    }

    /// Wait for `selector`, then sweep right-to-left across the screen at
    /// its vertical midpoint.
    pub fn full_sweep_left(
        &self,
        selector: &Selector,
        press_ms: u32,
        wait_timeout_secs: u64,
    ) -> DeslizarResult<()> {
        let handle = self.wait_for_sweep_anchor(selector, wait_timeout_secs)?;
        self.full_sweep_left_element(&handle, press_ms)
    }

    /// Left-to-right sweep anchored on an already-resolved element.
    pub fn full_sweep_right_element(
        &self,
        element: &ElementHandle,
        press_ms: u32,
    ) -> DeslizarResult<()> {
        self.full_sweep(element, SweepDirection::LeftToRight, press_ms)
    }

    /// Right-to-left sweep anchored on an already-resolved element.
    pub fn full_sweep_left_element(
        &self,
        element: &ElementHandle,
        press_ms: u32,
    ) -> DeslizarResult<()> {
        self.full_sweep(element, SweepDirection::RightToLeft, press_ms)
    }

    fn full_sweep(
        &self,
        element: &ElementHandle,
        direction: SweepDirection,
        press_ms: u32,
    ) -> DeslizarResult<()> {
        let geometry = self.surface.element_geometry(element)?;
        let screen = self.surface.screen_dimension()?;
        let (start, end) = horizontal_sweep_endpoints(&geometry, screen, direction);
        GestureEngine::new(&self.surface).swipe(&GestureSpec::new(start, end, press_ms))
    }

    fn wait_for_sweep_anchor(
        &self,
        selector: &Selector,
        wait_timeout_secs: u64,
    ) -> DeslizarResult<ElementHandle> {
        let options = PollOptions::new().with_timeout_secs(wait_timeout_secs);
        self.poller().wait_until_visible(selector, &options)
    }

    fn poller(&self) -> VisibilityPoller<'_, S> {
        VisibilityPoller::new(&self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dimension, ElementGeometry};
    use crate::result::DeslizarError;
    use crate::surface::{MockSurface, ScriptedElement};

    fn controller_with(
        elements: Vec<ScriptedElement>,
    ) -> GestureController<MockSurface> {
        let mut surface = MockSurface::new(Dimension::new(1000, 800));
        for element in elements {
            surface.add_element(element);
        }
        GestureController::new(surface)
    }

    fn button() -> ScriptedElement {
        ScriptedElement::new(
            Selector::id("button"),
            "el-btn",
            ElementGeometry::new(Point::new(10, 20), Dimension::new(100, 50)),
        )
    }

    mod tap_tests {
        use super::*;

        #[test]
        fn test_tap_lands_on_element_center() {
            let driver = controller_with(vec![button()]);
            let handle = driver.tap(&Selector::id("button"), 1).unwrap();
            assert_eq!(handle.id, "el-btn");
            assert!(driver.surface().was_called("tap:(60,45):500"));
        }

        #[test]
        fn test_tap_with_offset_shifts_and_clamps() {
            let driver = controller_with(vec![button()]);
            driver
                .tap_with_offset(&Selector::id("button"), 40, -5, 1)
                .unwrap();
            assert!(driver.surface().was_called("tap:(100,40):500"));
        }

        #[test]
        fn test_tap_near_edge_is_clamped_to_margin() {
            let edge = ScriptedElement::new(
                Selector::id("edge"),
                "el-edge",
                ElementGeometry::new(Point::new(-2, -4), Dimension::new(4, 4)),
            );
            let driver = controller_with(vec![edge]);
            driver.tap(&Selector::id("edge"), 1).unwrap();
            assert!(driver.surface().was_called("tap:(10,10):500"));
        }

        #[test]
        fn test_tap_element_uses_given_press_duration() {
            let driver = controller_with(vec![button()]);
            let handle = ElementHandle::new("el-btn");
            driver.tap_element(&handle, 250).unwrap();
            assert!(driver.surface().was_called("tap:(60,45):250"));
        }

        #[test]
        fn test_tap_empty_selector_fails_eagerly() {
            let driver = controller_with(vec![]);
            let err = driver.tap(&Selector::id(""), 1).unwrap_err();
            assert!(matches!(err, DeslizarError::InvalidArgument { .. }));
            assert!(driver.surface().history().is_empty());
        }
    }

    mod swipe_tests {
        use super::*;

        #[test]
        fn test_swipe_up_ends_at_top_margin() {
            let driver = controller_with(vec![button()]);
            driver.swipe_up(&Selector::id("button")).unwrap();
            assert!(driver.surface().was_called("swipe:(60,45)->(60,10):1000"));
        }

        #[test]
        fn test_swipe_down_ends_at_bottom_margin() {
            let driver = controller_with(vec![button()]);
            driver.swipe_down(&Selector::id("button")).unwrap();
            assert!(driver.surface().was_called("swipe:(60,45)->(60,790):1000"));
        }

        #[test]
        fn test_swipe_vertical_with_small_offset_is_not_clamped() {
            let driver = controller_with(vec![button()]);
            driver
                .swipe_vertical(&Selector::id("button"), 200, 750)
                .unwrap();
            assert!(driver.surface().was_called("swipe:(60,45)->(60,245):750"));
        }
    }

    mod sweep_tests {
        use super::*;

        #[test]
        fn test_full_sweep_right_uses_percent_bounds() {
            let driver = controller_with(vec![button()]);
            driver
                .full_sweep_right(&Selector::id("button"), 800, 1)
                .unwrap();
            assert!(driver.surface().was_called("swipe:(150,45)->(850,45):800"));
        }

        #[test]
        fn test_full_sweep_left_swaps_direction() {
            let driver = controller_with(vec![button()]);
            driver
                .full_sweep_left(&Selector::id("button"), 800, 1)
                .unwrap();
            assert!(driver.surface().was_called("swipe:(850,45)->(150,45):800"));
        }

        #[test]
        fn test_full_sweep_element_variant_skips_the_wait() {
            let driver = controller_with(vec![button()]);
            driver
                .full_sweep_right_element(&ElementHandle::new("el-btn"), 800)
                .unwrap();
            assert!(!driver.surface().was_called("is_match_visible"));
        }
    }

    mod retry_facade_tests {
        use super::*;
        use crate::geometry::FAR_EDGE_OFFSET;

        #[test]
        fn test_swipe_until_visible_returns_target() {
            let target = ScriptedElement::new(
                Selector::id("row"),
                "el-row",
                ElementGeometry::new(Point::new(0, 700), Dimension::new(100, 40)),
            )
            .visible_after_swipes(2);
            let driver = controller_with(vec![button(), target]);
            let handle = driver
                .swipe_until_visible_with(
                    &Selector::id("button"),
                    &Selector::id("row"),
                    -FAR_EDGE_OFFSET,
                    &RetryPolicy::new().with_per_attempt_timeout(10),
                )
                .unwrap();
            assert_eq!(handle.id, "el-row");
            assert_eq!(driver.surface().swipe_count(), 2);
        }
    }
}
