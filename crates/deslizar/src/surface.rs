//! The automation surface boundary.
//!
//! [`AutomationSurface`] is the capability interface this crate drives:
//! something that finds elements, reports geometry and visibility, and
//! executes taps and swipes on a device or browser. Real drivers live
//! outside this crate; [`MockSurface`] is the scripted in-process
//! implementation used by the unit tests.
//!
//! The surface connection is opened and owned by the caller's session
//! lifecycle. This crate never opens, closes, or pools it, and assumes at
//! most one in-flight gesture/poll cycle per session; serialization across
//! concurrent callers is the caller's responsibility.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};

use crate::geometry::{Dimension, ElementGeometry, Point};
use crate::result::{DeslizarError, DeslizarResult};
use crate::selector::Selector;

/// Handle to an element located on the surface.
///
/// The handle is a value: holding one does not pin the element, and its
/// geometry must be re-queried before use because elements move between
/// polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Surface-assigned element identifier
    pub id: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Capability interface over the external automation surface.
///
/// All methods are synchronous: one logical thread of control drives one
/// surface session, and polling suspends that thread between probes.
/// Errors returned by the surface propagate through this crate unmodified.
pub trait AutomationSurface {
    /// Locate an element, or report that nothing currently matches.
    fn find_element(&self, selector: &Selector) -> DeslizarResult<Option<ElementHandle>>;

    /// Read an element's current location and size. Always queried fresh;
    /// callers never reuse geometry across poll iterations.
    fn element_geometry(&self, element: &ElementHandle) -> DeslizarResult<ElementGeometry>;

    /// Current screen dimension. Queried per operation because the device
    /// orientation may change between calls.
    fn screen_dimension(&self) -> DeslizarResult<Dimension>;

    /// One-shot, non-blocking visibility predicate. The poller supplies
    /// the repetition.
    fn is_match_visible(&self, selector: &Selector) -> DeslizarResult<bool>;

    /// Issue a single-finger press-and-release at `point`.
    fn perform_tap(&self, point: Point, duration_ms: u32) -> DeslizarResult<()>;

    /// Issue a linear drag from `start` to `end`. The surface is
    /// responsible for interpolation.
    fn perform_swipe(&self, start: Point, end: Point, duration_ms: u32) -> DeslizarResult<()>;
}

// =============================================================================
// MOCK SURFACE
// =============================================================================

/// A scripted element registered on a [`MockSurface`].
#[derive(Debug, Clone)]
pub struct ScriptedElement {
    /// Selector this element answers to
    pub matches: Selector,
    /// Handle id reported for the element
    pub handle_id: String,
    /// Current geometry
    pub geometry: ElementGeometry,
    /// Whether `find_element` can resolve it
    pub resolvable: bool,
    /// Number of failing visibility probes before the predicate turns true
    pub visible_after_probes: u32,
    /// Number of swipes the surface must see before the predicate turns true
    pub visible_after_swipes: u32,
    probes_seen: u32,
}

impl ScriptedElement {
    /// Create an element that is immediately visible and resolvable.
    #[must_use]
    pub fn new(matches: Selector, handle_id: impl Into<String>, geometry: ElementGeometry) -> Self {
        Self {
            matches,
            handle_id: handle_id.into(),
            geometry,
            resolvable: true,
            visible_after_probes: 0,
            visible_after_swipes: 0,
            probes_seen: 0,
        }
    }

    /// Stay invisible for the first `probes` visibility probes.
    #[must_use]
    pub const fn visible_after_probes(mut self, probes: u32) -> Self {
        self.visible_after_probes = probes;
        self
    }

    /// Stay invisible until the surface has performed `swipes` swipes.
    #[must_use]
    pub const fn visible_after_swipes(mut self, swipes: u32) -> Self {
        self.visible_after_swipes = swipes;
        self
    }

    /// Never become visible, no matter how often it is probed.
    #[must_use]
    pub const fn never_visible(mut self) -> Self {
        self.visible_after_probes = u32::MAX;
        self
    }

    /// Make `find_element` miss while the predicate still reports true.
    #[must_use]
    pub const fn unresolvable(mut self) -> Self {
        self.resolvable = false;
        self
    }
}

/// Scripted surface for unit testing, in the spirit of a mock driver.
///
/// Records every call so tests can assert gesture counts and ordering.
/// Interior mutability keeps the [`AutomationSurface`] methods `&self`;
/// the mock is meant for single-threaded test use only.
#[derive(Debug)]
pub struct MockSurface {
    screen: Dimension,
    elements: RefCell<Vec<ScriptedElement>>,
    calls: RefCell<Vec<String>>,
    swipes: Cell<u32>,
    taps: Cell<u32>,
    gesture_error: RefCell<Option<String>>,
    visibility_error: RefCell<Option<String>>,
}

impl MockSurface {
    /// Create a mock surface with the given screen dimension.
    #[must_use]
    pub fn new(screen: Dimension) -> Self {
        Self {
            screen,
            elements: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            swipes: Cell::new(0),
            taps: Cell::new(0),
            gesture_error: RefCell::new(None),
            visibility_error: RefCell::new(None),
        }
    }

    /// Register a scripted element.
    pub fn add_element(&mut self, element: ScriptedElement) {
        self.elements.borrow_mut().push(element);
    }

    /// Make every subsequent tap and swipe fail with a surface error.
    pub fn fail_gestures(&mut self, message: impl Into<String>) {
        *self.gesture_error.borrow_mut() = Some(message.into());
    }

    /// Make every subsequent visibility probe fail with a surface error.
    pub fn fail_visibility(&mut self, message: impl Into<String>) {
        *self.visibility_error.borrow_mut() = Some(message.into());
    }

    /// Number of swipes performed so far.
    #[must_use]
    pub fn swipe_count(&self) -> u32 {
        self.swipes.get()
    }

    /// Number of taps performed so far.
    #[must_use]
    pub fn tap_count(&self) -> u32 {
        self.taps.get()
    }

    /// Number of visibility probes issued for `selector`.
    #[must_use]
    pub fn probe_count(&self, selector: &Selector) -> u32 {
        self.elements
            .borrow()
            .iter()
            .find(|e| &e.matches == selector)
            .map_or(0, |e| e.probes_seen)
    }

    /// Full call history, in order.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded call starts with `prefix`.
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl AutomationSurface for MockSurface {
    fn find_element(&self, selector: &Selector) -> DeslizarResult<Option<ElementHandle>> {
        self.record(format!("find_element:{selector}"));
        Ok(self
            .elements
            .borrow()
            .iter()
            .find(|e| &e.matches == selector && e.resolvable)
            .map(|e| ElementHandle::new(e.handle_id.clone())))
    }

    fn element_geometry(&self, element: &ElementHandle) -> DeslizarResult<ElementGeometry> {
        self.record(format!("element_geometry:{}", element.id));
        self.elements
            .borrow()
            .iter()
            .find(|e| e.handle_id == element.id)
            .map(|e| e.geometry)
            .ok_or_else(|| DeslizarError::Surface {
                message: format!("stale element reference: {}", element.id),
            })
    }

    fn screen_dimension(&self) -> DeslizarResult<Dimension> {
        self.record("screen_dimension".to_string());
        Ok(self.screen)
    }

    fn is_match_visible(&self, selector: &Selector) -> DeslizarResult<bool> {
        if let Some(message) = self.visibility_error.borrow().clone() {
            return Err(DeslizarError::Surface { message });
        }
        self.record(format!("is_match_visible:{selector}"));
        let mut elements = self.elements.borrow_mut();
        let Some(element) = elements.iter_mut().find(|e| &e.matches == selector) else {
            return Ok(false);
        };
        element.probes_seen = element.probes_seen.saturating_add(1);
        Ok(element.probes_seen > element.visible_after_probes
            && self.swipes.get() >= element.visible_after_swipes)
    }

    fn perform_tap(&self, point: Point, duration_ms: u32) -> DeslizarResult<()> {
        if let Some(message) = self.gesture_error.borrow().clone() {
            return Err(DeslizarError::Surface { message });
        }
        self.taps.set(self.taps.get() + 1);
        self.record(format!("tap:{point}:{duration_ms}"));
        Ok(())
    }

    fn perform_swipe(&self, start: Point, end: Point, duration_ms: u32) -> DeslizarResult<()> {
        if let Some(message) = self.gesture_error.borrow().clone() {
            return Err(DeslizarError::Surface { message });
        }
        self.swipes.set(self.swipes.get() + 1);
        self.record(format!("swipe:{start}->{end}:{duration_ms}"));
        Ok(())
    }
}
