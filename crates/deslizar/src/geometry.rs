//! Coordinate computation for synthesized gestures.
//!
//! Two concerns live here: the boundary clamp that keeps every emitted
//! coordinate a safety margin away from the device edges, and the resolver
//! that turns an element's on-screen geometry into gesture endpoints.
//! Both are pure; nothing in this module talks to the surface.

use serde::{Deserialize, Serialize};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Safety margin kept from every screen edge, in pixels. Surfaces often
/// reject input landing exactly on a device edge.
pub const EDGE_MARGIN: i32 = 10;

/// Offset magnitude that means "swipe to the far edge"; the clamp turns it
/// into the nearest legal coordinate.
pub const FAR_EDGE_OFFSET: i32 = 9_999_999;

/// Horizontal full sweeps start this far across the screen, in percent.
pub const SWEEP_NEAR_PERCENT: u32 = 15;

/// Horizontal full sweeps end this far across the screen, in percent.
/// The 15/85 bounds keep sweeps clear of edge-adjacent UI chrome.
pub const SWEEP_FAR_PERCENT: u32 = 85;

// =============================================================================
// DATA TYPES
// =============================================================================

/// An integer coordinate in device pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A width/height pair, used for both screens and elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimension {
    /// Create a new dimension
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An element's on-screen geometry: top-left corner plus size.
///
/// Geometry is transient. It is re-read from the surface immediately before
/// every gesture computation, because elements move between polls; nothing
/// in this crate caches it across retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementGeometry {
    /// Top-left corner
    pub location: Point,
    /// Element size
    pub size: Dimension,
}

impl ElementGeometry {
    /// Create a new geometry
    #[must_use]
    pub const fn new(location: Point, size: Dimension) -> Self {
        Self { location, size }
    }

    /// Center point, computed with floor integer division.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(
            self.location.x + self.size.width as i32 / 2,
            self.location.y + self.size.height as i32 / 2,
        )
    }
}

/// Which way a horizontal full sweep travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    /// Sweep from the near (15%) bound to the far (85%) bound
    LeftToRight,
    /// Sweep from the far (85%) bound to the near (15%) bound
    RightToLeft,
}

// =============================================================================
// BOUNDARY CLAMP
// =============================================================================

/// Clamp `position` into `[margin, extent - margin]`.
///
/// Pure and total: out-of-range input is pulled to the nearest legal
/// coordinate, in-range input passes through unchanged.
#[must_use]
pub const fn clamp_to_extent(position: i32, extent: u32, margin: i32) -> i32 {
    let far = extent as i32 - margin;
    if position < margin {
        margin
    } else if position > far {
        far
    } else {
        position
    }
}

// =============================================================================
// GEOMETRY RESOLVER
// =============================================================================

/// Endpoints for a vertical swipe starting at the element's center.
///
/// The end coordinate is the center shifted by `offset` (positive is down),
/// clamped to the screen. Passing `FAR_EDGE_OFFSET` (or its negation) means
/// "swipe as far as the clamp allows".
#[must_use]
pub fn vertical_swipe_endpoints(
    geometry: &ElementGeometry,
    screen: Dimension,
    offset: i32,
) -> (Point, Point) {
    let center = geometry.center();
    let x = clamp_to_extent(center.x, screen.width, EDGE_MARGIN);
    let start_y = clamp_to_extent(center.y, screen.height, EDGE_MARGIN);
    let end_y = clamp_to_extent(
        center.y.saturating_add(offset),
        screen.height,
        EDGE_MARGIN,
    );
    (Point::new(x, start_y), Point::new(x, end_y))
}

/// Endpoints for an edge-to-edge horizontal sweep at the element's vertical
/// midpoint.
///
/// The sweep runs between 15% and 85% of the screen width regardless of the
/// element's own horizontal extent; `direction` selects which bound is the
/// start.
#[must_use]
pub fn horizontal_sweep_endpoints(
    geometry: &ElementGeometry,
    screen: Dimension,
    direction: SweepDirection,
) -> (Point, Point) {
    let near = clamp_to_extent(
        (screen.width * SWEEP_NEAR_PERCENT / 100) as i32,
        screen.width,
        EDGE_MARGIN,
    );
    let far = clamp_to_extent(
        (screen.width * SWEEP_FAR_PERCENT / 100) as i32,
        screen.width,
        EDGE_MARGIN,
    );
    let y = clamp_to_extent(geometry.center().y, screen.height, EDGE_MARGIN);
    match direction {
        SweepDirection::LeftToRight => (Point::new(near, y), Point::new(far, y)),
        SweepDirection::RightToLeft => (Point::new(far, y), Point::new(near, y)),
    }
}
