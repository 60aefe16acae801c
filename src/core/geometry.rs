//! Screen-space geometry supplied by the layout collaborator.
//!
//! The engine holds no persistent geometry. Every call that needs positions
//! receives a [`StageGeometry`]: the stage bounds in client coordinates,
//! the destination anchors in stage-local coordinates, and the snap
//! tolerance. [`StageLayout`] derives the stage centre and radius from the
//! stage size the same way the default renderer does.

use serde::{Deserialize, Serialize};

use super::config::LayoutConfig;
use super::id::DestinationId;

/// A point in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// This point translated by `-origin`.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// An axis-aligned rectangle (a DOM rect, in client coordinates).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Where a destination sits on the stage, in stage-local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub destination: DestinationId,
    pub position: Point,
}

impl Anchor {
    /// Create a new anchor.
    pub fn new(destination: impl Into<DestinationId>, position: Point) -> Self {
        Self {
            destination: destination.into(),
            position,
        }
    }
}

/// Per-call stage geometry.
///
/// ## Coordinate spaces
///
/// - `bounds` is the stage element's rect in client coordinates.
/// - `anchors` and everything the engine emits (pulses, offerings,
///   returning items) are stage-local: client point minus `bounds` origin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageGeometry {
    /// Stage rect in client coordinates.
    pub bounds: Rect,

    /// Destination anchors, stage-local.
    pub anchors: Vec<Anchor>,

    /// Drops strictly closer than this to an anchor snap onto it.
    pub snap_radius: f64,
}

impl StageGeometry {
    /// Create geometry with no anchors.
    #[must_use]
    pub fn new(bounds: Rect, snap_radius: f64) -> Self {
        Self {
            bounds,
            anchors: Vec::new(),
            snap_radius,
        }
    }

    /// Add an anchor (builder pattern).
    #[must_use]
    pub fn with_anchor(mut self, destination: impl Into<DestinationId>, position: Point) -> Self {
        self.anchors.push(Anchor::new(destination, position));
        self
    }

    /// Replace all anchors (builder pattern).
    #[must_use]
    pub fn with_anchors(mut self, anchors: impl IntoIterator<Item = Anchor>) -> Self {
        self.anchors = anchors.into_iter().collect();
        self
    }

    /// Convert a client-space point to stage-local coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        client.relative_to(self.bounds.origin())
    }

    /// Centre of a client-space rect, in stage-local coordinates.
    #[must_use]
    pub fn local_center_of(&self, rect: Rect) -> Point {
        self.to_local(rect.center())
    }

    /// Anchor position of a destination, if it is on the stage.
    #[must_use]
    pub fn anchor_of(&self, destination: &DestinationId) -> Option<Point> {
        self.anchors
            .iter()
            .find(|a| &a.destination == destination)
            .map(|a| a.position)
    }
}

/// Stage centre and radius derived from the stage size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageLayout {
    /// Stage centre, stage-local.
    pub center: Point,

    /// Radius of the circular play area.
    pub radius: f64,

    /// Radius of the destination ring.
    pub ring_radius: f64,

    /// Snap tolerance.
    pub snap_radius: f64,
}

impl StageLayout {
    /// Derive the layout for a stage of the given size.
    ///
    /// ```
    /// use offering_engine::core::{LayoutConfig, StageLayout};
    ///
    /// let layout = StageLayout::from_size(1000.0, 800.0, &LayoutConfig::default());
    /// assert_eq!(layout.center.x, 620.0);
    /// assert_eq!(layout.center.y, 400.0);
    /// assert_eq!(layout.radius, 360.0);
    /// ```
    #[must_use]
    pub fn from_size(width: f64, height: f64, config: &LayoutConfig) -> Self {
        let radius = width.min(height).max(0.0) * config.radius_ratio;
        Self {
            center: Point::new(width * config.center_x_ratio, height / 2.0),
            radius,
            ring_radius: radius * config.ring_ratio,
            snap_radius: radius * config.snap_ratio,
        }
    }
}
