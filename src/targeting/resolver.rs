//! Drop resolution: nearest anchor within a snap tolerance.
//!
//! Matching against the nearest anchor rather than hit-testing shapes keeps
//! the rule independent of how large each destination is drawn.

use serde::{Deserialize, Serialize};

use crate::core::{Anchor, DestinationId, Point};

/// A drop that snapped onto a destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// The destination the drop snapped to.
    pub destination: DestinationId,
    /// That destination's anchor.
    pub anchor: Point,
    /// Distance from the drop point to the anchor.
    pub distance: f64,
}

/// Nearest anchor to `point`, ignoring the tolerance.
///
/// Ties go to the earlier anchor. Returns `None` if `anchors` is empty.
#[must_use]
pub fn nearest_anchor(point: Point, anchors: &[Anchor]) -> Option<(&Anchor, f64)> {
    let mut best: Option<(&Anchor, f64)> = None;

    for anchor in anchors {
        let distance = point.distance_to(anchor.position);
        match best {
            Some((_, min)) if distance >= min => {}
            _ if distance.is_nan() => {}
            _ => best = Some((anchor, distance)),
        }
    }

    best
}

/// Resolve a drop point to a destination.
///
/// The nearest anchor wins, but only if it is strictly closer than
/// `snap_radius`. A drop exactly on the boundary does not resolve.
///
/// ```
/// use offering_engine::core::{Anchor, Point};
/// use offering_engine::targeting::resolve_drop;
///
/// let anchors = vec![
///     Anchor::new("clan_kie", Point::new(0.0, 0.0)),
///     Anchor::new("clan_paiwoe", Point::new(100.0, 0.0)),
/// ];
///
/// let hit = resolve_drop(Point::new(90.0, 5.0), &anchors, 20.0).unwrap();
/// assert_eq!(hit.destination.as_str(), "clan_paiwoe");
///
/// assert!(resolve_drop(Point::new(50.0, 0.0), &anchors, 20.0).is_none());
/// ```
#[must_use]
pub fn resolve_drop(point: Point, anchors: &[Anchor], snap_radius: f64) -> Option<Resolution> {
    let (anchor, distance) = nearest_anchor(point, anchors)?;

    (distance < snap_radius).then(|| Resolution {
        destination: anchor.destination.clone(),
        anchor: anchor.position,
        distance,
    })
}
