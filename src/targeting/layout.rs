//! Default destination layout: a ring split into one arc per faction.
//!
//! Shells with their own layout can ignore this and build
//! [`StageGeometry`] by hand. With two factions the first takes the right
//! half of the ring and the second the left half.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::catalog::Catalog;
use crate::core::{Anchor, LayoutConfig, Point, Rect, StageGeometry, StageLayout};

/// Anchors for every destination that has items, arranged on the ring.
///
/// Destinations are grouped by faction (in order of first appearance).
/// Each faction gets an equal arc starting at the top of the ring and
/// running clockwise; its destinations sit at `(i + 1) / (n + 1)` of the arc.
#[must_use]
pub fn ring_anchors(layout: &StageLayout, catalog: &Catalog) -> Vec<Anchor> {
    let factions = catalog.factions();
    if factions.is_empty() {
        return Vec::new();
    }
    let span = TAU / factions.len() as f64;

    let mut anchors = Vec::new();
    for (f, faction) in factions.iter().enumerate() {
        let members: Vec<_> = catalog
            .destinations()
            .iter()
            .filter(|d| catalog.faction_of(&d.id) == Some(faction))
            .collect();
        let start = -FRAC_PI_2 + f as f64 * span;
        let slots = members.len() as f64 + 1.0;

        for (i, destination) in members.into_iter().enumerate() {
            let angle = start + (i as f64 + 1.0) / slots * span;
            let position = Point::new(
                layout.center.x + layout.ring_radius * angle.cos(),
                layout.center.y + layout.ring_radius * angle.sin(),
            );
            anchors.push(Anchor::new(destination.id.clone(), position));
        }
    }

    anchors
}

/// Stage geometry for a stage element measured at `bounds`, using the
/// ring layout and the proportional snap tolerance.
#[must_use]
pub fn stage_geometry(bounds: Rect, config: &LayoutConfig, catalog: &Catalog) -> StageGeometry {
    let layout = StageLayout::from_size(bounds.width, bounds.height, config);
    StageGeometry::new(bounds, layout.snap_radius).with_anchors(ring_anchors(&layout, catalog))
}
