//! Violation detectors: hard geometric errors and soft clearance warnings
//!
//! Detection is pure and order-stable: per-object checks run in input
//! order, pairwise checks in `(i, j < i)` discovery order, and the combined
//! report lists all errors before all warnings. Callers rely on that order
//! for reproducible resolution.

use crate::core::config::Clearances;
use crate::engine::geometry::Obb;
use crate::engine::layers::{layer_of, share_vertical_space};
use crate::scene::{Layer, ObjectKind, PlacedObject, Reason, Room, Severity, Violation, Wall};

/// Full violation report: hard errors followed by soft warnings
pub fn detect_collisions(
    room: &Room,
    objects: &[PlacedObject],
    clearances: &Clearances,
) -> Vec<Violation> {
    let mut out = detect_hard(room, objects, clearances);
    out.extend(detect_soft(room, objects, clearances));
    out
}

/// Geometrically invalid placements: bounds, wall alignment, overlaps
pub fn detect_hard(
    room: &Room,
    objects: &[PlacedObject],
    clearances: &Clearances,
) -> Vec<Violation> {
    let mut out = Vec::new();

    for o in objects {
        match o.wall {
            None => {
                // Conservative rotation-agnostic bounds check: the larger
                // footprint dimension is used as the margin on every side.
                // Over- and under-reports near edges for rotated objects;
                // kept for compatibility with existing layouts.
                let margin = o.w.max(o.d);
                if o.cx - margin < 0.0
                    || o.cx + margin > room.width
                    || o.cy - margin < 0.0
                    || o.cy + margin > room.depth
                {
                    out.push(Violation::single(o, Reason::OutOfBounds));
                }
            }
            Some(wall) => {
                let coord = if wall.pins_x() { o.cx } else { o.cy };
                if (coord - wall.line(room)).abs() > clearances.wall_gap_eps {
                    out.push(Violation::single(o, Reason::WallNotOn));
                }

                // The interior edge (center offset by half the protrusion
                // depth, toward the room) must stay inside.
                let half = o.d / 2.0;
                let interior = match wall {
                    Wall::W => o.cx + half,
                    Wall::E => o.cx - half,
                    Wall::N => o.cy + half,
                    Wall::S => o.cy - half,
                };
                let extent = if wall.pins_x() { room.width } else { room.depth };
                if interior < 0.0 || interior > extent {
                    out.push(Violation::single(o, Reason::OutOfBounds));
                }
            }
        }
    }

    for i in 0..objects.len() {
        for j in (i + 1)..objects.len() {
            let (a, b) = (&objects[i], &objects[j]);

            // Declared parent/child pairs never collide.
            if is_attached(a, b) {
                continue;
            }
            if !share_vertical_space(room, a, b) {
                continue;
            }
            // Items hung on different compass walls cannot touch.
            if layer_of(a) == Layer::Wall && a.wall != b.wall {
                continue;
            }
            // Chairs tuck under tables; that pairing is governed by the
            // soft clearance rules instead.
            if is_table_chair_pair(a, b) {
                continue;
            }

            if Obb::from_object(a).overlaps(&Obb::from_object(b)) {
                out.push(Violation::pair(a, b, Reason::Overlap));
            }
        }
    }

    out
}

/// Undesirable but legal placements: seating clearances and table aisles
///
/// These deliberately use axis-aligned distance approximations even for
/// rotated objects, to keep warning counts stable across callers.
pub fn detect_soft(
    room: &Room,
    objects: &[PlacedObject],
    clearances: &Clearances,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let chairs: Vec<&PlacedObject> = objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Chair)
        .collect();
    let tables: Vec<&PlacedObject> = objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Table)
        .collect();

    for c in &chairs {
        for t in &tables {
            // Chair center to axis-aligned table edge.
            let dx = ((c.cx - t.cx).abs() - t.w / 2.0).max(0.0);
            let dy = ((c.cy - t.cy).abs() - t.d / 2.0).max(0.0);
            if dx.hypot(dy) < clearances.chair_back_to_table {
                out.push(Violation::pair(c, t, Reason::ChairTooCloseToTable));
            }
        }
    }

    for i in 0..chairs.len() {
        for j in (i + 1)..chairs.len() {
            let (a, b) = (chairs[i], chairs[j]);
            if (a.cx - b.cx).hypot(a.cy - b.cy) < clearances.chair_to_chair {
                out.push(Violation::pair(a, b, Reason::ChairsTooClose));
            }
        }
    }

    for t in &tables {
        let nearest_wall = t
            .cx
            .min(room.width - t.cx)
            .min(t.cy)
            .min(room.depth - t.cy)
            - t.w.max(t.d) / 2.0;
        if nearest_wall < clearances.aisle_min {
            out.push(Violation::single(t, Reason::AisleViolation));
        }
    }

    out
}

pub fn count_errors(violations: &[Violation]) -> usize {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count()
}

pub fn count_warnings(violations: &[Violation]) -> usize {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .count()
}

fn is_attached(a: &PlacedObject, b: &PlacedObject) -> bool {
    a.attach_to.as_deref() == Some(b.id.as_str()) || b.attach_to.as_deref() == Some(a.id.as_str())
}

fn is_table_chair_pair(a: &PlacedObject, b: &PlacedObject) -> bool {
    matches!(
        (a.kind, b.kind),
        (ObjectKind::Table, ObjectKind::Chair) | (ObjectKind::Chair, ObjectKind::Table)
    )
}
