//! The make-valid loop
//!
//! Repeatedly resolves hard violations, redistributes chairs around the
//! largest table, evenly spaces wall items, and applies a gentle aisle
//! correction, until the layout has zero errors and an acceptable warning
//! count or the pass budget runs out.

use crate::core::config::{Clearances, QualityPolicy};
use crate::engine::detect::{count_errors, count_warnings, detect_collisions};
use crate::engine::resolve::resolve_collisions;
use crate::scene::{ObjectKind, PlacedObject, Reason, Room, Violation, Wall};
use std::cmp::Ordering;
use tracing::debug;

/// Resolver iterations per orchestrator pass
const RESOLVE_ITERS: usize = 8;
/// Padding kept at both ends of a wall when spacing wall items
const WALL_PAD: f32 = 0.5;
/// Smallest gap allowed between neighboring wall items
const WALL_GAP_MIN: f32 = 0.5;

/// Result of the make-valid loop
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub objects: Vec<PlacedObject>,
    pub violations: Vec<Violation>,
    pub passes_used: usize,
}

impl RepairOutcome {
    /// True when the final state met the quality bar
    pub fn accepted(&self, policy: &QualityPolicy) -> bool {
        count_errors(&self.violations) == 0
            && count_warnings(&self.violations) <= policy.max_warnings
    }
}

/// Drive a layout toward validity; on budget exhaustion the best-effort
/// state is returned with its remaining violations.
pub fn make_valid(
    room: &Room,
    objects: &[PlacedObject],
    clearances: &Clearances,
    policy: &QualityPolicy,
) -> RepairOutcome {
    let mut working = objects.to_vec();

    for pass in 0..policy.max_passes {
        working = resolve_collisions(room, &working, RESOLVE_ITERS, clearances).objects;
        distribute_chairs(&mut working, clearances);
        space_wall_items(room, &mut working);

        // Gentler correction than the resolver's aisle pull, applied only
        // when a single table is still pinned, to avoid oscillation.
        let cols = detect_collisions(room, &working, clearances);
        let aisle_tables: Vec<usize> = cols
            .iter()
            .filter(|v| v.reason == Reason::AisleViolation)
            .filter_map(|v| working.iter().position(|o| o.id == v.a))
            .filter(|&i| working[i].kind == ObjectKind::Table && !working[i].locked)
            .collect();
        if aisle_tables.len() == 1 {
            let t = &mut working[aisle_tables[0]];
            t.cx = (t.cx * 2.0 + room.width / 2.0) / 3.0;
            t.cy = (t.cy * 2.0 + room.depth / 2.0) / 3.0;
        }

        let after = detect_collisions(room, &working, clearances);
        let errors = count_errors(&after);
        let warnings = count_warnings(&after);
        debug!(pass, errors, warnings, "make_valid pass complete");

        if errors == 0 && warnings <= policy.max_warnings {
            return RepairOutcome {
                objects: working,
                violations: after,
                passes_used: pass + 1,
            };
        }
    }

    let violations = detect_collisions(room, &working, clearances);
    RepairOutcome {
        objects: working,
        violations,
        passes_used: policy.max_passes,
    }
}

/// Seat unlocked chairs in two rows along the largest table, facing it
fn distribute_chairs(objects: &mut [PlacedObject], clearances: &Clearances) {
    let Some(table) = objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.kind == ObjectKind::Table)
        .max_by(|(_, a), (_, b)| {
            (a.w * a.d)
                .partial_cmp(&(b.w * b.d))
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
    else {
        return;
    };
    let (tcx, tcy, td) = (objects[table].cx, objects[table].cy, objects[table].d);
    let row_offset = td / 2.0 + clearances.chair_back_to_table;

    let mut north = Vec::new();
    let mut south = Vec::new();
    for (i, o) in objects.iter().enumerate() {
        if o.kind == ObjectKind::Chair && !o.locked {
            if o.cy <= tcy {
                north.push(i);
            } else {
                south.push(i);
            }
        }
    }

    // North row faces south (180), south row faces north (0).
    place_row(objects, north, tcx, tcy - row_offset, 180.0, clearances);
    place_row(objects, south, tcx, tcy + row_offset, 0.0, clearances);
}

fn place_row(
    objects: &mut [PlacedObject],
    mut row: Vec<usize>,
    tcx: f32,
    y: f32,
    rotation: f32,
    clearances: &Clearances,
) {
    if row.is_empty() {
        return;
    }
    row.sort_by(|&a, &b| {
        objects[a]
            .cx
            .partial_cmp(&objects[b].cx)
            .unwrap_or(Ordering::Equal)
    });
    let spacing = clearances.chair_to_chair;
    let start = tcx - (row.len() - 1) as f32 * spacing / 2.0;
    for (slot, &i) in row.iter().enumerate() {
        let chair = &mut objects[i];
        chair.cx = start + slot as f32 * spacing;
        chair.cy = y;
        chair.rotation = rotation;
    }
}

/// Evenly space unlocked items along each wall and pin them to the wall
/// line
fn space_wall_items(room: &Room, objects: &mut [PlacedObject]) {
    for wall in [Wall::N, Wall::S, Wall::E, Wall::W] {
        let mut items: Vec<usize> = objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.wall == Some(wall) && !o.locked)
            .map(|(i, _)| i)
            .collect();
        if items.is_empty() {
            continue;
        }

        let along = |o: &PlacedObject| if wall.pins_x() { o.cy } else { o.cx };
        items.sort_by(|&a, &b| {
            along(&objects[a])
                .partial_cmp(&along(&objects[b]))
                .unwrap_or(Ordering::Equal)
        });

        let extent = if wall.pins_x() { room.depth } else { room.width };
        let usable = extent - 2.0 * WALL_PAD;
        let total: f32 = items.iter().map(|&i| objects[i].w).sum();
        let gap = ((usable - total).max(0.0) / (items.len() + 1) as f32).max(WALL_GAP_MIN);

        let line = wall.line(room);
        let mut cursor = WALL_PAD + gap;
        for &i in &items {
            let o = &mut objects[i];
            let center = (cursor + o.w / 2.0).clamp(0.0, extent);
            if wall.pins_x() {
                o.cx = line;
                o.cy = center;
            } else {
                o.cx = center;
                o.cy = line;
            }
            cursor += o.w + gap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::detect::detect_soft;

    fn room() -> Room {
        Room {
            width: 20.0,
            depth: 14.0,
            height: 10.0,
        }
    }

    fn object(id: &str, kind: ObjectKind, cx: f32, cy: f32, w: f32, d: f32) -> PlacedObject {
        PlacedObject {
            id: id.to_string(),
            kind,
            label: None,
            cx,
            cy,
            w,
            d,
            h: None,
            rotation: 0.0,
            wall: None,
            mount_h: None,
            layer: None,
            attach_to: None,
            locked: false,
        }
    }

    #[test]
    fn test_distribute_chairs_builds_facing_rows() {
        let mut objects = vec![
            object("t", ObjectKind::Table, 10.0, 7.0, 7.0, 3.0),
            object("c1", ObjectKind::Chair, 9.0, 6.0, 1.6, 1.6),
            object("c2", ObjectKind::Chair, 11.0, 6.5, 1.6, 1.6),
            object("c3", ObjectKind::Chair, 10.0, 8.0, 1.6, 1.6),
        ];
        distribute_chairs(&mut objects, &Clearances::default());

        // North row: two chairs at y = 7 - (1.5 + 1.5), facing the table.
        assert_eq!(objects[1].cy, 4.0);
        assert_eq!(objects[2].cy, 4.0);
        assert_eq!(objects[1].rotation, 180.0);
        assert_eq!(objects[1].cx, 8.75);
        assert_eq!(objects[2].cx, 11.25);

        // South row: single chair centered on the table.
        assert_eq!(objects[3].cy, 10.0);
        assert_eq!(objects[3].cx, 10.0);
        assert_eq!(objects[3].rotation, 0.0);
    }

    #[test]
    fn test_distribute_chairs_skips_locked() {
        let mut locked_chair = object("c1", ObjectKind::Chair, 3.0, 3.0, 1.6, 1.6);
        locked_chair.locked = true;
        let mut objects = vec![
            object("t", ObjectKind::Table, 10.0, 7.0, 7.0, 3.0),
            locked_chair,
        ];
        distribute_chairs(&mut objects, &Clearances::default());
        assert_eq!(objects[1].cx, 3.0);
        assert_eq!(objects[1].cy, 3.0);
    }

    #[test]
    fn test_distribute_chairs_uses_largest_table() {
        let mut objects = vec![
            object("small", ObjectKind::Table, 3.0, 3.0, 2.0, 2.0),
            object("big", ObjectKind::Table, 12.0, 7.0, 7.0, 3.0),
            object("c1", ObjectKind::Chair, 3.0, 2.0, 1.6, 1.6),
        ];
        distribute_chairs(&mut objects, &Clearances::default());
        // Chair snaps to the big table's north row, centered on it.
        assert_eq!(objects[2].cx, 12.0);
        assert_eq!(objects[2].cy, 4.0);
    }

    #[test]
    fn test_space_wall_items_pins_and_spreads() {
        let mut p1 = object("p1", ObjectKind::Panel, 4.0, 0.3, 2.0, 0.2);
        p1.wall = Some(Wall::N);
        let mut p2 = object("p2", ObjectKind::Panel, 3.0, 0.0, 2.0, 0.2);
        p2.wall = Some(Wall::N);
        let mut objects = vec![p1, p2];

        space_wall_items(&room(), &mut objects);

        // Both pinned to y = 0, sorted by original x: p2 first.
        assert_eq!(objects[0].cy, 0.0);
        assert_eq!(objects[1].cy, 0.0);
        assert!(objects[1].cx < objects[0].cx);
        // gap = (19 - 4) / 3 = 5; centers at 0.5+5+1 and 0.5+5+2+5+1.
        assert!((objects[1].cx - 6.5).abs() < 1e-4);
        assert!((objects[0].cx - 13.5).abs() < 1e-4);
    }

    #[test]
    fn test_space_wall_items_east_wall_runs_along_depth() {
        let mut tv = object("tv", ObjectKind::Tv, 19.0, 3.0, 4.8, 0.5);
        tv.wall = Some(Wall::E);
        let mut objects = vec![tv];

        space_wall_items(&room(), &mut objects);

        assert_eq!(objects[0].cx, 20.0);
        // gap = (13 - 4.8) / 2 = 4.1; center = 0.5 + 4.1 + 2.4.
        assert!((objects[0].cy - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_crowded_wall_keeps_minimum_gap() {
        // Four 4.5 ft panels nearly fill the 19 ft usable span; the
        // proportional gap would be 0.2 ft, so the floor kicks in.
        let mut objects: Vec<PlacedObject> = (0..4)
            .map(|i| {
                let mut p = object(&format!("p{i}"), ObjectKind::Panel, i as f32, 0.0, 4.5, 0.2);
                p.wall = Some(Wall::N);
                p
            })
            .collect();
        space_wall_items(&room(), &mut objects);

        for pair in objects.windows(2) {
            let gap = (pair[1].cx - pair[0].cx).abs() - 4.5;
            assert!((gap - WALL_GAP_MIN).abs() < 1e-4);
        }
    }

    #[test]
    fn test_make_valid_converges_on_overlapping_chairs() {
        let objects = vec![
            object("t", ObjectKind::Table, 10.0, 7.0, 7.0, 3.0),
            object("c1", ObjectKind::Chair, 10.0, 7.0, 1.6, 1.6),
            object("c2", ObjectKind::Chair, 10.0, 7.0, 1.6, 1.6),
        ];
        let policy = QualityPolicy::default();
        let outcome = make_valid(&room(), &objects, &Clearances::default(), &policy);

        assert!(outcome.accepted(&policy));
        assert!(outcome.passes_used <= policy.max_passes);
        assert_eq!(count_errors(&outcome.violations), 0);
    }

    #[test]
    fn test_make_valid_pulls_cornered_table_inward() {
        let objects = vec![object("t", ObjectKind::Table, 1.0, 7.0, 7.0, 3.0)];
        let cl = Clearances::default();
        let policy = QualityPolicy::default();
        let outcome = make_valid(&room(), &objects, &cl, &policy);

        let t = &outcome.objects[0];
        assert!(t.cx > 1.0);
        // Aisle warning resolved even though the conservative bounds check
        // may still complain near the margin.
        assert!(detect_soft(&room(), &outcome.objects, &cl).is_empty());
    }

    #[test]
    fn test_make_valid_reports_budget_exhaustion() {
        // Two locked overlapping boxes can never be fixed.
        let mut a = object("a", ObjectKind::Other, 10.0, 7.0, 2.0, 2.0);
        a.locked = true;
        let mut b = object("b", ObjectKind::Other, 10.5, 7.0, 2.0, 2.0);
        b.locked = true;

        let policy = QualityPolicy {
            max_warnings: 2,
            max_passes: 3,
        };
        let outcome = make_valid(&room(), &[a, b], &Clearances::default(), &policy);
        assert_eq!(outcome.passes_used, 3);
        assert!(!outcome.accepted(&policy));
        assert!(count_errors(&outcome.violations) > 0);
    }
}
