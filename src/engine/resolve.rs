//! Sweep resolver: nudge conflicting objects apart until errors clear
//!
//! Each sweep recomputes hard violations and displaces the lower-priority
//! member of every conflicting pair by a small step away from its partner.
//! Locked and wall-attached objects never move; when the displaced side of
//! a pair is one of those, the violation simply persists into the report.
//! A final analytical pass relaxes the remaining soft violations.

use crate::core::config::Clearances;
use crate::engine::detect::{detect_collisions, detect_hard, detect_soft};
use crate::scene::{ObjectKind, PlacedObject, Reason, Room, Violation};
use tracing::debug;

/// Displacement per sweep iteration, feet
const STEP: f32 = 0.25;
/// Margin kept from the room edge when clamping a displaced mover
const EDGE_MARGIN: f32 = 0.25;
/// Margin used when pushing a bounds offender back inside
const BOUNDS_MARGIN: f32 = 0.5;
/// Extra distance past the required clearance in the chair-to-table fix
const CHAIR_TABLE_SLACK: f32 = 0.1;
/// Extra half-separation in the symmetric chair spacing fix
const CHAIR_PAIR_SLACK: f32 = 0.05;

/// Resolver output: repositioned objects plus whatever is still flagged
#[derive(Debug, Clone)]
pub struct Resolution {
    pub objects: Vec<PlacedObject>,
    pub remaining: Vec<Violation>,
}

/// Displacement rank for a conflicting pair; the strictly higher rank
/// moves. Locked objects never move, wall items only via wall spacing.
fn priority(o: &PlacedObject) -> u8 {
    if o.locked {
        0
    } else if o.wall.is_some() {
        1
    } else {
        o.kind.base_priority()
    }
}

fn index_of(objects: &[PlacedObject], id: &str) -> Option<usize> {
    objects.iter().position(|o| o.id == id)
}

/// Iteratively separate hard violations, then analytically relax soft ones.
///
/// Returns the new object list and a freshly recomputed full violation
/// set; a non-empty error remainder means the iteration budget ran out
/// with no legal move left.
pub fn resolve_collisions(
    room: &Room,
    objects: &[PlacedObject],
    iterations: usize,
    clearances: &Clearances,
) -> Resolution {
    let mut objs = objects.to_vec();

    for sweep in 0..iterations {
        let errors = detect_hard(room, &objs, clearances);
        if errors.is_empty() {
            debug!(sweep, "sweep resolver converged");
            break;
        }

        for col in &errors {
            let Some(ai) = index_of(&objs, &col.a) else {
                continue;
            };
            match col.b.as_deref() {
                None => {
                    // Bounds or wall fit: pull the center back inside.
                    let o = &mut objs[ai];
                    if !o.locked && o.wall.is_none() {
                        o.cx = o.cx.clamp(BOUNDS_MARGIN, room.width - BOUNDS_MARGIN);
                        o.cy = o.cy.clamp(BOUNDS_MARGIN, room.depth - BOUNDS_MARGIN);
                    }
                }
                Some(b_id) => {
                    let Some(bi) = index_of(&objs, b_id) else {
                        continue;
                    };
                    let (mover, other) = if priority(&objs[ai]) >= priority(&objs[bi]) {
                        (ai, bi)
                    } else {
                        (bi, ai)
                    };
                    if objs[mover].locked || objs[mover].wall.is_some() {
                        continue;
                    }
                    let (ox, oy) = (objs[other].cx, objs[other].cy);
                    let m = &mut objs[mover];
                    let angle = (m.cy - oy).atan2(m.cx - ox);
                    m.cx = (m.cx + angle.cos() * STEP)
                        .clamp(EDGE_MARGIN, room.width - EDGE_MARGIN);
                    m.cy = (m.cy + angle.sin() * STEP)
                        .clamp(EDGE_MARGIN, room.depth - EDGE_MARGIN);
                }
            }
        }
    }

    soft_pass(room, &mut objs, clearances);

    let remaining = detect_collisions(room, &objs, clearances);
    Resolution {
        objects: objs,
        remaining,
    }
}

/// One analytical pass over the current soft violations
fn soft_pass(room: &Room, objs: &mut [PlacedObject], clearances: &Clearances) {
    let warnings = detect_soft(room, objs, clearances);
    for col in &warnings {
        match col.reason {
            Reason::ChairTooCloseToTable => {
                let Some(ci) = index_of(objs, &col.a) else {
                    continue;
                };
                let Some(ti) = col.b.as_deref().and_then(|id| index_of(objs, id)) else {
                    continue;
                };
                if objs[ci].locked || objs[ci].wall.is_some() {
                    continue;
                }
                // Slide the chair out along the table-to-chair direction
                // until it clears the edge by the required gap plus slack.
                let (tcx, tcy, tw, td) = (objs[ti].cx, objs[ti].cy, objs[ti].w, objs[ti].d);
                let c = &mut objs[ci];
                let dx = c.cx - tcx;
                let dy = c.cy - tcy;
                let len = dx.hypot(dy).max(1e-6);
                let need = clearances.chair_back_to_table + CHAIR_TABLE_SLACK;
                c.cx = (tcx + dx / len * (tw / 2.0 + need))
                    .clamp(EDGE_MARGIN, room.width - EDGE_MARGIN);
                c.cy = (tcy + dy / len * (td / 2.0 + need))
                    .clamp(EDGE_MARGIN, room.depth - EDGE_MARGIN);
            }
            Reason::ChairsTooClose => {
                let Some(ai) = index_of(objs, &col.a) else {
                    continue;
                };
                let Some(bi) = col.b.as_deref().and_then(|id| index_of(objs, id)) else {
                    continue;
                };
                if objs[ai].locked
                    || objs[bi].locked
                    || objs[ai].wall.is_some()
                    || objs[bi].wall.is_some()
                {
                    continue;
                }
                // Symmetric separation about the pair midpoint.
                let dx = objs[ai].cx - objs[bi].cx;
                let dy = objs[ai].cy - objs[bi].cy;
                let len = dx.hypot(dy).max(1e-6);
                let mid_x = (objs[ai].cx + objs[bi].cx) / 2.0;
                let mid_y = (objs[ai].cy + objs[bi].cy) / 2.0;
                let half = clearances.chair_to_chair / 2.0 + CHAIR_PAIR_SLACK;
                objs[ai].cx = mid_x + dx / len * half;
                objs[ai].cy = mid_y + dy / len * half;
                objs[bi].cx = mid_x - dx / len * half;
                objs[bi].cy = mid_y - dy / len * half;
            }
            Reason::AisleViolation => {
                let Some(ti) = index_of(objs, &col.a) else {
                    continue;
                };
                if objs[ti].locked || objs[ti].kind != ObjectKind::Table {
                    continue;
                }
                // A quarter of the way toward the room center.
                let t = &mut objs[ti];
                t.cx = (t.cx * 3.0 + room.width / 2.0) / 4.0;
                t.cy = (t.cy * 3.0 + room.depth / 2.0) / 4.0;
            }
            _ => {}
        }
    }
}
