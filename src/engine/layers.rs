//! 2.5D vertical layering model
//!
//! Each object occupies a coarse layer and a vertical interval in feet.
//! Two objects are collision candidates only when they share a layer and
//! their intervals intersect; that is what lets a floor table and a ceiling
//! light, or two wall fixtures at different heights, share plan footprint.

use crate::scene::{Layer, PlacedObject, Room};

/// Effective layer: explicit if set, otherwise derived from wall
/// attachment and kind
pub fn layer_of(o: &PlacedObject) -> Layer {
    if let Some(layer) = o.layer {
        return layer;
    }
    if o.wall.is_some() {
        return Layer::Wall;
    }
    o.kind.default_layer()
}

/// Vertical occupancy of an object as a `[z0, z1]` interval in feet
pub fn vertical_interval(room: &Room, o: &PlacedObject) -> (f32, f32) {
    match layer_of(o) {
        Layer::Floor => (0.0, 3.0),
        Layer::Surface => (2.3, 5.0),
        Layer::Wall => {
            // A known mount height narrows the interval so fixtures at
            // different heights coexist on the same wall.
            if let (Some(mount_h), Some(h)) = (o.mount_h, o.h) {
                let z0 = (mount_h - h / 2.0).max(0.0);
                let z1 = (mount_h + h / 2.0).min(room.height);
                (z0, z1)
            } else {
                (0.0, room.height)
            }
        }
        Layer::Ceiling => (room.height - 1.5, room.height),
    }
}

/// True when two objects compete for the same vertical real estate
pub fn share_vertical_space(room: &Room, a: &PlacedObject, b: &PlacedObject) -> bool {
    if layer_of(a) != layer_of(b) {
        return false;
    }
    let (a0, a1) = vertical_interval(room, a);
    let (b0, b1) = vertical_interval(room, b);
    a1.min(b1) > a0.max(b0)
}
