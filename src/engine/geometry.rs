//! Oriented-rectangle primitives for plan-view overlap testing

use crate::scene::{PlacedObject, Wall};
use glam::Vec2;

/// Oriented bounding box in the room plane
#[derive(Debug, Clone, Copy)]
pub struct Obb {
    pub center: Vec2,
    /// Unit vector of the local width axis
    pub u: Vec2,
    /// Unit vector of the local depth axis
    pub v: Vec2,
    /// Half-extent along `u`
    pub hw: f32,
    /// Half-extent along `v`
    pub hd: f32,
}

impl Obb {
    /// Build the plan-view box for an object.
    ///
    /// Wall-attached objects ignore their own rotation: east/west items
    /// are forced to 90 degrees so they span the wall with their declared
    /// width and protrude into the room with their declared depth;
    /// north/south items are forced to 0 degrees.
    pub fn from_object(o: &PlacedObject) -> Self {
        let degrees = match o.wall {
            Some(Wall::E) | Some(Wall::W) => 90.0,
            Some(Wall::N) | Some(Wall::S) => 0.0,
            None => o.rotation,
        };
        let theta = degrees.to_radians();
        let (s, c) = theta.sin_cos();
        Self {
            center: Vec2::new(o.cx, o.cy),
            u: Vec2::new(c, s),
            v: Vec2::new(-s, c),
            hw: o.w / 2.0,
            hd: o.d / 2.0,
        }
    }

    /// Projection radius of the box onto an arbitrary unit axis
    pub fn projected_radius(&self, axis: Vec2) -> f32 {
        (self.u * self.hw).dot(axis).abs() + (self.v * self.hd).dot(axis).abs()
    }

    /// Separating-axis overlap test over both boxes' local axes.
    ///
    /// Two rectangles are disjoint iff some candidate axis separates their
    /// center projections by more than the sum of projected half-extents.
    pub fn overlaps(&self, other: &Obb) -> bool {
        for axis in [self.u, self.v, other.u, other.v] {
            let center_dist = (other.center - self.center).dot(axis).abs();
            if center_dist > self.projected_radius(axis) + other.projected_radius(axis) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectKind;
    use proptest::prelude::*;

    fn boxed(cx: f32, cy: f32, w: f32, d: f32, rotation: f32) -> PlacedObject {
        PlacedObject {
            id: "o".to_string(),
            kind: ObjectKind::Other,
            label: None,
            cx,
            cy,
            w,
            d,
            h: None,
            rotation,
            wall: None,
            mount_h: None,
            layer: None,
            attach_to: None,
            locked: false,
        }
    }

    #[test]
    fn test_axis_aligned_overlap() {
        let a = Obb::from_object(&boxed(0.0, 0.0, 2.0, 2.0, 0.0));
        let b = Obb::from_object(&boxed(1.5, 0.0, 2.0, 2.0, 0.0));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_axis_aligned_disjoint() {
        let a = Obb::from_object(&boxed(0.0, 0.0, 2.0, 2.0, 0.0));
        let b = Obb::from_object(&boxed(3.0, 0.0, 2.0, 2.0, 0.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_rotated_gap_that_an_aabb_would_miss() {
        // A 45-degree diamond slots into the diagonal gap next to a square.
        let square = Obb::from_object(&boxed(0.0, 0.0, 2.0, 2.0, 0.0));
        let diamond = Obb::from_object(&boxed(2.2, 2.2, 2.0, 2.0, 45.0));
        assert!(!square.overlaps(&diamond));

        let closer = Obb::from_object(&boxed(1.6, 1.6, 2.0, 2.0, 45.0));
        assert!(square.overlaps(&closer));
    }

    #[test]
    fn test_east_wall_item_spans_the_wall_with_its_width() {
        // A 6 ft wide, 0.5 ft deep board on the east wall runs along y.
        let mut board = boxed(20.0, 7.0, 6.0, 0.5, 0.0);
        board.wall = Some(Wall::E);
        let obb = Obb::from_object(&board);

        let y_extent = obb.projected_radius(Vec2::Y);
        let x_extent = obb.projected_radius(Vec2::X);
        assert!((y_extent - 3.0).abs() < 1e-5);
        assert!((x_extent - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_north_wall_item_keeps_its_width_along_x() {
        let mut panel = boxed(12.0, 0.0, 2.0, 0.2, 37.0); // rotation ignored
        panel.wall = Some(Wall::N);
        let obb = Obb::from_object(&panel);

        assert!((obb.projected_radius(Vec2::X) - 1.0).abs() < 1e-5);
        assert!((obb.projected_radius(Vec2::Y) - 0.1).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -10.0f32..10.0, ay in -10.0f32..10.0,
            bx in -10.0f32..10.0, by in -10.0f32..10.0,
            aw in 0.1f32..6.0, ad in 0.1f32..6.0,
            bw in 0.1f32..6.0, bd in 0.1f32..6.0,
            ar in 0.0f32..360.0, br in 0.0f32..360.0,
        ) {
            let a = Obb::from_object(&boxed(ax, ay, aw, ad, ar));
            let b = Obb::from_object(&boxed(bx, by, bw, bd, br));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_far_apart_boxes_never_overlap(
            ar in 0.0f32..360.0, br in 0.0f32..360.0,
        ) {
            // Max half-diagonal of a 6x6 box is ~4.25, so 20 apart is safe
            // at any rotation.
            let a = Obb::from_object(&boxed(0.0, 0.0, 6.0, 6.0, ar));
            let b = Obb::from_object(&boxed(20.0, 0.0, 6.0, 6.0, br));
            prop_assert!(!a.overlaps(&b));
        }
    }
}
