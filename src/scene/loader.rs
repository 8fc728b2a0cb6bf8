//! Scene JSON persistence and the bundled demo scene

use crate::core::error::Result;
use crate::scene::{ObjectKind, PlacedObject, Room, Scene, Wall};
use std::path::Path;
use uuid::Uuid;

/// Load a scene from a JSON file, assigning fresh ids where missing
pub fn load_scene(path: &Path) -> Result<Scene> {
    let text = std::fs::read_to_string(path)?;
    let mut scene: Scene = serde_json::from_str(&text)?;
    assign_missing_ids(&mut scene.objects);
    Ok(scene)
}

/// Write a scene to a JSON file, pretty-printed
pub fn save_scene(path: &Path, scene: &Scene) -> Result<()> {
    let text = serde_json::to_string_pretty(scene)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Hand-written scene files may omit object ids; give those objects stable
/// ones so violations can reference them.
pub fn assign_missing_ids(objects: &mut [PlacedObject]) {
    for o in objects.iter_mut() {
        if o.id.is_empty() {
            o.id = Uuid::new_v4().to_string();
        }
    }
}

/// Baseline interview-room layout: one 84"x36" table with four chairs,
/// a whiteboard, a TV, acoustic panels, and a low wall decal.
pub fn demo_scene() -> Scene {
    let furniture = |id: &str, kind: ObjectKind, cx: f32, cy: f32, w: f32, d: f32, h: f32| {
        PlacedObject {
            id: id.to_string(),
            kind,
            label: Some(id.to_string()),
            cx,
            cy,
            w,
            d,
            h: Some(h),
            rotation: 0.0,
            wall: None,
            mount_h: None,
            layer: None,
            attach_to: None,
            locked: false,
        }
    };
    let wall_item = |id: &str,
                     kind: ObjectKind,
                     wall: Wall,
                     cx: f32,
                     cy: f32,
                     w: f32,
                     d: f32,
                     h: f32,
                     mount_h: f32| {
        PlacedObject {
            mount_h: Some(mount_h),
            wall: Some(wall),
            ..furniture(id, kind, cx, cy, w, d, h)
        }
    };

    Scene {
        name: Some("interview_room".to_string()),
        room: Room {
            width: 20.0,
            depth: 14.0,
            height: 10.0,
        },
        objects: vec![
            furniture("table", ObjectKind::Table, 10.0, 7.0, 7.0, 3.0, 2.5),
            furniture("chair_n1", ObjectKind::Chair, 8.75, 5.5, 1.6, 1.6, 3.0),
            furniture("chair_n2", ObjectKind::Chair, 11.25, 5.5, 1.6, 1.6, 3.0),
            furniture("chair_s1", ObjectKind::Chair, 8.75, 8.5, 1.6, 1.6, 3.0),
            furniture("chair_s2", ObjectKind::Chair, 11.25, 8.5, 1.6, 1.6, 3.0),
            wall_item(
                "whiteboard",
                ObjectKind::Whiteboard,
                Wall::W,
                0.0,
                7.0,
                6.0,
                0.5,
                4.0,
                4.5,
            ),
            wall_item("tv", ObjectKind::Tv, Wall::E, 20.0, 7.0, 4.8, 0.5, 2.7, 5.0),
            wall_item(
                "panel_1",
                ObjectKind::Panel,
                Wall::N,
                12.0,
                0.0,
                2.0,
                0.2,
                4.0,
                5.5,
            ),
            wall_item(
                "panel_2",
                ObjectKind::Panel,
                Wall::N,
                14.5,
                0.0,
                2.0,
                0.2,
                4.0,
                5.5,
            ),
            wall_item(
                "panel_3",
                ObjectKind::Panel,
                Wall::N,
                17.0,
                0.0,
                2.0,
                0.2,
                4.0,
                5.5,
            ),
            // Sits below the TV; the tight mount interval keeps the two
            // from flagging a wall overlap.
            wall_item(
                "decal",
                ObjectKind::Decal,
                Wall::E,
                20.0,
                7.0,
                6.0,
                0.1,
                1.0,
                2.0,
            ),
        ],
        notes: Some("Interview room baseline.".to_string()),
    }
}
