//! Scene data model: rooms, placed objects, and the violations reported
//! against them
//!
//! These types mirror the scene JSON produced by the layout editor. The
//! engine never creates or destroys objects; it only returns new lists with
//! adjusted positions.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rectangular room, dimensions in feet
///
/// The depth axis runs from the north wall (y = 0) to the south wall
/// (y = depth); the width axis from west (x = 0) to east (x = width).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

/// Compass side a wall-attached object hangs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    N,
    S,
    E,
    W,
}

impl Wall {
    /// Coordinate of the wall line on the pinned axis
    pub fn line(self, room: &Room) -> f32 {
        match self {
            Wall::W | Wall::N => 0.0,
            Wall::E => room.width,
            Wall::S => room.depth,
        }
    }

    /// True when this wall pins the x coordinate (east/west walls)
    pub fn pins_x(self) -> bool {
        matches!(self, Wall::E | Wall::W)
    }
}

/// Coarse vertical zone used to decide which objects can possibly collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Floor,
    Surface,
    Wall,
    Ceiling,
}

/// Furniture kind, the one place that encodes kind-specific rule treatment
///
/// Unknown kind strings from the editor deserialize to `Other` and get no
/// special treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Table,
    Chair,
    Panel,
    Tv,
    Whiteboard,
    Decal,
    Plant,
    CeilingLight,
    #[serde(other)]
    Other,
}

impl ObjectKind {
    /// Layer an object of this kind occupies when none is set explicitly
    pub fn default_layer(self) -> Layer {
        match self {
            ObjectKind::Decal | ObjectKind::Tv | ObjectKind::Whiteboard | ObjectKind::Panel => {
                Layer::Wall
            }
            ObjectKind::CeilingLight => Layer::Ceiling,
            _ => Layer::Floor,
        }
    }

    /// Resolver displacement rank; higher numbers are displaced first.
    /// Locked and wall-attached objects override this, see the resolver.
    pub fn base_priority(self) -> u8 {
        match self {
            ObjectKind::Table => 2,
            ObjectKind::Panel => 3,
            ObjectKind::Chair => 4,
            _ => 5,
        }
    }
}

/// A piece of furniture (or fixture) placed in the room
///
/// Positions and sizes are in feet; `rotation` is plan-view degrees with 0
/// meaning the local width axis runs along room x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Stable unique identifier; the loader fills in missing ones
    #[serde(default)]
    pub id: String,
    pub kind: ObjectKind,
    /// Display text, unused by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Center position in room-plane feet
    pub cx: f32,
    pub cy: f32,
    /// Footprint width/depth in the object's own axes, pre-rotation
    pub w: f32,
    pub d: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f32>,
    #[serde(default)]
    pub rotation: f32,
    /// When set, orientation and one coordinate follow wall semantics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<Wall>,
    /// Height of the object's vertical center above the floor, for wall
    /// and ceiling items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_h: Option<f32>,
    /// Explicit layer; derived from kind and wall attachment when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    /// Parent object id; attached pairs never count as colliding
    #[serde(default, rename = "attachTo", skip_serializing_if = "Option::is_none")]
    pub attach_to: Option<String>,
    /// The resolver never moves locked objects
    #[serde(default)]
    pub locked: bool,
}

/// Why a placement was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    OutOfBounds,
    WallNotOn,
    Overlap,
    ChairTooCloseToTable,
    ChairsTooClose,
    AisleViolation,
}

impl Reason {
    pub fn severity(self) -> Severity {
        match self {
            Reason::OutOfBounds | Reason::WallNotOn | Reason::Overlap => Severity::Error,
            Reason::ChairTooCloseToTable | Reason::ChairsTooClose | Reason::AisleViolation => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reason::OutOfBounds => "out_of_bounds",
            Reason::WallNotOn => "wall_not_on",
            Reason::Overlap => "overlap",
            Reason::ChairTooCloseToTable => "chair_too_close_to_table",
            Reason::ChairsTooClose => "chairs_too_close",
            Reason::AisleViolation => "aisle_violation",
        };
        f.write_str(s)
    }
}

/// A geometrically invalid placement is an error; an undesirable but legal
/// one is a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A flagged placement; `b` is present for pairwise conflicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Id of the offending object
    pub a: String,
    /// Partner object for pairwise violations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
    pub reason: Reason,
    pub severity: Severity,
}

impl Violation {
    pub fn single(a: &PlacedObject, reason: Reason) -> Self {
        Self {
            a: a.id.clone(),
            b: None,
            reason,
            severity: reason.severity(),
        }
    }

    pub fn pair(a: &PlacedObject, b: &PlacedObject, reason: Reason) -> Self {
        Self {
            a: a.id.clone(),
            b: Some(b.id.clone()),
            reason,
            severity: reason.severity(),
        }
    }
}

/// A named layout: one room and its placed objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub room: Room,
    pub objects: Vec<PlacedObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
