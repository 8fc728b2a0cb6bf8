//! The constraint engine: geometry primitives, layered collision
//! candidacy, violation detectors, the sweep resolver, and the make-valid
//! orchestrator

pub mod detect;
pub mod geometry;
pub mod layers;
pub mod orchestrate;
pub mod resolve;

pub use detect::{count_errors, count_warnings, detect_collisions, detect_hard, detect_soft};
pub use geometry::Obb;
pub use layers::{layer_of, share_vertical_space, vertical_interval};
pub use orchestrate::{make_valid, RepairOutcome};
pub use resolve::{resolve_collisions, Resolution};
