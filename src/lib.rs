//! Room Layout - spatial constraint engine for furniture placement
//!
//! Pure functions over a [`scene::Room`] and a list of [`scene::PlacedObject`]s:
//! detect geometric and clearance violations, nudge offenders apart, and
//! drive a whole layout toward a quality bar. The engine holds no state;
//! callers own the object list and persist results.

pub mod core;
pub mod engine;
pub mod scene;
