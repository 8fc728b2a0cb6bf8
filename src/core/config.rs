//! Engine tuning constants with documented defaults
//!
//! Clearance values are policy, not physics: they encode how much free
//! space a layout must keep around furniture before it stops being usable.
//! All distances are in feet.

use serde::{Deserialize, Serialize};

/// Minimum free-space requirements enforced by the detectors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Clearances {
    /// Walkway width kept between a table and the nearest wall (36")
    pub aisle_min: f32,

    /// Gap between a chair back and the table edge it serves (18")
    pub chair_back_to_table: f32,

    /// Center-to-center spacing between neighboring chairs (30")
    pub chair_to_chair: f32,

    /// Preferred table distance to glass or whiteboard walls (48")
    ///
    /// Advisory for layout authors; the detectors enforce `aisle_min`.
    pub table_to_wall_prefer: f32,

    /// Float tolerance when checking that a wall item sits on its wall line
    pub wall_gap_eps: f32,
}

impl Default for Clearances {
    fn default() -> Self {
        Self {
            aisle_min: 3.0,
            chair_back_to_table: 1.5,
            chair_to_chair: 2.5,
            table_to_wall_prefer: 4.0,
            wall_gap_eps: 0.1,
        }
    }
}

/// Stopping criteria for the make-valid loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityPolicy {
    /// A layout is accepted once errors are gone and warnings are at or
    /// below this count
    pub max_warnings: usize,

    /// Safety cap on orchestrator passes before returning best effort
    pub max_passes: usize,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            max_warnings: 2,
            max_passes: 12,
        }
    }
}

/// Bundle of tunables loadable from a TOML file by the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub clearances: Clearances,
    pub quality: QualityPolicy,
}
