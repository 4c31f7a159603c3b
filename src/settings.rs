//! Simulation settings
//!
//! Tolerances, timing and scoring, loaded from JSON with defaults for any
//! missing field.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{APPROACH_FACTOR, FRAMES_PER_SECOND};
use crate::sim::Tolerance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Geometric tolerances used by the collision environment
    pub tolerance: Tolerance,
    /// Share of the distance to a collision point a ball covers on impact
    pub approach_factor: f64,
    /// Fixed-step frame rate
    pub fps: u32,

    // === Lives & Score ===
    pub lives: u32,
    /// Points for any block hit
    pub block_hit_score: u64,
    /// Extra points when the hit destroys the block
    pub block_destroy_score: u64,
    /// Bonus for clearing every block in a level
    pub level_clear_bonus: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            approach_factor: APPROACH_FACTOR,
            fps: FRAMES_PER_SECOND,

            lives: 7,
            block_hit_score: 5,
            block_destroy_score: 10,
            level_clear_bonus: 100,
        }
    }
}

impl Settings {
    /// Fixed timestep in seconds
    pub fn sim_dt(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}
