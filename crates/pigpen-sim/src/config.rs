//! Engine configuration.
//!
//! Every field has a default taken from `pigpen_core::constants`, so a JSON
//! file only needs the keys it wants to override.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use pigpen_core::constants::*;

use crate::error::SimError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same spawns and bursts.
    pub seed: u64,
    /// Wall-clock interval between spawns (milliseconds).
    pub spawn_interval_ms: u64,
    /// Lateral walking speed of new targets (units per tick).
    pub target_speed: f64,
    /// Projectile speed (units per tick).
    pub projectile_speed: f64,
    /// Population cap.
    pub max_targets: usize,
    /// Distance along the aim ray used as the projectile's aim point.
    pub aim_distance: f64,
    /// Projectile/target collision radius.
    pub hit_radius: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            target_speed: TARGET_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            max_targets: MAX_TARGETS,
            aim_distance: AIM_DISTANCE,
            hit_radius: HIT_RADIUS,
        }
    }
}

impl SimConfig {
    /// Spawn cadence as a `Duration`.
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.spawn_interval_ms == 0 {
            return Err(SimError::Config("spawn_interval_ms must be > 0".into()));
        }
        if self.max_targets == 0 {
            return Err(SimError::Config("max_targets must be > 0".into()));
        }
        let positive = [
            ("target_speed", self.target_speed),
            ("projectile_speed", self.projectile_speed),
            ("aim_distance", self.aim_distance),
            ("hit_radius", self.hit_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
