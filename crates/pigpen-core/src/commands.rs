//! Player commands sent from the frontend to the simulation.

use serde::{Deserialize, Serialize};

use crate::types::PointerCoord;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Pointer click at a normalized device coordinate.
    Fire { x: f64, y: f64 },
    /// Toggle the simulation between active and inactive.
    SetActive { active: bool },
}

impl PlayerCommand {
    /// Build a fire command from a pointer coordinate.
    pub fn fire_at(pointer: PointerCoord) -> Self {
        PlayerCommand::Fire {
            x: pointer.x,
            y: pointer.y,
        }
    }
}
