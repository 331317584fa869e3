//! Events emitted by the simulation for the renderer and UI.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, KillCause};
use crate::types::RenderHandle;

/// Everything the outside world needs to react to after a tick or fire action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A render surface should be added to the visible scene.
    Added { handle: RenderHandle, kind: EntityKind },
    /// A render surface should be removed from the visible scene.
    Removed { handle: RenderHandle, kind: EntityKind },
    /// A target was killed at `position`.
    Kill { cause: KillCause, position: DVec3 },
    /// Score after an increment.
    ScoreChanged { score: u32 },
    /// The population cap pushed out the oldest target.
    TargetEvicted { spawn_seq: u64 },
    /// Momentary muzzle flash; the renderer removes it after `duration_ms`.
    MuzzleFlash { position: DVec3, duration_ms: u64 },
}
