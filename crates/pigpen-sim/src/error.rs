//! Error type for the simulation engine.

use std::path::PathBuf;

use thiserror::Error;

use pigpen_core::types::RenderHandle;

/// Failures surfaced by the engine and its configuration layer.
#[derive(Debug, Error)]
pub enum SimError {
    /// The aim ray hit a surface that no target owns. Every surface must
    /// belong to exactly one target, so the session cannot continue.
    #[error("render surface {handle:?} has no owning target")]
    OrphanSurface { handle: RenderHandle },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
