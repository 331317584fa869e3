//! Kill counter.

/// Running score tracked by the engine. Only ever goes up.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreTracker {
    kills: u32,
}

impl ScoreTracker {
    /// Record one confirmed kill and return the new total.
    pub fn increment(&mut self) -> u32 {
        self.kills = self.kills.saturating_add(1);
        self.kills
    }

    pub fn current(&self) -> u32 {
        self.kills
    }
}
