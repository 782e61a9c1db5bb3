//! Combat limits to stop stalemates from ticking forever

use alloc::format;
use alloc::string::String;

use crate::error::{GameError, GameResult};

/// Windows opened per combat before it is scored as it stands.
pub const MAX_TICKS_PER_COMBAT: u32 = 400;

/// Tracks how far an encounter has run
#[derive(Debug, Clone)]
pub struct BattleLimits {
    pub ticks: u32,
    pub max_ticks: u32,
    pub limit_exceeded_reason: Option<String>,
}

impl BattleLimits {
    pub fn new() -> Self {
        Self::with_max_ticks(MAX_TICKS_PER_COMBAT)
    }

    pub fn with_max_ticks(max_ticks: u32) -> Self {
        Self {
            ticks: 0,
            max_ticks,
            limit_exceeded_reason: None,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.limit_exceeded_reason.is_some()
    }

    pub fn record_tick(&mut self) -> GameResult<()> {
        self.ticks += 1;
        if self.ticks > self.max_ticks {
            self.limit_exceeded_reason =
                Some(format!("Tick limit exceeded (max {})", self.max_ticks));
            return Err(GameError::LimitExceeded);
        }
        Ok(())
    }
}

impl Default for BattleLimits {
    fn default() -> Self {
        Self::new()
    }
}
