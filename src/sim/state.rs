//! Per-run game state
//!
//! Everything about one play session that is not a physics body.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_POINT;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RunPhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Dino hit the cactus; the session is finished
    GameOver,
}

/// Score-relevant counters for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    /// Simulation ticks advanced while running
    pub time_ticks: u64,
    /// Obstacles that scrolled past the Dino
    pub obstacles_cleared: u32,
    /// Current score
    pub score: u64,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Distance points plus a bonus per cleared obstacle
    pub fn compute_score(&self, clear_bonus: u64) -> u64 {
        self.time_ticks / TICKS_PER_POINT + u64::from(self.obstacles_cleared) * clear_bonus
    }
}
