//! Data-driven game balance
//!
//! Read from storage under its own key when present; any missing field
//! falls back to its default so partial tuning files are fine. On native
//! that is `dino_jump_tuning.json` in the data directory.

use serde::{Deserialize, Serialize};

use crate::store::Storage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Upward speed given by a jump (pixels/s)
    pub jump_velocity: f32,
    /// Cactus leftward speed (pixels/s), constant for the whole run
    pub scroll_speed: f32,
    /// Cactus center x after it leaves the screen on the left
    pub respawn_x: f32,
    /// Points per cleared obstacle
    pub clear_bonus: u64,
    /// Idle player's reaction jitter (pixels)
    pub idle_sloppiness: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2000.0,
            jump_velocity: 750.0,
            scroll_speed: 200.0,
            respawn_x: 430.0,
            clear_bonus: 5,
            idle_sloppiness: 25.0,
        }
    }
}

impl Tuning {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "dino_jump_tuning";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Peak jump height in pixels
    pub fn jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }

    /// Seconds between takeoff and landing
    pub fn air_time(&self) -> f32 {
        2.0 * self.jump_velocity / self.gravity
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load(store: &dyn Storage) -> Self {
        let tuning = match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt tuning: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read tuning: {}", e);
                Self::default()
            }
        };

        if tuning.gravity <= 0.0 || tuning.jump_velocity <= 0.0 {
            log::warn!("Tuning needs positive gravity and jump velocity, using defaults");
            return Self::default();
        }
        log::info!(
            "Jump: {:.0}px high, {:.2}s in the air",
            tuning.jump_height(),
            tuning.air_time()
        );
        tuning
    }
}
