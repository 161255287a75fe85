//! Game settings and preferences
//!
//! Persisted separately from the records, under their own storage key.

use serde::{Deserialize, Serialize};

use crate::store::Storage;

/// Identity used when none is configured
pub const DEFAULT_USER: &str = "User1";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded with each score. Supplied from outside the game;
    /// there is no login.
    pub user: String,

    // === Gameplay ===
    /// Idle/demo mode - the idle player jumps instead of the user
    pub idle_mode: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            idle_mode: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "dino_jump_settings";

    /// Override the player name; blank names fall back to the default
    pub fn with_user(mut self, user: &str) -> Self {
        let user = user.trim();
        self.user = if user.is_empty() {
            DEFAULT_USER.to_string()
        } else {
            user.to_string()
        };
        self
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn Storage) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged only
    pub fn save(&self, store: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::error!("Error saving settings: {}", e),
            },
            Err(e) => log::error!("Error serializing settings: {}", e),
        }
    }
}
