//! Dino Jump - A single-screen side-scrolling jump game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, physics step, game systems)
//! - `host`: Game loop host driving the simulation while running
//! - `scoreboard`: Ranked record list synced to storage
//! - `screen`: Screen composition and action routing
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `store`: Key-value persistence backends
//! - `tuning`: Data-driven game balance

pub mod host;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod scoreboard;
pub mod screen;
pub mod settings;
pub mod sim;
pub mod store;
pub mod tuning;

pub use records::{Record, RecordList};
pub use scoreboard::{ScoreBoard, SyncStatus};
pub use screen::{Screen, ScreenView};
pub use settings::Settings;
pub use store::{MemoryStore, Storage, StoreError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the host will accumulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions (screen coords, y grows downward)
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Dino body (center + size)
    pub const DINO_POS: (f32, f32) = (50.0, 300.0);
    pub const DINO_SIZE: (f32, f32) = (50.0, 50.0);

    /// Ground body - static
    pub const GROUND_POS: (f32, f32) = (200.0, 350.0);
    pub const GROUND_SIZE: (f32, f32) = (400.0, 10.0);

    /// Cactus obstacle
    pub const CACTUS_POS: (f32, f32) = (300.0, 320.0);
    pub const CACTUS_SIZE: (f32, f32) = (30.0, 50.0);

    /// Running ticks per score point (10 points per second)
    pub const TICKS_PER_POINT: u64 = 12;
}
