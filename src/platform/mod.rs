//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (record timestamps, run seeds)
//! - Storage (LocalStorage on web, files on native)
//! - Logger setup

pub mod storage;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::default_storage;
pub use time::{now_iso8601, seed_from_clock};

/// Initialize logging for the current platform
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// Initialize logging for the current platform
///
/// Defaults to `info`; `RUST_LOG` overrides.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
