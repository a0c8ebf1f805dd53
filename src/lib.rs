//! Gravity Climb - a vertical platformer/shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, generation, bosses, camera)
//! - `tuning`: Data-driven game balance
//! - `session`: Run lifecycle and high score bookkeeping
//! - `platform`: Input capture and fixed-step timing for hosts
//! - `audio`: Sound playback front end
//! - `highscores`: Persistent best score

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Timing constants
pub mod consts {
    /// Simulation rate; all per-tick speeds assume this
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time accepted by the accumulator
    pub const MAX_FRAME_DT: f32 = 0.25;
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
