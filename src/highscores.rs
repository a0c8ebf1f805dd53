//! Persistent best score
//!
//! One number survives between runs. Native builds keep it in a JSON file,
//! wasm32 builds in LocalStorage. Storage failures are logged and treated
//! as "no record yet"; they never reach the simulation.

use serde::{Deserialize, Serialize};

/// Where the best score lives
pub trait ScoreStore {
    /// Stored best score (0 if none or unreadable)
    fn load(&mut self) -> u32;
    fn save(&mut self, score: u32);
}

/// Serialized form shared by every backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

impl HighScoreRecord {
    fn parse(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Ignoring unreadable high score record: {}", e);
                None
            }
        }
    }
}

/// In-memory store (tests, or hosts without persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.high_score
    }

    fn save(&mut self, score: u32) {
        self.high_score = score;
    }
}

/// JSON file next to the executable (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub const DEFAULT_PATH: &'static str = "gravity_climb_highscore.json";

    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn load(&mut self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => HighScoreRecord::parse(&json).map_or(0, |r| r.high_score),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        let record = HighScoreRecord { high_score: score };
        let result = serde_json::to_string(&record)
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(&self.path, json));
        match result {
            Ok(()) => log::info!("High score {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}

/// Browser LocalStorage (wasm32 only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "gravity_climb_high_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&mut self) -> u32 {
        Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| HighScoreRecord::parse(&json))
            .map_or(0, |r| r.high_score)
    }

    fn save(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score not saved");
            return;
        };
        if let Ok(json) = serde_json::to_string(&HighScoreRecord { high_score: score }) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to write high score to LocalStorage");
            }
        }
    }
}
