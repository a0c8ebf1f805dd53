//! Discrete events emitted by the simulation
//!
//! The core never plays sounds or touches the UI; it records what happened
//! and the host drains the list after each tick.

use serde::{Deserialize, Serialize};

use super::state::BossId;

/// Named sound triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Bullet hit a boss
    Hit,
    /// Player took contact damage
    Damage,
    /// Ground or air jump
    Jump,
    /// Heal item collected
    Heal,
    /// Run ended (also plays when a revival is offered)
    GameOver,
    /// Final boss defeated
    Clear,
    /// Full-auto unlocked or player revived
    PowerUp,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
            SoundEffect::Damage => "damage",
            SoundEffect::Jump => "jump",
            SoundEffect::Heal => "heal",
            SoundEffect::GameOver => "gameover",
            SoundEffect::Clear => "clear",
            SoundEffect::PowerUp => "powerup",
        }
    }
}

/// Everything the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Arena built and boss activated
    BossSpawned(BossId),
    BossDefeated(BossId),
    /// Fell or died during the final boss fight; `revive()` or `give_up()`
    RevivalOffered { score: u32 },
    GameOver { score: u32, new_record: bool },
    GameClear { score: u32 },
}

impl GameEvent {
    /// True for events that end the run
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. } | GameEvent::GameClear { .. })
    }
}

impl From<SoundEffect> for GameEvent {
    fn from(effect: SoundEffect) -> Self {
        GameEvent::Sound(effect)
    }
}
