//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (constant per-tick velocities)
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (insertion order of every entity list)
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod camera;
pub mod collision;
pub mod events;
pub mod generator;
pub mod physics;
pub mod pools;
pub mod rect;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use boss::{AttackPattern, Boss, BossParams};
pub use collision::BulletTarget;
pub use events::{GameEvent, SoundEffect};
pub use rect::Rect;
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use snapshot::Snapshot;
pub use state::{
    BossId, Bullet, Enemy, GamePhase, GameState, Pickup, PickupKind, Platform, Player, StageFlags,
};
pub use tick::{TickInput, begin_boss_fight, finish_boss_fight, give_up, revive, tick};
