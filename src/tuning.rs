//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from a JSON
//! file without touching the simulation. `Tuning::default()` reproduces the
//! shipped balance.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::boss::BossParams;

/// View and camera geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    /// World/viewport width (horizontal wrap and clamp bounds)
    pub width: f32,
    /// Viewport height
    pub height: f32,
    /// Camera follows upward once the player is above `height * upper_line`
    pub upper_line: f32,
    /// Camera follows downward once the player is below `height * lower_line`
    pub lower_line: f32,
    /// Game over once the player is this far below the bottom of the view
    pub fall_margin: f32,
    /// Enemies and ammo items this far below the view are pruned
    pub prune_margin: f32,
    /// Heal items this far below the view are pruned
    pub heal_prune_margin: f32,
    /// Bullets this far outside the view are removed
    pub bullet_margin: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            upper_line: 1.0 / 2.5,
            lower_line: 1.0 / 1.5,
            fall_margin: 100.0,
            prune_margin: 500.0,
            heal_prune_margin: 100.0,
            bullet_margin: 50.0,
        }
    }
}

/// Player movement and damage response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Vertical velocity set on jump (negative is up)
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Horizontal velocity multiplier applied each tick without input
    pub friction: f32,
    pub max_hp: i32,
    /// Invincibility granted by any contact hit
    pub invincible_ticks: u32,
    /// Invincibility granted by a revival
    pub revive_invincible_ticks: u32,
    pub enemy_damage: i32,
    pub enemy_knockback_x: f32,
    pub enemy_knockback_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 50.0,
            speed: 8.0,
            jump_velocity: -18.0,
            gravity: 0.6,
            friction: 0.85,
            max_hp: 10,
            invincible_ticks: 90,
            revive_invincible_ticks: 180,
            enemy_damage: 1,
            enemy_knockback_x: 8.0,
            enemy_knockback_y: -10.0,
        }
    }
}

/// Shooting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub bullet_speed: f32,
    pub bullet_size: f32,
    /// Fire gate in ticks (200 ms at 60 Hz)
    pub cooldown_ticks: u32,
    /// Fire gate once full-auto is unlocked (80 ms at 60 Hz)
    pub full_auto_cooldown_ticks: u32,
    pub ammo_per_pickup: u32,
    /// Damage dealt to a boss per bullet
    pub boss_damage: i32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            bullet_speed: 15.0,
            bullet_size: 8.0,
            cooldown_ticks: 12,
            full_auto_cooldown_ticks: 5,
            ammo_per_pickup: 5,
            boss_damage: 10,
        }
    }
}

/// Procedural platform, enemy and pickup generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    /// Number of palette entries platforms pick a color tag from
    pub palette_size: u8,
    pub enemy_chance: f32,
    /// Platforms narrower than this never carry an enemy
    pub enemy_min_platform_width: f32,
    pub enemy_size: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub ammo_chance: f32,
    pub ammo_item_size: f32,
    pub heal_item_size: f32,
    pub heal_fall_speed: f32,
    pub heal_amount: i32,
    /// Vertical gap between the frontier and the next platform (min)
    pub min_gap: f32,
    /// Vertical gap between the frontier and the next platform (max)
    pub max_gap: f32,
    /// Generate while the frontier is less than this above the view top
    pub trigger_distance: f32,
    pub start_platform_width: f32,
    pub start_platform_height: f32,
    /// Start platform sits this far above the bottom of the view
    pub start_platform_offset: f32,
    /// Player spawns this far above the bottom of the view
    pub player_spawn_offset: f32,
    /// Platforms in the initial world, including the start platform
    pub initial_platforms: u32,
    pub initial_spacing: f32,
    /// The first N generated platforms never carry enemies
    pub safe_platforms: u32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            platform_min_width: 80.0,
            platform_max_width: 200.0,
            platform_height: 15.0,
            palette_size: 8,
            enemy_chance: 0.3,
            enemy_min_platform_width: 100.0,
            enemy_size: 50.0,
            enemy_min_speed: 1.0,
            enemy_max_speed: 2.5,
            ammo_chance: 0.4,
            ammo_item_size: 25.0,
            heal_item_size: 20.0,
            heal_fall_speed: 2.0,
            heal_amount: 2,
            min_gap: 100.0,
            max_gap: 150.0,
            trigger_distance: 200.0,
            start_platform_width: 300.0,
            start_platform_height: 20.0,
            start_platform_offset: 100.0,
            player_spawn_offset: 160.0,
            initial_platforms: 20,
            initial_spacing: 120.0,
            safe_platforms: 3,
        }
    }
}

/// Score and boss triggers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressTuning {
    pub boss1_threshold: u32,
    pub boss2_threshold: u32,
    /// Each boss spawns at `threshold - trigger_margin`
    pub trigger_margin: u32,
    /// World units per score point
    pub score_divisor: f32,
    /// Boss arenas are built this far above the frontier
    pub arena_gap: f32,
}

impl Default for ProgressTuning {
    fn default() -> Self {
        Self {
            boss1_threshold: 350,
            boss2_threshold: 750,
            trigger_margin: 50,
            score_divisor: 10.0,
            arena_gap: 200.0,
        }
    }
}

/// Both boss parameter sets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub boss1: BossParams,
    pub boss2: BossParams,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            boss1: BossParams::boss1(),
            boss2: BossParams::boss2(),
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub view: ViewTuning,
    pub player: PlayerTuning,
    pub weapon: WeaponTuning,
    pub world: WorldTuning,
    pub progress: ProgressTuning,
    pub bosses: BossTuning,
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tuning file: {e}"),
            Self::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

impl Tuning {
    /// Parse and validate a JSON document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read a tuning file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let v = &self.view;
        if v.width <= 0.0 || v.height <= 0.0 {
            return Err(invalid("view", "width and height must be positive"));
        }
        if !(0.0..1.0).contains(&v.upper_line) || v.lower_line <= v.upper_line || v.lower_line > 1.0 {
            return Err(invalid("view.upper_line", "camera lines must satisfy 0 <= upper < lower <= 1"));
        }

        let p = &self.player;
        if p.width <= 0.0 || p.height <= 0.0 {
            return Err(invalid("player", "size must be positive"));
        }
        if p.max_hp <= 0 {
            return Err(invalid("player.max_hp", "must be positive"));
        }
        if !(0.0..=1.0).contains(&p.friction) {
            return Err(invalid("player.friction", "must be within [0, 1]"));
        }

        let w = &self.world;
        if w.platform_min_width <= 0.0 || w.platform_max_width < w.platform_min_width {
            return Err(invalid("world.platform_min_width", "width range is empty or non-positive"));
        }
        if w.platform_min_width > v.width {
            return Err(invalid("world.platform_min_width", "platforms cannot fit in the view"));
        }
        if w.min_gap <= 0.0 || w.max_gap < w.min_gap {
            return Err(invalid("world.min_gap", "gap range is empty or non-positive"));
        }
        if w.enemy_min_speed < 0.0 || w.enemy_max_speed < w.enemy_min_speed {
            return Err(invalid("world.enemy_min_speed", "speed range is empty or negative"));
        }
        if w.palette_size == 0 {
            return Err(invalid("world.palette_size", "must be at least 1"));
        }

        let g = &self.progress;
        if g.score_divisor <= 0.0 {
            return Err(invalid("progress.score_divisor", "must be positive"));
        }
        if g.boss2_threshold <= g.boss1_threshold {
            return Err(invalid("progress.boss2_threshold", "must exceed boss1_threshold"));
        }
        if g.trigger_margin > g.boss1_threshold {
            return Err(invalid("progress.trigger_margin", "must not exceed boss1_threshold"));
        }

        for params in [&self.bosses.boss1, &self.bosses.boss2] {
            if params.max_hp <= 0 {
                return Err(invalid("bosses.max_hp", "must be positive"));
            }
            if params.size + 2.0 * params.edge_margin > v.width {
                return Err(invalid("bosses.size", "boss does not fit in the view"));
            }
        }

        if self.weapon.bullet_size <= 0.0 {
            return Err(invalid("weapon.bullet_size", "must be positive"));
        }

        Ok(())
    }

    /// Score at which the given boss spawns
    pub fn boss_trigger_score(&self, threshold: u32) -> u32 {
        threshold.saturating_sub(self.progress.trigger_margin)
    }
}
