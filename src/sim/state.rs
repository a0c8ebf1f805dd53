//! Game state and core simulation types
//!
//! All mutable run state lives in one `GameState` value so independent runs
//! (and tests) never share anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::camera;
use super::events::{GameEvent, SoundEffect};
use super::generator;
use super::rect::Rect;
use super::rng::RandomSource;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// World built, waiting for `start()`
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Defeated during the final boss fight; waiting for revive/give up
    RevivalPending,
    /// Run ended
    GameOver,
    /// Final boss defeated
    Cleared,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Cleared)
    }
}

/// Which boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossId {
    Boss1,
    Boss2,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub can_double_jump: bool,
    pub facing_right: bool,
    pub hp: i32,
    pub max_hp: i32,
    /// Remaining invincibility ticks (0 = vulnerable)
    pub invincible_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player.width, tuning.player.height),
            on_ground: false,
            can_double_jump: true,
            facing_right: true,
            hp: tuning.player.max_hp,
            max_hp: tuning.player.max_hp,
            invincible_ticks: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Apply contact damage and a knockback away from `source_x`.
    /// Returns false (and does nothing) while invincible.
    pub fn take_contact_hit(
        &mut self,
        damage: i32,
        source_x: f32,
        knockback: Vec2,
        invincible_ticks: u32,
    ) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.hp -= damage;
        self.invincible_ticks = invincible_ticks;
        self.vel.y = knockback.y;
        self.vel.x = if self.pos.x < source_x {
            -knockback.x
        } else {
            knockback.x
        };
        true
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Stand on top of `platform`, horizontally centred, at rest
    pub fn place_on(&mut self, platform: &Rect) {
        self.pos = Vec2::new(
            platform.center().x - self.size.x / 2.0,
            platform.top() - self.size.y,
        );
        self.vel = Vec2::ZERO;
        self.on_ground = true;
    }
}

/// A static platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Palette index for the renderer
    pub color: u8,
    /// Set on platforms built as part of a boss arena
    pub arena: Option<BossId>,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Left edge of the parent platform
    pub patrol_left: f32,
    /// Right edge of the parent platform
    pub patrol_right: f32,
    pub speed: f32,
    /// `1.0` (right) or `-1.0` (left)
    pub direction: f32,
}

/// A player bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Top-left corner of the bullet box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.size))
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Placed on platforms; grants ammo
    Ammo,
    /// Dropped by bosses; falls and restores hp
    Heal,
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub rect: Rect,
    /// Vertical fall speed per tick (0 for ammo)
    pub fall_speed: f32,
}

/// One-shot progression flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFlags {
    pub boss1_spawned: bool,
    pub boss1_defeated: bool,
    pub boss2_spawned: bool,
    pub boss2_defeated: bool,
}

impl StageFlags {
    /// Frontier generation runs before Boss 1 and between the two fights
    pub fn generation_allowed(&self) -> bool {
        !self.boss1_spawned || (self.boss1_defeated && !self.boss2_spawned)
    }

    /// The boss currently being fought, if any
    pub fn active_fight(&self) -> Option<BossId> {
        if self.boss2_spawned && !self.boss2_defeated {
            Some(BossId::Boss2)
        } else if self.boss1_spawned && !self.boss1_defeated {
            Some(BossId::Boss1)
        } else {
            None
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Every platform ever generated (never pruned)
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub pickups: Vec<Pickup>,
    pub boss1: Boss,
    pub boss2: Boss,
    /// World y of the top of the view (0 at start, negative going up)
    pub camera_y: f32,
    /// Height score, monotonic within a run
    pub score: u32,
    /// High score before this run started
    pub best_score: u32,
    pub ammo: u32,
    /// Unlocked permanently by defeating Boss 1
    pub full_auto: bool,
    /// Ticks until the fire gate reopens
    pub fire_cooldown: u32,
    pub stage: StageFlags,
    /// Index into `platforms` of Boss 2's arena ground platform
    pub revival_platform: Option<usize>,
    /// The one continue of the run has been spent
    pub revival_used: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh run: start platform, initial platforms, player
    pub fn new(tuning: Tuning, best_score: u32, rng: &mut dyn RandomSource) -> Self {
        let view = &tuning.view;
        let world = &tuning.world;
        let spawn = Vec2::new(
            view.width / 2.0 - tuning.player.width / 2.0,
            view.height - world.player_spawn_offset,
        );
        let player = Player::new(spawn, &tuning);
        let boss1 = Boss::new(BossId::Boss1, &tuning.bosses.boss1);
        let boss2 = Boss::new(BossId::Boss2, &tuning.bosses.boss2);

        let mut state = Self {
            tuning,
            phase: GamePhase::Ready,
            time_ticks: 0,
            player,
            platforms: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            pickups: Vec::new(),
            boss1,
            boss2,
            camera_y: 0.0,
            score: 0,
            best_score,
            ammo: 0,
            full_auto: false,
            fire_cooldown: 0,
            stage: StageFlags::default(),
            revival_platform: None,
            revival_used: false,
            events: Vec::new(),
        };

        generator::build_initial_world(&mut state, rng);
        state
    }

    pub fn boss(&self, id: BossId) -> &Boss {
        match id {
            BossId::Boss1 => &self.boss1,
            BossId::Boss2 => &self.boss2,
        }
    }

    /// The active boss, if a fight is on
    pub fn active_boss(&self) -> Option<&Boss> {
        [&self.boss1, &self.boss2].into_iter().find(|b| b.active)
    }

    /// Topmost platform top edge (the frontier)
    pub fn frontier_y(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(|p| p.rect.top())
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Player y relative to the top of the view
    pub fn player_screen_y(&self) -> f32 {
        self.player.pos.y - self.camera_y
    }

    /// Score ceiling for the current stage
    pub fn score_ceiling(&self) -> u32 {
        camera::score_ceiling(&self.stage, &self.tuning)
    }

    /// Ammo is unlimited from Boss 1's spawn onward and with full-auto
    pub fn ammo_unlimited(&self) -> bool {
        self.stage.boss1_spawned || self.full_auto
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::Sound(effect));
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::PcgSource;

    #[test]
    fn test_new_state_layout() {
        let mut rng = PcgSource::new(1);
        let state = GameState::new(Tuning::default(), 42, &mut rng);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.platforms.len(), 20);
        assert_eq!(state.best_score, 42);
        assert_eq!(state.score, 0);
        assert_eq!(state.camera_y, 0.0);
        assert_eq!(state.player.hp, 10);
        assert!(state.active_boss().is_none());
        assert!(state.stage.generation_allowed());
    }

    #[test]
    fn test_contact_hit_respects_invincibility() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(100.0, 0.0), &tuning);
        assert!(player.take_contact_hit(2, 200.0, Vec2::new(8.0, -10.0), 90));
        assert_eq!(player.hp, 8);
        assert_eq!(player.vel, Vec2::new(-8.0, -10.0));
        assert!(!player.take_contact_hit(2, 200.0, Vec2::new(8.0, -10.0), 90));
        assert_eq!(player.hp, 8);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.hp = 9;
        player.heal(2);
        assert_eq!(player.hp, 10);
    }

    #[test]
    fn test_stage_flags() {
        let mut flags = StageFlags::default();
        assert_eq!(flags.active_fight(), None);
        flags.boss1_spawned = true;
        assert!(!flags.generation_allowed());
        assert_eq!(flags.active_fight(), Some(BossId::Boss1));
        flags.boss1_defeated = true;
        assert!(flags.generation_allowed());
        flags.boss2_spawned = true;
        assert!(!flags.generation_allowed());
        assert_eq!(flags.active_fight(), Some(BossId::Boss2));
    }
}
