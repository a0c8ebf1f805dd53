//! Boss attack state machine
//!
//! Both bosses run the same four-state machine
//! (`Hover -> {Dive | Sweep | Slam} -> Hover`). Everything that differs
//! between them (timers, amplitudes, damage) is a `BossParams` value.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::rng::RandomSource;
use super::state::BossId;

/// Current attack pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackPattern {
    /// Bob around the base altitude and drift toward the player
    #[default]
    Hover,
    /// Rise, aim, then fly along a fixed velocity toward the player
    Dive,
    /// Parametric figure-eight across the arena
    Sweep,
    /// Track above the player, wind up, slam down, hold, rise
    Slam,
}

/// Dive timing (ticks since the attack started)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiveParams {
    /// Rise until this tick
    pub rise_end: u32,
    pub rise_speed: f32,
    /// Aim (compute the dive velocity) until this tick
    pub aim_end: u32,
    /// Horizontal velocity = horizontal distance to player * aim_gain
    pub aim_gain: f32,
    pub dive_speed: f32,
    /// Travel until this tick, then return to hover
    pub dive_end: u32,
}

/// Sweep path: `x = mid + sin(t) * half_width * width_factor`,
/// `y = base + sin(t * vertical_freq + vertical_phase) * height / 2`,
/// with `t = progress * turns * PI`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepParams {
    pub duration: u32,
    pub turns: f32,
    /// Horizontal room kept free on the arena edges (total)
    pub side_margin: f32,
    pub width_factor: f32,
    pub height: f32,
    pub vertical_freq: f32,
    pub vertical_phase: f32,
}

/// Slam timing (ticks since the attack started)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlamParams {
    /// Track above the player until this tick
    pub track_end: u32,
    pub track_gain: f32,
    /// Height above the base altitude while tracking
    pub lift: f32,
    /// Jitter in place until this tick
    pub windup_end: u32,
    pub jitter: f32,
    /// Upward creep per tick during wind-up
    pub windup_rise: f32,
    /// Slam down until this tick
    pub slam_end: u32,
    pub slam_speed: f32,
    /// Hold position until this tick
    pub hold_end: u32,
    /// Rise back until this tick, then return to hover
    pub rise_end: u32,
    pub rise_speed: f32,
}

/// Per-boss tuning. Overriding a boss in a tuning file replaces the whole
/// parameter set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossParams {
    pub max_hp: i32,
    pub size: f32,
    /// Spawn altitude above the arena ground platform
    pub spawn_height: f32,
    /// Minimum distance kept from the left/right view edges
    pub edge_margin: f32,

    /// Hover phase advance per tick
    pub hover_step: f32,
    pub hover_sway_freq: f32,
    pub hover_sway_amp: f32,
    pub hover_bob_amp: f32,
    pub drift_speed: f32,

    pub speed_mult: f32,
    pub enraged_speed_mult: f32,
    pub attack_interval: u32,
    pub enraged_attack_interval: u32,
    /// Extra chance of forcing a slam when enraged
    pub enraged_slam_chance: f32,

    pub dive: DiveParams,
    pub sweep: SweepParams,
    pub slam: SlamParams,

    pub contact_damage: i32,
    pub slam_damage: i32,
    pub knockback_x: f32,
    pub knockback_y: f32,
    pub heal_drop_chance: f32,
}

impl BossParams {
    pub fn boss1() -> Self {
        Self {
            max_hp: 1000,
            size: 150.0,
            spawn_height: 350.0,
            edge_margin: 10.0,
            hover_step: 0.03,
            hover_sway_freq: 1.5,
            hover_sway_amp: 2.0,
            hover_bob_amp: 40.0,
            drift_speed: 0.5,
            speed_mult: 1.0,
            enraged_speed_mult: 1.8,
            attack_interval: 200,
            enraged_attack_interval: 100,
            enraged_slam_chance: 0.3,
            dive: DiveParams {
                rise_end: 30,
                rise_speed: 6.0,
                aim_end: 35,
                aim_gain: 0.1,
                dive_speed: 12.0,
                dive_end: 70,
            },
            sweep: SweepParams {
                duration: 120,
                turns: 2.0,
                side_margin: 100.0,
                width_factor: 0.8,
                height: 300.0,
                vertical_freq: 2.0,
                vertical_phase: 0.0,
            },
            slam: SlamParams {
                track_end: 40,
                track_gain: 0.08,
                lift: 100.0,
                windup_end: 45,
                jitter: 10.0,
                windup_rise: 0.0,
                slam_end: 65,
                slam_speed: 18.0,
                hold_end: 90,
                rise_end: 120,
                rise_speed: 8.0,
            },
            contact_damage: 2,
            slam_damage: 3,
            knockback_x: 15.0,
            knockback_y: -18.0,
            heal_drop_chance: 0.15,
        }
    }

    pub fn boss2() -> Self {
        Self {
            max_hp: 3000,
            size: 250.0,
            spawn_height: 400.0,
            edge_margin: 10.0,
            hover_step: 0.04,
            hover_sway_freq: 2.0,
            hover_sway_amp: 3.0,
            hover_bob_amp: 50.0,
            drift_speed: 1.0,
            speed_mult: 1.3,
            enraged_speed_mult: 2.5,
            attack_interval: 120,
            enraged_attack_interval: 60,
            enraged_slam_chance: 0.4,
            dive: DiveParams {
                rise_end: 25,
                rise_speed: 8.0,
                aim_end: 30,
                aim_gain: 0.12,
                dive_speed: 16.0,
                dive_end: 60,
            },
            sweep: SweepParams {
                duration: 100,
                turns: 3.0,
                side_margin: 60.0,
                width_factor: 0.85,
                height: 400.0,
                vertical_freq: 1.5,
                vertical_phase: FRAC_PI_2,
            },
            slam: SlamParams {
                track_end: 35,
                track_gain: 0.1,
                lift: 150.0,
                windup_end: 42,
                jitter: 15.0,
                windup_rise: 3.0,
                slam_end: 55,
                slam_speed: 25.0,
                hold_end: 85,
                rise_end: 110,
                rise_speed: 10.0,
            },
            contact_damage: 4,
            slam_damage: 6,
            knockback_x: 18.0,
            knockback_y: -20.0,
            heal_drop_chance: 0.15 * 1.5,
        }
    }
}

/// A boss instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: BossId,
    /// Top-left corner in world space
    pub pos: Vec2,
    /// Hover altitude; every attack returns here
    pub base_y: f32,
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub active: bool,
    pub pattern: AttackPattern,
    /// Ticks spent in the current pattern
    pub timer: u32,
    pub hover_angle: f32,
    /// Dive velocity, fixed when the dive is aimed
    pub vel: Vec2,
}

impl Boss {
    /// Create an inactive boss
    pub fn new(id: BossId, params: &BossParams) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            base_y: 0.0,
            size: Vec2::splat(params.size),
            hp: params.max_hp,
            max_hp: params.max_hp,
            active: false,
            pattern: AttackPattern::Hover,
            timer: 0,
            hover_angle: 0.0,
            vel: Vec2::ZERO,
        }
    }

    /// Activate at the given top-left position, hovering
    pub fn spawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.base_y = pos.y;
        self.hp = self.max_hp;
        self.active = true;
        self.pattern = AttackPattern::Hover;
        self.timer = 0;
        self.hover_angle = 0.0;
        self.vel = Vec2::ZERO;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// At or below half health
    pub fn is_enraged(&self) -> bool {
        self.hp * 2 <= self.max_hp
    }

    /// Contact damage for the current pattern
    pub fn contact_damage(&self, params: &BossParams) -> i32 {
        if self.pattern == AttackPattern::Slam {
            params.slam_damage
        } else {
            params.contact_damage
        }
    }

    /// Apply bullet damage; returns true if this hit defeated the boss
    pub fn take_hit(&mut self, damage: i32) -> bool {
        if !self.active {
            return false;
        }
        self.hp -= damage;
        if self.hp <= 0 {
            self.active = false;
            return true;
        }
        false
    }

    fn finish_attack(&mut self) {
        self.pattern = AttackPattern::Hover;
        self.timer = 0;
        self.pos.y = self.base_y;
    }

    /// Advance one tick; returns the newly selected attack, if any
    pub fn update(
        &mut self,
        params: &BossParams,
        player: &Rect,
        view_width: f32,
        rng: &mut dyn RandomSource,
    ) -> Option<AttackPattern> {
        if !self.active {
            return None;
        }

        let enraged = self.is_enraged();
        let mult = if enraged {
            params.enraged_speed_mult
        } else {
            params.speed_mult
        };
        let interval = if enraged {
            params.enraged_attack_interval
        } else {
            params.attack_interval
        };

        self.timer += 1;
        self.hover_angle += params.hover_step;
        let player_cx = player.center().x;
        let mut selected = None;

        match self.pattern {
            AttackPattern::Hover => {
                self.pos.x +=
                    (self.hover_angle * params.hover_sway_freq).sin() * params.hover_sway_amp * mult;
                self.pos.y = self.base_y + self.hover_angle.sin() * params.hover_bob_amp;

                let toward = if player_cx > self.center_x() { 1.0 } else { -1.0 };
                self.pos.x += toward * params.drift_speed * mult;

                if self.timer >= interval {
                    self.timer = 0;
                    let mut next = match rng.index(3) {
                        0 => AttackPattern::Dive,
                        1 => AttackPattern::Sweep,
                        _ => AttackPattern::Slam,
                    };
                    if enraged && rng.chance(params.enraged_slam_chance) {
                        next = AttackPattern::Slam;
                    }
                    self.pattern = next;
                    selected = Some(next);
                }
            }

            AttackPattern::Dive => {
                let d = &params.dive;
                if self.timer < d.rise_end {
                    self.pos.y -= d.rise_speed * mult;
                } else if self.timer < d.aim_end {
                    self.vel = Vec2::new(
                        (player_cx - self.center_x()) * d.aim_gain * mult,
                        d.dive_speed * mult,
                    );
                } else if self.timer < d.dive_end {
                    self.pos += self.vel;
                } else {
                    self.finish_attack();
                }
            }

            AttackPattern::Sweep => {
                let s = &params.sweep;
                let progress = self.timer as f32 / s.duration.max(1) as f32;
                if progress < 1.0 {
                    let t = progress * s.turns * PI;
                    let arena_width = view_width - self.size.x - s.side_margin;
                    self.pos.x = (view_width - self.size.x) / 2.0
                        + t.sin() * (arena_width / 2.0) * s.width_factor;
                    self.pos.y = self.base_y
                        + (t * s.vertical_freq + s.vertical_phase).sin() * s.height / 2.0;
                } else {
                    self.finish_attack();
                }
            }

            AttackPattern::Slam => {
                let s = &params.slam;
                if self.timer < s.track_end {
                    let target_x = player_cx - self.size.x / 2.0;
                    self.pos.x += (target_x - self.pos.x) * s.track_gain;
                    self.pos.y = self.base_y - s.lift;
                } else if self.timer < s.windup_end {
                    self.pos.x += (rng.unit() - 0.5) * s.jitter;
                    self.pos.y -= s.windup_rise;
                } else if self.timer < s.slam_end {
                    self.pos.y += s.slam_speed * mult;
                } else if self.timer < s.hold_end {
                    // hold
                } else if self.timer < s.rise_end {
                    self.pos.y -= s.rise_speed;
                } else {
                    self.finish_attack();
                }
            }
        }

        let min_x = params.edge_margin;
        let max_x = view_width - params.edge_margin - self.size.x;
        self.pos.x = self.pos.x.clamp(min_x, max_x.max(min_x));

        if let Some(pattern) = selected {
            log::debug!("{:?} selects {:?} (enraged: {})", self.id, pattern, enraged);
        }
        selected
    }
}
