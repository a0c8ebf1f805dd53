//! Per-tick integration of the moving entities
//!
//! Constant-per-tick velocities, no dt scaling.

use glam::Vec2;

use super::collision::{self, BulletTarget};
use super::events::SoundEffect;
use super::pools;
use super::rng::RandomSource;
use super::state::{BossId, GameState};
use super::tick::TickInput;

/// Horizontal control, jump, gravity, wrap and platform landing
pub fn step_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning.player;
    let view_width = state.tuning.view.width;
    let player = &mut state.player;

    if input.left {
        player.vel.x = -tuning.speed;
        player.facing_right = false;
    } else if input.right {
        player.vel.x = tuning.speed;
        player.facing_right = true;
    } else {
        player.vel.x *= tuning.friction;
    }

    let mut jumped = false;
    if input.jump {
        if player.on_ground {
            player.vel.y = tuning.jump_velocity;
            player.on_ground = false;
            player.can_double_jump = true;
            jumped = true;
        } else if player.can_double_jump {
            player.vel.y = tuning.jump_velocity;
            player.can_double_jump = false;
            jumped = true;
        }
    }

    player.vel.y += tuning.gravity;
    player.pos += player.vel;

    // Wrap around the side edges
    if player.pos.x + player.size.x < 0.0 {
        player.pos.x = view_width;
    } else if player.pos.x > view_width {
        player.pos.x = -player.size.x;
    }

    player.on_ground = false;
    if collision::resolve_platform_landing(player, &state.platforms).is_some() {
        player.can_double_jump = true;
    }

    if jumped {
        state.sound(SoundEffect::Jump);
    }
}

/// Patrol every enemy along its platform, then apply contact damage
pub fn step_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.rect.pos.x += enemy.speed * enemy.direction;
        if enemy.rect.left() <= enemy.patrol_left {
            enemy.rect.pos.x = enemy.patrol_left;
            enemy.direction = 1.0;
        } else if enemy.rect.right() >= enemy.patrol_right {
            enemy.rect.pos.x = enemy.patrol_right - enemy.rect.size.x;
            enemy.direction = -1.0;
        }
    }

    let tuning = &state.tuning.player;
    let knockback = Vec2::new(tuning.enemy_knockback_x, tuning.enemy_knockback_y);
    let body = state.player.rect();
    let mut hit = false;
    for enemy in &state.enemies {
        if body.overlaps(&enemy.rect)
            && state.player.take_contact_hit(
                tuning.enemy_damage,
                enemy.rect.pos.x,
                knockback,
                tuning.invincible_ticks,
            )
        {
            hit = true;
        }
    }
    if hit {
        state.sound(SoundEffect::Damage);
    }
}

/// Advance the active boss's attack machine and apply contact damage
pub fn step_bosses(state: &mut GameState, rng: &mut dyn RandomSource) {
    let body = state.player.rect();
    let view_width = state.tuning.view.width;
    let invincible_ticks = state.tuning.player.invincible_ticks;

    for id in [BossId::Boss1, BossId::Boss2] {
        let (boss, params) = match id {
            BossId::Boss1 => (&mut state.boss1, &state.tuning.bosses.boss1),
            BossId::Boss2 => (&mut state.boss2, &state.tuning.bosses.boss2),
        };
        if !boss.active {
            continue;
        }
        boss.update(params, &body, view_width, rng);

        if body.overlaps(&boss.rect())
            && state.player.take_contact_hit(
                boss.contact_damage(params),
                boss.center_x(),
                Vec2::new(params.knockback_x, params.knockback_y),
                invincible_ticks,
            )
        {
            log::debug!("{:?} contact, player hp {}", id, state.player.hp);
            state.sound(SoundEffect::Damage);
        }
    }
}

/// Result of moving the bullets for one tick
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BulletReport {
    /// Bosses brought to zero hp this tick
    pub defeated: Vec<BossId>,
    pub enemies_killed: u32,
}

/// Move bullets, cull the ones that left the view, and resolve hits.
/// Each bullet hits at most one target; the active boss takes priority.
pub fn step_bullets(state: &mut GameState, rng: &mut dyn RandomSource) -> BulletReport {
    let mut report = BulletReport::default();
    let damage = state.tuning.weapon.boss_damage;

    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = &mut state.bullets[i];
        bullet.pos += bullet.vel;
        let rect = bullet.rect();

        if collision::bullet_out_of_view(&rect, state.camera_y, &state.tuning.view) {
            state.bullets.remove(i);
            continue;
        }

        match collision::bullet_target(&rect, state.active_boss(), &state.enemies) {
            Some(BulletTarget::Boss(id)) => {
                state.bullets.remove(i);
                let (boss, chance) = match id {
                    BossId::Boss1 => (&mut state.boss1, state.tuning.bosses.boss1.heal_drop_chance),
                    BossId::Boss2 => (&mut state.boss2, state.tuning.bosses.boss2.heal_drop_chance),
                };
                let defeated = boss.take_hit(damage);
                let boss_rect = boss.rect();
                state.sound(SoundEffect::Hit);
                pools::drop_heal(state, &boss_rect, chance, rng);
                if defeated {
                    report.defeated.push(id);
                }
            }
            Some(BulletTarget::Enemy(e)) => {
                state.bullets.remove(i);
                state.enemies.remove(e);
                report.enemies_killed += 1;
            }
            None => i += 1,
        }
    }
    report
}
