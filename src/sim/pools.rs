//! Spawning, collection and culling for the short-lived entity pools
//!
//! Bullets, pickups and enemies come and go every few ticks; platforms are
//! never removed.

use glam::Vec2;

use super::events::SoundEffect;
use super::rect::Rect;
use super::rng::RandomSource;
use super::state::{Bullet, GameState, Pickup, PickupKind};
use super::tick::TickInput;

/// Advance the fire gate and shoot if the input asks for it.
/// Returns true if a bullet was spawned.
pub fn fire(state: &mut GameState, input: &TickInput) -> bool {
    state.fire_cooldown = state.fire_cooldown.saturating_sub(1);
    if state.fire_cooldown > 0 {
        return false;
    }

    let wants = input.fire || (input.fire_held && state.full_auto);
    if !wants {
        return false;
    }

    let unlimited = state.ammo_unlimited();
    if !unlimited && state.ammo == 0 {
        return false;
    }

    let weapon = &state.tuning.weapon;
    let origin = state.player.center();
    let target = Vec2::new(input.aim.x, input.aim.y + state.camera_y);
    let delta = target - origin;
    let angle = delta.y.atan2(delta.x);
    let vel = Vec2::new(angle.cos(), angle.sin()) * weapon.bullet_speed;

    state.bullets.push(Bullet {
        pos: origin - Vec2::splat(weapon.bullet_size / 2.0),
        vel,
        size: weapon.bullet_size,
    });
    state.fire_cooldown = if state.full_auto {
        weapon.full_auto_cooldown_ticks
    } else {
        weapon.cooldown_ticks
    };
    if !unlimited {
        state.ammo -= 1;
    }
    state.sound(SoundEffect::Shoot);
    true
}

/// Maybe drop a heal item from the bottom centre of a damaged boss
pub fn drop_heal(state: &mut GameState, boss: &Rect, chance: f32, rng: &mut dyn RandomSource) {
    if !rng.chance(chance) {
        return;
    }
    let world = &state.tuning.world;
    let size = world.heal_item_size;
    state.pickups.push(Pickup {
        kind: PickupKind::Heal,
        rect: Rect::new(boss.center().x - size / 2.0, boss.bottom(), size, size),
        fall_speed: world.heal_fall_speed,
    });
}

/// Heal items fall at a constant speed
pub fn step_heal_items(state: &mut GameState) {
    for item in state.pickups.iter_mut().filter(|p| p.kind == PickupKind::Heal) {
        item.rect.pos.y += item.fall_speed;
    }
}

/// Collect every pickup the player overlaps
pub fn collect_pickups(state: &mut GameState) {
    let body = state.player.rect();
    let mut ammo = 0;
    let mut heals = 0;
    state.pickups.retain(|p| {
        if !body.overlaps(&p.rect) {
            return true;
        }
        match p.kind {
            PickupKind::Ammo => ammo += 1,
            PickupKind::Heal => heals += 1,
        }
        false
    });

    if ammo > 0 {
        state.ammo += ammo * state.tuning.weapon.ammo_per_pickup;
    }
    for _ in 0..heals {
        state.player.heal(state.tuning.world.heal_amount);
        state.sound(SoundEffect::Heal);
    }
}

/// Drop enemies and pickups that are far enough below the view
pub fn prune(state: &mut GameState) {
    let view = &state.tuning.view;
    let camera_y = state.camera_y;
    let far_below = view.height + view.prune_margin;
    let heal_below = view.height + view.heal_prune_margin;

    state.enemies.retain(|e| e.rect.top() - camera_y < far_below);
    state.pickups.retain(|p| {
        let screen_y = p.rect.top() - camera_y;
        match p.kind {
            PickupKind::Ammo => screen_y < far_below,
            PickupKind::Heal => screen_y <= heal_below,
        }
    });
}
