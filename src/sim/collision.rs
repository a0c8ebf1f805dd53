//! Collision detection for boxes
//!
//! Pure tests only; the physics and tick modules decide what a hit does.

use super::boss::Boss;
use super::rect::Rect;
use super::state::{BossId, Enemy, Platform, Player};
use crate::tuning::ViewTuning;

/// What a bullet hit this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletTarget {
    Boss(BossId),
    /// Index into the enemy list
    Enemy(usize),
}

/// Would a player at `body` (already moved this tick, falling at `vel_y`)
/// land on `platform`?
///
/// Only falling bodies land, and only if the bottom edge is inside the
/// platform band extended by this tick's fall distance (swept test).
pub fn lands_on(body: &Rect, vel_y: f32, platform: &Rect) -> bool {
    vel_y >= 0.0
        && body.overlaps_x(platform)
        && body.bottom() >= platform.top()
        && body.bottom() <= platform.bottom() + vel_y
}

/// Snap the player onto any platform it lands on. Platforms resolve
/// independently in order, so the last match wins.
/// Returns the index of the platform the player ended up on.
pub fn resolve_platform_landing(player: &mut Player, platforms: &[Platform]) -> Option<usize> {
    let mut landed = None;
    for (i, platform) in platforms.iter().enumerate() {
        if lands_on(&player.rect(), player.vel.y, &platform.rect) {
            player.pos.y = platform.rect.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
            landed = Some(i);
        }
    }
    landed
}

/// First target a bullet overlaps: the active boss is checked before
/// enemies, and at most one target is reported.
pub fn bullet_target(bullet: &Rect, boss: Option<&Boss>, enemies: &[Enemy]) -> Option<BulletTarget> {
    if let Some(boss) = boss.filter(|b| b.active) {
        if bullet.overlaps(&boss.rect()) {
            return Some(BulletTarget::Boss(boss.id));
        }
    }
    // Newest enemies first
    enemies
        .iter()
        .enumerate()
        .rev()
        .find(|(_, e)| bullet.overlaps(&e.rect))
        .map(|(i, _)| BulletTarget::Enemy(i))
}

/// True once a bullet is further than `bullet_margin` outside the view
pub fn bullet_out_of_view(bullet: &Rect, camera_y: f32, view: &ViewTuning) -> bool {
    let screen = bullet.to_screen(camera_y);
    let m = view.bullet_margin;
    screen.pos.x < -m || screen.pos.x > view.width + m || screen.pos.y < -m || screen.pos.y > view.height + m
}
