//! Procedural world generation
//!
//! Traversal platforms are generated one at a time above the frontier as the
//! camera climbs. Boss arenas are fixed layouts inserted once per boss.

use glam::Vec2;

use super::rect::Rect;
use super::rng::RandomSource;
use super::state::{BossId, Enemy, GameState, Pickup, PickupKind, Platform};

/// Add one traversal platform at world height `y`, possibly carrying an
/// enemy and/or an ammo pickup. Returns the platform's index.
pub fn generate_platform(
    state: &mut GameState,
    y: f32,
    can_spawn_enemy: bool,
    rng: &mut dyn RandomSource,
) -> usize {
    let view_width = state.tuning.view.width;
    let world = &state.tuning.world;

    // Clamp the range here so later collision code never sees a degenerate box
    let max_width = world.platform_max_width.min(view_width);
    let min_width = world.platform_min_width.min(max_width);
    let width = rng.range(min_width, max_width);
    let x = rng.unit() * (view_width - width).max(0.0);
    let color = rng.index(world.palette_size.max(1) as usize) as u8;

    let rect = Rect::new(x, y, width, world.platform_height);

    let enemy = if can_spawn_enemy
        && rng.chance(world.enemy_chance)
        && width >= world.enemy_min_platform_width
    {
        let size = world.enemy_size;
        let speed = rng.range(world.enemy_min_speed, world.enemy_max_speed);
        let direction = rng.sign();
        Some(Enemy {
            rect: Rect::new(rect.center().x - size / 2.0, rect.top() - size, size, size),
            patrol_left: rect.left(),
            patrol_right: rect.right(),
            speed,
            direction,
        })
    } else {
        None
    };

    let ammo = if rng.chance(world.ammo_chance) {
        let size = world.ammo_item_size;
        let item_x = rect.left() + rng.unit() * (width - size).max(0.0);
        Some(Pickup {
            kind: PickupKind::Ammo,
            rect: Rect::new(item_x, rect.top() - size, size, size),
            fall_speed: 0.0,
        })
    } else {
        None
    };

    state.platforms.push(Platform {
        rect,
        color,
        arena: None,
    });
    state.enemies.extend(enemy);
    state.pickups.extend(ammo);

    state.platforms.len() - 1
}

/// Start platform plus the first stack of generated platforms
pub fn build_initial_world(state: &mut GameState, rng: &mut dyn RandomSource) {
    let view = state.tuning.view.clone();
    let world = state.tuning.world.clone();

    let base_y = view.height - world.start_platform_offset;
    let start_width = world.start_platform_width.min(view.width);
    state.platforms.push(Platform {
        rect: Rect::new(
            view.width / 2.0 - start_width / 2.0,
            base_y,
            start_width,
            world.start_platform_height,
        ),
        color: 0,
        arena: None,
    });

    for i in 1..world.initial_platforms {
        let y = base_y - i as f32 * world.initial_spacing;
        generate_platform(state, y, i > world.safe_platforms, rng);
    }

    log::debug!("Initial world: {} platforms", state.platforms.len());
}

/// Generate one platform above the frontier if it is close to the camera
/// and the current stage allows it. Returns true if a platform was added.
pub fn extend_frontier(state: &mut GameState, rng: &mut dyn RandomSource) -> bool {
    if !state.stage.generation_allowed() {
        return false;
    }
    let Some(frontier) = state.frontier_y() else {
        return false;
    };
    let world = &state.tuning.world;
    if frontier - state.camera_y <= -world.trigger_distance {
        return false;
    }
    let y = frontier - rng.range(world.min_gap, world.max_gap);
    generate_platform(state, y, true, rng);
    true
}

/// One arena platform relative to the arena ground
struct ArenaSlot {
    x: f32,
    dy: f32,
    width: f32,
    height: f32,
    tier: u8,
}

fn slot(x: f32, dy: f32, width: f32, height: f32, tier: u8) -> ArenaSlot {
    ArenaSlot {
        x,
        dy,
        width,
        height,
        tier,
    }
}

/// Symmetric arena layouts; the first slot is the ground platform
fn arena_layout(boss: BossId, w: f32) -> Vec<ArenaSlot> {
    match boss {
        BossId::Boss1 => vec![
            slot(w / 2.0 - 300.0, 0.0, 600.0, 30.0, 0),
            slot(30.0, -150.0, 180.0, 20.0, 1),
            slot(w - 210.0, -150.0, 180.0, 20.0, 1),
            slot(w / 2.0 - 100.0, -300.0, 200.0, 20.0, 2),
            slot(60.0, -400.0, 150.0, 20.0, 2),
            slot(w - 210.0, -400.0, 150.0, 20.0, 2),
        ],
        BossId::Boss2 => vec![
            slot(w / 2.0 - 350.0, 0.0, 700.0, 30.0, 0),
            slot(20.0, -150.0, 160.0, 20.0, 1),
            slot(w - 180.0, -150.0, 160.0, 20.0, 1),
            slot(w / 2.0 - 120.0, -300.0, 240.0, 20.0, 2),
            slot(50.0, -450.0, 140.0, 20.0, 3),
            slot(w / 2.0 - 70.0, -450.0, 140.0, 20.0, 3),
            slot(w - 190.0, -450.0, 140.0, 20.0, 3),
        ],
    }
}

/// Insert a boss arena above the frontier. Returns the index of its ground
/// platform.
pub fn build_arena(state: &mut GameState, boss: BossId) -> usize {
    let view_width = state.tuning.view.width;
    let frontier = state.frontier_y().unwrap_or(state.camera_y);
    let ground_y = frontier - state.tuning.progress.arena_gap;

    let ground_index = state.platforms.len();
    for s in arena_layout(boss, view_width) {
        let width = s.width.min(view_width);
        let x = s.x.clamp(0.0, view_width - width);
        state.platforms.push(Platform {
            rect: Rect::new(x, ground_y + s.dy, width, s.height),
            color: s.tier,
            arena: Some(boss),
        });
    }

    log::info!(
        "{:?} arena built at y={:.0} ({} platforms)",
        boss,
        ground_y,
        state.platforms.len() - ground_index
    );
    ground_index
}

/// Spawn position (top-left) for a boss hovering above its arena ground
pub fn boss_spawn_pos(state: &GameState, boss: BossId, ground: &Rect) -> Vec2 {
    let params = match boss {
        BossId::Boss1 => &state.tuning.bosses.boss1,
        BossId::Boss2 => &state.tuning.bosses.boss2,
    };
    Vec2::new(
        state.tuning.view.width / 2.0 - params.size / 2.0,
        ground.top() - params.spawn_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgSource, ScriptedSource};
    use crate::tuning::Tuning;

    fn empty_state() -> GameState {
        let mut rng = PcgSource::new(3);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        state.platforms.clear();
        state.enemies.clear();
        state.pickups.clear();
        state
    }

    #[test]
    fn test_platform_with_enemy_and_ammo() {
        let mut state = empty_state();
        // width, x, color, enemy roll, enemy speed, enemy dir, ammo roll, ammo x
        let mut rng = ScriptedSource::new([0.5, 0.5, 0.0, 0.1, 0.0, 0.2, 0.1, 0.0], 0.5);
        generate_platform(&mut state, -100.0, true, &mut rng);

        let p = &state.platforms[0];
        assert_eq!(p.rect.size.x, 140.0);
        assert_eq!(p.rect.top(), -100.0);
        assert!(p.rect.left() >= 0.0 && p.rect.right() <= state.tuning.view.width);

        assert_eq!(state.enemies.len(), 1);
        let e = &state.enemies[0];
        assert_eq!(e.patrol_left, p.rect.left());
        assert_eq!(e.patrol_right, p.rect.right());
        assert_eq!(e.rect.bottom(), p.rect.top());
        assert_eq!(e.rect.center().x, p.rect.center().x);
        assert_eq!(e.speed, 1.0);
        assert_eq!(e.direction, 1.0);

        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].kind, PickupKind::Ammo);
        assert_eq!(state.pickups[0].rect.left(), p.rect.left());
        assert_eq!(state.pickups[0].rect.bottom(), p.rect.top());
    }

    #[test]
    fn test_narrow_platform_never_has_enemy() {
        let mut state = empty_state();
        // width 80 (< 100), enemy roll passes, ammo roll fails
        let mut rng = ScriptedSource::new([0.0, 0.5, 0.0, 0.0, 0.9], 0.9);
        generate_platform(&mut state, 0.0, true, &mut rng);
        assert!(state.enemies.is_empty());
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_enemy_suppressed_when_not_allowed() {
        let mut state = empty_state();
        let mut rng = ScriptedSource::constant(0.0);
        generate_platform(&mut state, 0.0, false, &mut rng);
        assert!(state.enemies.is_empty());
        assert_eq!(state.pickups.len(), 1);
    }

    #[test]
    fn test_degenerate_width_is_clamped() {
        let mut state = empty_state();
        state.tuning.view.width = 50.0;
        let mut rng = ScriptedSource::constant(0.7);
        generate_platform(&mut state, 0.0, true, &mut rng);
        let p = &state.platforms[0];
        assert_eq!(p.rect.size.x, 50.0);
        assert_eq!(p.rect.left(), 0.0);
    }

    #[test]
    fn test_initial_world() {
        let mut rng = PcgSource::new(11);
        let state = GameState::new(Tuning::default(), 0, &mut rng);
        let start = &state.platforms[0];
        assert_eq!(start.rect.size.x, 300.0);
        assert_eq!(start.rect.top(), 768.0 - 100.0);
        for (i, p) in state.platforms.iter().enumerate().skip(1) {
            assert_eq!(p.rect.top(), 668.0 - i as f32 * 120.0);
        }
        // No enemies on the first three generated platforms
        let lowest_allowed = 668.0 - 4.0 * 120.0;
        assert!(state.enemies.iter().all(|e| e.rect.bottom() <= lowest_allowed));
    }

    #[test]
    fn test_extend_frontier_respects_trigger_distance() {
        let mut rng = PcgSource::new(5);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        let frontier = state.frontier_y().unwrap();
        // Frontier is far above the camera at the start
        assert!(!extend_frontier(&mut state, &mut rng));

        state.camera_y = frontier + 100.0;
        let before = state.platforms.len();
        assert!(extend_frontier(&mut state, &mut rng));
        assert_eq!(state.platforms.len(), before + 1);
        let new_top = state.platforms.last().unwrap().rect.top();
        assert!(new_top <= frontier - 100.0 && new_top >= frontier - 150.0);
    }

    #[test]
    fn test_extend_frontier_halts_during_boss_fight() {
        let mut rng = PcgSource::new(5);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        state.camera_y = state.frontier_y().unwrap() + 100.0;
        state.stage.boss1_spawned = true;
        assert!(!extend_frontier(&mut state, &mut rng));
        state.stage.boss1_defeated = true;
        assert!(extend_frontier(&mut state, &mut rng));
    }

    #[test]
    fn test_arena_layout_is_symmetric() {
        let mut state = empty_state();
        state.platforms.push(Platform {
            rect: Rect::new(0.0, -1000.0, 100.0, 15.0),
            color: 0,
            arena: None,
        });
        let ground = build_arena(&mut state, BossId::Boss1);
        let w = state.tuning.view.width;
        let arena: Vec<_> = state.platforms[ground..].iter().collect();
        assert_eq!(arena.len(), 6);
        assert_eq!(arena[0].rect.top(), -1200.0);
        assert_eq!(arena[0].rect.center().x, w / 2.0);
        assert!(arena.iter().all(|p| p.arena == Some(BossId::Boss1)));
        // Mirror pairs on the middle tier
        let left = arena[1].rect;
        let right = arena[2].rect;
        assert_eq!(left.top(), right.top());
        assert!((left.left() - (w - right.right())).abs() < 1e-3);
    }

    #[test]
    fn test_boss2_arena_and_spawn() {
        let mut state = empty_state();
        state.platforms.push(Platform {
            rect: Rect::new(0.0, -5000.0, 100.0, 15.0),
            color: 0,
            arena: None,
        });
        let ground = build_arena(&mut state, BossId::Boss2);
        assert_eq!(state.platforms.len() - ground, 7);
        let ground_rect = state.platforms[ground].rect;
        assert_eq!(ground_rect.size.x, 700.0);
        let pos = boss_spawn_pos(&state, BossId::Boss2, &ground_rect);
        assert_eq!(pos.y, ground_rect.top() - 400.0);
        assert_eq!(pos.x + 125.0, state.tuning.view.width / 2.0);
    }
}
