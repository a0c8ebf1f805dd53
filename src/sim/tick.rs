//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one tick in a fixed order:
//! shoot, player, camera and progress, generation, pruning, pickups,
//! invincibility, enemies, bosses, bullets, heal items, end checks.

use glam::Vec2;

use super::camera;
use super::events::{GameEvent, SoundEffect};
use super::generator;
use super::physics;
use super::pools;
use super::rng::RandomSource;
use super::state::{BossId, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump pressed since the last tick (edge-triggered)
    pub jump: bool,
    /// Fire pressed since the last tick (edge-triggered)
    pub fire: bool,
    /// Fire button currently held (used by full-auto)
    pub fire_held: bool,
    /// Pointer position in screen space
    pub aim: Vec2,
}

/// Advance the game state by one fixed timestep.
/// Does nothing unless the run is `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut dyn RandomSource) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    pools::fire(state, input);
    physics::step_player(state, input);

    let progress = camera::advance(
        state.camera_y,
        state.player.pos.y,
        state.score,
        &state.stage,
        &state.tuning,
    );
    state.camera_y = progress.camera_y;
    state.score = progress.score;
    if let Some(boss) = progress.trigger {
        begin_boss_fight(state, boss);
    }

    generator::extend_frontier(state, rng);
    pools::prune(state);
    pools::collect_pickups(state);

    state.player.invincible_ticks = state.player.invincible_ticks.saturating_sub(1);

    physics::step_enemies(state);
    physics::step_bosses(state, rng);

    let report = physics::step_bullets(state, rng);
    for boss in report.defeated {
        finish_boss_fight(state, boss);
    }

    pools::step_heal_items(state);
    check_defeat(state);
}

/// Build the arena, activate the boss and move the player onto the arena
/// ground. Runs once per boss.
pub fn begin_boss_fight(state: &mut GameState, boss: BossId) {
    let ground = generator::build_arena(state, boss);
    let ground_rect = state.platforms[ground].rect;
    let pos = generator::boss_spawn_pos(state, boss, &ground_rect);

    match boss {
        BossId::Boss1 => {
            state.boss1.spawn(pos);
            state.stage.boss1_spawned = true;
        }
        BossId::Boss2 => {
            state.boss2.spawn(pos);
            state.stage.boss2_spawned = true;
            state.revival_platform = Some(ground);
        }
    }
    state.player.place_on(&ground_rect);

    log::info!("{:?} spawned at score {}", boss, state.score);
    state.emit(GameEvent::BossSpawned(boss));
}

/// Apply the rewards for a defeated boss
pub fn finish_boss_fight(state: &mut GameState, boss: BossId) {
    state.emit(GameEvent::BossDefeated(boss));
    match boss {
        BossId::Boss1 => {
            state.stage.boss1_defeated = true;
            state.full_auto = true;
            state.player.hp = state.player.max_hp;
            state.sound(SoundEffect::PowerUp);
            log::info!("Boss 1 defeated, full-auto unlocked");
        }
        BossId::Boss2 => {
            state.stage.boss2_defeated = true;
            state.phase = GamePhase::Cleared;
            state.sound(SoundEffect::Clear);
            log::info!("Boss 2 defeated, run cleared with score {}", state.score);
            state.emit(GameEvent::GameClear { score: state.score });
        }
    }
}

/// Out of hp or fallen past the bottom of the view
fn check_defeat(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let view = &state.tuning.view;
    let fell = state.player_screen_y() > view.height + view.fall_margin;
    if state.player.hp > 0 && !fell {
        return;
    }

    if state.stage.boss2_spawned && state.boss2.active && !state.revival_used {
        state.phase = GamePhase::RevivalPending;
        state.sound(SoundEffect::GameOver);
        log::info!("Defeated during the final fight, revival offered");
        state.emit(GameEvent::RevivalOffered { score: state.score });
    } else {
        end_run(state);
    }
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.sound(SoundEffect::GameOver);
    let new_record = state.score > state.best_score;
    log::info!("Game over with score {} (new record: {})", state.score, new_record);
    state.emit(GameEvent::GameOver {
        score: state.score,
        new_record,
    });
}

/// Continue after a defeat in the final fight. Returns false outside
/// `RevivalPending`.
pub fn revive(state: &mut GameState) -> bool {
    if state.phase != GamePhase::RevivalPending {
        return false;
    }
    let player = &mut state.player;
    player.hp = player.max_hp;
    player.invincible_ticks = state.tuning.player.revive_invincible_ticks;
    player.vel = Vec2::ZERO;
    if let Some(ground) = state.revival_platform.and_then(|i| state.platforms.get(i)) {
        player.place_on(&ground.rect);
    }

    state.revival_used = true;
    state.sound(SoundEffect::PowerUp);
    state.phase = GamePhase::Playing;
    log::info!("Player revived");
    true
}

/// Decline the revival; ends the run normally
pub fn give_up(state: &mut GameState) -> bool {
    if state.phase != GamePhase::RevivalPending {
        return false;
    }
    end_run(state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::rng::{PcgSource, ScriptedSource};
    use crate::sim::state::Enemy;
    use crate::tuning::Tuning;

    fn playing(seed: u64) -> (GameState, PcgSource) {
        let mut rng = PcgSource::new(seed);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        state.phase = GamePhase::Playing;
        (state, rng)
    }

    #[test]
    fn test_tick_requires_playing() {
        let mut rng = PcgSource::new(1);
        let mut state = GameState::new(Tuning::default(), 0, &mut rng);
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_idle_player_lands_on_start_platform() {
        let (mut state, mut rng) = playing(2);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert!(state.player.on_ground);
        assert_eq!(state.player.rect().bottom(), state.platforms[0].rect.top());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_fall_off_the_bottom_ends_run() {
        let (mut state, mut rng) = playing(3);
        state.platforms.clear();
        state.best_score = 5;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            score: 0,
            new_record: false
        }));
    }

    #[test]
    fn test_enemy_hits_deplete_hp() {
        let (mut state, mut rng) = playing(4);
        state.enemies.clear();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        let body = state.player.rect();
        state.enemies.push(Enemy {
            rect: Rect::new(body.left(), body.top(), 50.0, 50.0),
            patrol_left: body.left() - 1.0,
            patrol_right: body.left() + 100.0,
            speed: 0.0,
            direction: 1.0,
        });

        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 10_000 {
            // Pin the player against the enemy
            state.player.pos = body.pos;
            state.player.vel = Vec2::ZERO;
            tick(&mut state, &TickInput::default(), &mut rng);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.hp, 0);
    }

    #[test]
    fn test_boss1_spawn_sequence() {
        let (mut state, _) = playing(5);
        state.score = 300;
        begin_boss_fight(&mut state, BossId::Boss1);
        assert!(state.boss1.active);
        assert!(state.stage.boss1_spawned);
        assert!(state.ammo_unlimited());
        let ground = state
            .platforms
            .iter()
            .find(|p| p.arena == Some(BossId::Boss1))
            .unwrap();
        assert_eq!(state.player.rect().bottom(), ground.rect.top());
        assert_eq!(state.boss1.rect().top(), ground.rect.top() - 350.0);
        assert_eq!(state.drain_events(), vec![GameEvent::BossSpawned(BossId::Boss1)]);
    }

    #[test]
    fn test_boss1_defeat_unlocks_full_auto() {
        let (mut state, _) = playing(6);
        begin_boss_fight(&mut state, BossId::Boss1);
        state.player.hp = 3;
        finish_boss_fight(&mut state, BossId::Boss1);
        assert!(state.full_auto);
        assert_eq!(state.player.hp, 10);
        assert!(state.stage.generation_allowed());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_boss2_defeat_clears() {
        let (mut state, _) = playing(7);
        state.score = 700;
        finish_boss_fight(&mut state, BossId::Boss2);
        assert_eq!(state.phase, GamePhase::Cleared);
        assert!(state.drain_events().contains(&GameEvent::GameClear { score: 700 }));
    }

    #[test]
    fn test_revival_during_final_fight() {
        let (mut state, mut rng) = playing(8);
        state.stage.boss1_spawned = true;
        state.stage.boss1_defeated = true;
        begin_boss_fight(&mut state, BossId::Boss2);
        state.player.hp = 0;
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::RevivalPending);

        assert!(revive(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.hp, 10);
        assert_eq!(state.player.invincible_ticks, 180);
        let ground = state.platforms[state.revival_platform.unwrap()].rect;
        assert_eq!(state.player.rect().bottom(), ground.top());
        assert!(!revive(&mut state));
    }

    #[test]
    fn test_second_final_fight_defeat_ends_run() {
        let (mut state, mut rng) = playing(8);
        state.stage.boss1_spawned = true;
        state.stage.boss1_defeated = true;
        begin_boss_fight(&mut state, BossId::Boss2);
        state.player.hp = 0;
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(revive(&mut state));
        assert!(state.revival_used);
        state.drain_events();

        state.player.hp = 0;
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::RevivalOffered { .. })));
        assert!(!revive(&mut state));
    }

    #[test]
    fn test_give_up_ends_run() {
        let (mut state, mut rng) = playing(9);
        state.stage.boss1_spawned = true;
        state.stage.boss1_defeated = true;
        state.score = 700;
        state.best_score = 650;
        begin_boss_fight(&mut state, BossId::Boss2);
        state.player.hp = 0;
        tick(&mut state, &TickInput::default(), &mut rng);
        state.drain_events();

        assert!(give_up(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 700,
            new_record: true
        }));
    }

    #[test]
    fn test_determinism() {
        let (mut a, mut rng_a) = playing(99);
        let (mut b, mut rng_b) = playing(99);
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..100 {
            for input in &inputs {
                tick(&mut a, input, &mut rng_a);
                tick(&mut b, input, &mut rng_b);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.platforms.len(), b.platforms.len());
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_scripted_boss_hits_drop_heal() {
        let (mut state, _) = playing(10);
        begin_boss_fight(&mut state, BossId::Boss1);
        let target = state.boss1.rect().center();
        // Pointer on the boss, in screen space
        let aim = Vec2::new(target.x, target.y - state.camera_y);
        let fire = TickInput {
            fire: true,
            aim,
            ..Default::default()
        };
        let mut rng = ScriptedSource::constant(0.0);
        let mut hits = 0;
        for _ in 0..400 {
            tick(&mut state, &fire, &mut rng);
            hits += state
                .drain_events()
                .iter()
                .filter(|e| **e == GameEvent::Sound(SoundEffect::Hit))
                .count();
        }
        assert!(hits > 0);
        assert_eq!(state.boss1.hp, state.boss1.max_hp - 10 * hits as i32);
    }
}
