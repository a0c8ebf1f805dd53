//! Gravity Climb headless runner
//!
//! `gravity-climb [tuning.json] [ticks] [seed]` plays a run with a simple
//! autopilot and prints the final snapshot as JSON. Hosts with a real
//! window drive `Session` the same way.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;

    use gravity_climb::audio::{AudioManager, LogAudio};
    use gravity_climb::highscores::FileStore;
    use gravity_climb::platform::{FixedStep, InputState, Key};
    use gravity_climb::sim::{GameEvent, GamePhase, GameState, PcgSource};
    use gravity_climb::{Session, Tuning};

    const DEFAULT_TICKS: u64 = 60 * 60 * 5;

    /// Synthetic frame times, uneven on purpose to exercise the accumulator
    const FRAME_TIMES: [f32; 3] = [1.0 / 50.0, 1.0 / 75.0, 1.0 / 60.0];

    struct Args {
        tuning: Tuning,
        ticks: u64,
        seed: u64,
    }

    fn parse_args() -> Args {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) if path != "-" => Tuning::load(path),
            _ => Tuning::default(),
        };
        let ticks = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TICKS);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Args {
            tuning,
            ticks,
            seed,
        }
    }

    /// Steer toward the next platform up, jump whenever possible, and shoot
    /// at whatever is closest.
    fn autopilot(state: &GameState, input: &mut InputState) {
        let player = state.player.rect();
        let center = player.center();

        let next = state
            .platforms
            .iter()
            .filter(|p| p.rect.top() < player.bottom() - 10.0)
            .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));
        let target_x = next.map_or(center.x, |p| p.rect.center().x);

        for key in [Key::Left, Key::Right, Key::Jump] {
            input.key_up(key);
        }
        if target_x < center.x - 10.0 {
            input.key_down(Key::Left);
        } else if target_x > center.x + 10.0 {
            input.key_down(Key::Right);
        }
        if state.player.on_ground || (state.player.vel.y > 2.0 && state.player.can_double_jump) {
            input.key_down(Key::Jump);
        }

        let aim = state
            .active_boss()
            .map(|b| b.rect().center())
            .or_else(|| {
                state
                    .enemies
                    .iter()
                    .map(|e| e.rect.center())
                    .min_by(|a, b| a.distance(center).total_cmp(&b.distance(center)))
            });
        match aim {
            Some(world) => input.pointer_down(Vec2::new(world.x, world.y - state.camera_y)),
            None => input.pointer_up(),
        }
    }

    pub fn run() {
        gravity_climb::init_logging();
        let args = parse_args();
        log::info!("Gravity Climb (headless) seed {} for {} ticks", args.seed, args.ticks);

        let store = FileStore::new(FileStore::DEFAULT_PATH);
        let mut session = Session::new(args.tuning, store, PcgSource::new(args.seed));
        let mut audio = AudioManager::new(LogAudio);
        let mut input = InputState::new();
        let mut clock = FixedStep::new();

        session.start();
        let mut frame = 0usize;
        'frames: while session.state().time_ticks < args.ticks {
            let steps = clock.advance(FRAME_TIMES[frame % FRAME_TIMES.len()]);
            frame += 1;

            for _ in 0..steps {
                autopilot(session.state(), &mut input);
                // Release the pointer between ticks so every tick is a fresh press
                let tick_input = input.snapshot();
                input.pointer_up();

                let events = session.tick(&tick_input);
                audio.play_events(&events);
                for event in &events {
                    match event {
                        GameEvent::BossSpawned(id) => log::info!("{:?} fight begins", id),
                        GameEvent::BossDefeated(id) => log::info!("{:?} defeated", id),
                        _ => {}
                    }
                }

                let phase = session.state().phase;
                match phase {
                    GamePhase::RevivalPending => {
                        audio.play_events(&session.revive());
                    }
                    phase if phase.is_terminal() => break 'frames,
                    _ => {}
                }
            }

            if frame % 600 == 0 {
                let state = session.state();
                log::info!(
                    "tick {} score {} hp {} ammo {} platforms {}",
                    state.time_ticks,
                    state.score,
                    state.player.hp,
                    state.ammo,
                    state.platforms.len()
                );
            }
        }

        let state = session.state();
        log::info!(
            "Finished after {} ticks: {:?}, score {}, high score {}",
            state.time_ticks,
            state.phase,
            state.score,
            session.high_score()
        );
        match serde_json::to_string(&session.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts embed the library directly
}
