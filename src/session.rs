//! Run lifecycle
//!
//! A `Session` owns one `GameState`, the random source that drives it and
//! the score store. Hosts call `tick` once per fixed step and drain the
//! events it returns.

use crate::highscores::ScoreStore;
use crate::sim::{self, GameEvent, GamePhase, GameState, RandomSource, Snapshot, TickInput};
use crate::tuning::Tuning;

pub struct Session<S: ScoreStore, R: RandomSource> {
    state: GameState,
    tuning: Tuning,
    store: S,
    rng: R,
    high_score: u32,
}

impl<S: ScoreStore, R: RandomSource> Session<S, R> {
    /// Load the high score and build a fresh world (phase `Ready`)
    pub fn new(tuning: Tuning, mut store: S, mut rng: R) -> Self {
        let high_score = store.load();
        log::info!("Session created, high score {}", high_score);
        let state = GameState::new(tuning.clone(), high_score, &mut rng);
        Self {
            state,
            tuning,
            store,
            rng,
            high_score,
        }
    }

    /// Begin play from `Ready`; no-op otherwise
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Ready {
            self.state.phase = GamePhase::Playing;
            log::info!("Run started");
        }
    }

    /// Advance one tick and return the events it produced
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        sim::tick(&mut self.state, input, &mut self.rng);
        let events = self.state.drain_events();
        if events.iter().any(GameEvent::is_terminal) {
            self.record_score();
        }
        events
    }

    /// Discard the current run and build a new world
    pub fn reset(&mut self) {
        self.state = GameState::new(self.tuning.clone(), self.high_score, &mut self.rng);
        log::info!("Run reset");
    }

    /// Accept the revival offer
    pub fn revive(&mut self) -> Vec<GameEvent> {
        sim::revive(&mut self.state);
        self.state.drain_events()
    }

    /// Decline the revival offer
    pub fn give_up(&mut self) -> Vec<GameEvent> {
        sim::give_up(&mut self.state);
        let events = self.state.drain_events();
        if events.iter().any(GameEvent::is_terminal) {
            self.record_score();
        }
        events
    }

    fn record_score(&mut self) {
        let score = self.state.score;
        if score > self.high_score {
            self.high_score = score;
            self.store.save(score);
            log::info!("New high score {}", score);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.state)
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
