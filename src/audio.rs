//! Sound playback front end
//!
//! The simulation only names sounds (`SoundEffect`). The host provides an
//! `AudioSink` that actually makes noise; `AudioManager` applies volume and
//! mute settings and feeds it the sounds drained from a tick.

pub use crate::sim::SoundEffect;
use crate::sim::GameEvent;

/// Something that can play a named sound at a volume in `0.0..=1.0`
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {} @ {:.2}", effect.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set sound effect volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play every sound event in `events`, in order
    pub fn play_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            if let GameEvent::Sound(effect) = event {
                self.play(*effect);
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BossId;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_plays_only_sound_events() {
        let mut audio = AudioManager::new(Recorder::default());
        let events = [
            GameEvent::Sound(SoundEffect::Jump),
            GameEvent::BossSpawned(BossId::Boss1),
            GameEvent::Sound(SoundEffect::Shoot),
        ];
        audio.play_events(&events);
        let played: Vec<_> = audio.sink().0.iter().map(|(e, _)| *e).collect();
        assert_eq!(played, vec![SoundEffect::Jump, SoundEffect::Shoot]);
        assert!((audio.sink().0[0].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Hit);
        assert!(audio.sink().0.is_empty());

        audio.set_muted(false);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Hit);
        assert!((audio.sink().0[0].1 - 0.4).abs() < 1e-6);
    }
}
