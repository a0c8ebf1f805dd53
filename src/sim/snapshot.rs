//! Read-only view handed to the renderer each frame

use serde::Serialize;

use super::boss::Boss;
use super::state::{Bullet, Enemy, GamePhase, GameState, Pickup, Platform, Player};

/// Everything needed to draw one frame. Positions are in world space;
/// subtract `camera_y` for screen space.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub camera_y: f32,
    pub score: u32,
    pub best_score: u32,
    pub ammo: u32,
    pub ammo_unlimited: bool,
    pub full_auto: bool,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub pickups: &'a [Pickup],
    /// Only bosses currently in the fight
    pub bosses: Vec<&'a Boss>,
}

impl<'a> Snapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            time_ticks: state.time_ticks,
            camera_y: state.camera_y,
            score: state.score,
            best_score: state.best_score,
            ammo: state.ammo,
            ammo_unlimited: state.ammo_unlimited(),
            full_auto: state.full_auto,
            player: &state.player,
            platforms: &state.platforms,
            enemies: &state.enemies,
            bullets: &state.bullets,
            pickups: &state.pickups,
            bosses: [&state.boss1, &state.boss2]
                .into_iter()
                .filter(|b| b.active)
                .collect(),
        }
    }

    /// Platforms overlapping the view, for culling
    pub fn visible_platforms(&self, view_height: f32) -> impl Iterator<Item = &'a Platform> + '_ {
        let top = self.camera_y;
        let bottom = self.camera_y + view_height;
        self.platforms
            .iter()
            .filter(move |p| p.rect.bottom() >= top && p.rect.top() <= bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::PcgSource;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_serializes() {
        let mut rng = PcgSource::new(4);
        let state = GameState::new(Tuning::default(), 0, &mut rng);
        let snap = Snapshot::of(&state);
        assert!(snap.bosses.is_empty());
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["platforms"].as_array().unwrap().len(), 20);
        assert_eq!(json["phase"], "Ready");
    }

    #[test]
    fn test_visible_platforms() {
        let mut rng = PcgSource::new(4);
        let state = GameState::new(Tuning::default(), 0, &mut rng);
        let snap = Snapshot::of(&state);
        // Platforms at 668 - 120 * i; the view covers y in [0, 768]
        let visible = snap.visible_platforms(768.0).count();
        assert_eq!(visible, 6);
    }
}
