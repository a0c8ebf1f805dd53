//! Camera follow and height progress
//!
//! A pure function of the previous camera/score and the player's world y,
//! so it can be tested without building a world.

use super::state::{BossId, StageFlags};
use crate::tuning::Tuning;

/// Outcome of one camera/progress step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub camera_y: f32,
    pub score: u32,
    /// Boss whose spawn sequence should start this tick
    pub trigger: Option<BossId>,
}

/// Score ceiling for the current stage
pub fn score_ceiling(stage: &StageFlags, tuning: &Tuning) -> u32 {
    if stage.boss1_defeated {
        tuning.progress.boss2_threshold
    } else {
        tuning.progress.boss1_threshold
    }
}

/// Follow the player and update the height score
pub fn advance(
    camera_y: f32,
    player_y: f32,
    score: u32,
    stage: &StageFlags,
    tuning: &Tuning,
) -> ProgressUpdate {
    let view = &tuning.view;
    let upper = view.height * view.upper_line;
    let lower = view.height * view.lower_line;
    let screen_y = player_y - camera_y;

    let mut camera_y = camera_y;
    if screen_y < upper {
        camera_y = player_y - upper;
    } else if screen_y > lower && camera_y < 0.0 {
        camera_y = (camera_y + (screen_y - lower)).min(0.0);
    }

    let height = (-camera_y / tuning.progress.score_divisor).floor().max(0.0) as u32;
    let score = score.max(height.min(score_ceiling(stage, tuning)));

    let trigger = if !stage.boss1_spawned
        && score >= tuning.boss_trigger_score(tuning.progress.boss1_threshold)
    {
        Some(BossId::Boss1)
    } else if stage.boss1_defeated
        && !stage.boss2_spawned
        && score >= tuning.boss_trigger_score(tuning.progress.boss2_threshold)
    {
        Some(BossId::Boss2)
    } else {
        None
    };

    ProgressUpdate {
        camera_y,
        score,
        trigger,
    }
}
