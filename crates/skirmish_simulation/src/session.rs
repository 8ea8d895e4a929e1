//! Game session — authority on match end, aggregator of UI-facing state.
//!
//! Characters never look the session up globally: combat systems receive it as
//! `Res/ResMut<GameSession>`, and `spawn_character` refuses to create a character
//! when the resource is missing.

use bevy::prelude::*;

/// How the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum MatchResult {
    /// Player died.
    Defeat,
    /// Every enemy is dead.
    Victory,
}

#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct GameSession {
    result: Option<MatchResult>,
    score: u32,
    /// Последнее значение health игрока (для HUD)
    player_health: Option<f32>,
    health_reports: u32,
}

impl GameSession {
    /// Damage and attacks are suppressed once this is true.
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    /// Finish the match; the first result wins.
    pub fn finish(&mut self, result: MatchResult) {
        if self.result.is_none() {
            crate::logger::log_info(&format!("🏁 Session finished: {:?} (score: {})", result, self.score));
            self.result = Some(result);
        }
    }

    /// Health notification for the UI-tracked character (fire-and-forget).
    pub fn report_health(&mut self, value: f32) {
        self.player_health = Some(value);
        self.health_reports += 1;
    }

    pub fn player_health(&self) -> Option<f32> {
        self.player_health
    }

    /// Number of `report_health` calls received (HUD refresh counter).
    pub fn health_reports(&self) -> u32 {
        self.health_reports
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}
