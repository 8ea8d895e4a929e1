//! Roster configuration (RON)
//!
//! Список персонажей матча: kind, позиция, направление взгляда, CharacterConfig.
//! Default roster is embedded from `data/skirmish.ron`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::components::{CharacterConfig, CharacterKind};
use crate::error::ConfigError;

/// Embedded default roster.
pub const DEFAULT_ROSTER_RON: &str = include_str!("../data/skirmish.ron");

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub kind: CharacterKind,
    #[serde(default)]
    pub position: [f32; 3],
    /// Look direction; Bevy forward is -Z.
    #[serde(default = "default_facing")]
    pub facing: [f32; 3],
    #[serde(default)]
    pub config: CharacterConfig,
}

fn default_facing() -> [f32; 3] {
    [0.0, 0.0, -1.0]
}

impl RosterEntry {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(Vec3::from_array(self.position))
            .looking_to(Vec3::from_array(self.facing), Vec3::Y)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Roster {
    pub characters: Vec<RosterEntry>,
}

impl Roster {
    /// Parse and validate: exactly one player, every config valid for its kind.
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let roster: Roster = ron::from_str(content)?;
        roster.validate()?;
        Ok(roster)
    }

    pub fn default_roster() -> Result<Self, ConfigError> {
        Self::from_ron_str(DEFAULT_ROSTER_RON)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let players = self
            .characters
            .iter()
            .filter(|entry| entry.kind.is_ui_tracked())
            .count();
        match players {
            0 => return Err(ConfigError::NoPlayer),
            1 => {}
            n => return Err(ConfigError::MultiplePlayers(n)),
        }

        for entry in &self.characters {
            entry.config.validate_for(entry.kind)?;
        }
        Ok(())
    }

    pub fn enemies(&self) -> impl Iterator<Item = &RosterEntry> {
        self.characters.iter().filter(|entry| !entry.kind.is_ui_tracked())
    }
}
