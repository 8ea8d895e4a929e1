//! Collision layers (rapier `Group` bits)
//!
//! - **Membership:** на каком слое находится персонаж (`CharacterConfig::layer`)
//! - **Target mask:** какие слои задевает его атака (`CharacterConfig::target_layers`)

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Player character.
pub const PLAYER: Group = Group::GROUP_1;

/// Enemies.
pub const ENEMY: Group = Group::GROUP_2;

/// Static world geometry (walls, props). Never carries a `Character`.
pub const ENVIRONMENT: Group = Group::GROUP_3;

/// Convert config bits into a rapier group, ignoring unknown bits.
pub fn group(bits: u32) -> Group {
    Group::from_bits_truncate(bits)
}

/// Collision groups for a character body: member of `layer`, collides with every
/// character layer plus the environment.
pub fn character_groups(layer: u32) -> CollisionGroups {
    CollisionGroups::new(group(layer), PLAYER | ENEMY | ENVIRONMENT)
}

/// Debug name for log lines.
pub fn layer_name(bits: u32) -> &'static str {
    let group = group(bits);
    if group == PLAYER {
        "Player"
    } else if group == ENEMY {
        "Enemy"
    } else if group == ENVIRONMENT {
        "Environment"
    } else {
        "Mixed"
    }
}
