//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::Component;

/// Marker component for the player-controlled character.
///
/// Inserted by `spawn_character` for `CharacterKind::Player`.
/// - Input systems: `With<Player>`
/// - Enemy drivers: `Without<Player>`
///
/// В матче ровно один entity с этим компонентом.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
