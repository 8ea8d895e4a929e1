//! Character spawning
//!
//! Все зависимости персонажа (session, VFX, animation signal) должны существовать
//! до spawn'а. Missing collaborator = `CombatError::MissingCollaborator`, никаких
//! полу-инициализированных entity.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody, Velocity};

use crate::combat::{Hurtbox, SpawnVfx};
use crate::components::{AnimationTrigger, AnimatorParams, Character, CharacterConfig, CharacterKind, Player};
use crate::config::Roster;
use crate::error::CombatError;
use crate::layers;
use crate::session::GameSession;

/// Fail fast if something a character talks to is not registered.
pub fn check_collaborators(world: &World) -> Result<(), CombatError> {
    if !world.contains_resource::<GameSession>() {
        return Err(CombatError::MissingCollaborator("GameSession"));
    }
    if !world.contains_resource::<Events<SpawnVfx>>() {
        return Err(CombatError::MissingCollaborator("VfxSpawner"));
    }
    if !world.contains_resource::<Events<AnimationTrigger>>() {
        return Err(CombatError::MissingCollaborator("AnimationSignal"));
    }
    Ok(())
}

/// Spawn a live character at full health.
pub fn spawn_character(
    world: &mut World,
    config: CharacterConfig,
    kind: CharacterKind,
    transform: Transform,
) -> Result<Entity, CombatError> {
    check_collaborators(world)?;

    let radius = config.body_radius;
    let layer = config.layer;
    let character = Character::new(config, kind)?;

    let mut entity = world.spawn((
        character,
        AnimatorParams::default(),
        kind.default_death_hook(),
        Hurtbox { radius },
        Collider::ball(radius),
        layers::character_groups(layer),
        RigidBody::Dynamic,
        Velocity::zero(),
        transform,
    ));
    if kind == CharacterKind::Player {
        entity.insert(Player);
    }
    let id = entity.id();

    crate::logger::log_info(&format!(
        "✅ Spawned {:?} {:?} at {:?} (layer: {})",
        kind,
        id,
        transform.translation,
        layers::layer_name(layer)
    ));

    Ok(id)
}

/// Spawn every roster entry in order.
pub fn spawn_roster(world: &mut World, roster: &Roster) -> Result<Vec<Entity>, CombatError> {
    roster
        .characters
        .iter()
        .map(|entry| {
            let id = spawn_character(world, entry.config.clone(), entry.kind, entry.transform())?;
            world.entity_mut(id).insert(Name::new(entry.name.clone()));
            Ok(id)
        })
        .collect()
}
