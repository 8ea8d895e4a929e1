//! Damage reception и death transition
//!
//! `DamageRequest` → `Character::receive_damage` → side effects:
//! 1. hit VFX at the target position
//! 2. on death: physics switch (sensor collider, kinematic body, zero velocity),
//!    `AnimTrigger::Dead`, category `DeathHook`, `CharacterDied`
//! 3. health report to `GameSession` for the UI-tracked character
//!
//! Guard (dead / match finished) runs before any of it — at-most-once damage
//! per logical hit, даже если hit callback пришёл дважды за тик.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{RigidBody, Sensor, Velocity};

use crate::combat::{run_death_hook, DeathHook, SpawnVfx, Swing, VfxKind};
use crate::components::{AnimTrigger, AnimationTrigger, Character, DamageOutcome};
use crate::session::GameSession;

/// Событие: attacker's hit landed on target, damage pending.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: f32,
}

/// Событие: урон нанесён (после guard'а, только для реально применённого урона).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    /// Applied amount (negative / NaN requests count as 0)
    pub damage: f32,
    /// Health after the hit (clamped)
    pub health: f32,
    pub target_died: bool,
}

/// Событие: персонаж умер (ровно один раз за жизнь).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CharacterDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
    pub position: Vec3,
}

/// Компонент-маркер: entity мертв.
///
/// Трупы остаются на месте (sensor collider, kinematic body); despawn не наша забота.
#[derive(Component, Debug)]
pub struct Dead;

/// System: apply `DamageRequest` events.
#[allow(clippy::too_many_arguments)]
pub fn apply_damage(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(&mut Character, &Transform, Option<&DeathHook>, Option<&mut Velocity>)>,
    mut session: ResMut<GameSession>,
    mut vfx: EventWriter<SpawnVfx>,
    mut animation: EventWriter<AnimationTrigger>,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut died_events: EventWriter<CharacterDied>,
) {
    for request in requests.read() {
        let Ok((mut character, transform, death_hook, velocity)) = targets.get_mut(request.target) else {
            crate::logger::log_warning(&format!(
                "DamageRequest: target {:?} has no Character, hit dropped",
                request.target
            ));
            continue;
        };

        let outcome = character.receive_damage(request.amount, session.is_finished());
        let DamageOutcome::Applied { damage, health, died } = outcome else {
            crate::logger::log(&format!(
                "DamageRequest ignored: {:?} ({:?})",
                request.target, outcome
            ));
            continue;
        };

        let position = transform.translation;
        vfx.write(SpawnVfx {
            kind: VfxKind::Hit,
            position,
        });

        damage_dealt.write(DamageDealt {
            attacker: request.attacker,
            target: request.target,
            damage,
            health,
            target_died: died,
        });

        if died {
            // Physics: труп не толкается и не блокирует, но остаётся видимым
            commands
                .entity(request.target)
                .insert((Sensor, RigidBody::KinematicPositionBased, Dead))
                .remove::<Swing>();
            if let Some(mut velocity) = velocity {
                *velocity = Velocity::zero();
            }

            animation.write(AnimationTrigger {
                entity: request.target,
                trigger: AnimTrigger::Dead,
            });

            let hook = death_hook.copied().unwrap_or_default();
            run_death_hook(hook, position, &mut session, &mut vfx);

            died_events.write(CharacterDied {
                entity: request.target,
                killer: Some(request.attacker),
                position,
            });

            crate::logger::log_info(&format!(
                "☠️ {:?} killed by {:?} ({:?})",
                request.target, request.attacker, hook
            ));
        }

        if character.kind().is_ui_tracked() {
            session.report_health(health);
        }
    }
}
