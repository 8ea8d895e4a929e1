//! Attack timing: per-tick character update, attack start, swing timeline.
//!
//! Input/AI → `AttackIntent` → cooldown reset + `AnimTrigger::Attack` → `Swing`
//! → (hit_delay) → `AttackCheckHit` → hit resolution.
//!
//! `Swing` is the headless stand-in for the animation-event callback: a real
//! animation backend may send `AttackCheckHit` itself and skip `Swing`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::components::{AnimTrigger, AnimationTrigger, AnimatorParams, Character};
use crate::session::GameSession;

/// Событие: input/AI хочет атаковать.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackIntent {
    pub attacker: Entity,
}

/// Событие: hit callback посреди анимации удара.
///
/// Triggers one sphere cast for `attacker`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackCheckHit {
    pub attacker: Entity,
}

/// Attack animation in progress (headless timeline).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Swing {
    pub elapsed: f32,
    /// When the hit callback fires (seconds since swing start)
    pub hit_delay: f32,
}

impl Swing {
    pub fn new(hit_delay: f32) -> Self {
        Self {
            elapsed: 0.0,
            hit_delay,
        }
    }

    /// Advance by `delta`; true when the hit moment is reached.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        self.elapsed >= self.hit_delay
    }
}

/// System: per-tick character update.
///
/// Cooldown decays for every character (dead included); the movement-speed
/// animator parameter is only written for living ones.
pub fn update_characters(
    time: Res<Time>,
    mut query: Query<(&mut Character, &mut AnimatorParams, Option<&Velocity>)>,
) {
    let delta = time.delta_secs();

    for (mut character, mut animator, velocity) in query.iter_mut() {
        let linvel = velocity.map(|v| v.linvel).unwrap_or(Vec3::ZERO);

        if let Some(speed) = character.update(delta, linvel) {
            animator.move_speed = speed;
        }
    }
}

/// System: start attacks from `AttackIntent` events.
///
/// Rejected silently when dead, on cooldown or after the match ended.
pub fn begin_attacks(
    mut commands: Commands,
    mut intents: EventReader<AttackIntent>,
    mut characters: Query<&mut Character>,
    session: Res<GameSession>,
    mut animation: EventWriter<AnimationTrigger>,
) {
    for intent in intents.read() {
        let Ok(mut character) = characters.get_mut(intent.attacker) else {
            crate::logger::log_warning(&format!(
                "AttackIntent: entity {:?} has no Character",
                intent.attacker
            ));
            continue;
        };

        if !character.begin_attack(session.is_finished()) {
            continue;
        }

        commands
            .entity(intent.attacker)
            .insert(Swing::new(character.config().hit_delay));
        animation.write(AnimationTrigger {
            entity: intent.attacker,
            trigger: AnimTrigger::Attack,
        });

        crate::logger::log(&format!(
            "⚔️ Attack started (attacker: {:?}, cooldown: {:.2}s)",
            intent.attacker,
            character.attack_cooldown_remaining()
        ));
    }
}

/// System: advance swings, fire `AttackCheckHit` once per swing.
pub fn advance_swings(
    mut commands: Commands,
    time: Res<Time>,
    mut swings: Query<(Entity, &mut Swing)>,
    mut hits: EventWriter<AttackCheckHit>,
) {
    let delta = time.delta_secs();

    for (entity, mut swing) in swings.iter_mut() {
        if swing.tick(delta) {
            hits.write(AttackCheckHit { attacker: entity });
            commands.entity(entity).remove::<Swing>();
        }
    }
}
