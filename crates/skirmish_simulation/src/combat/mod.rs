//! Combat module
//!
//! ECS ответственность:
//! - Game state: Character (health, death, cooldown)
//! - Combat rules: attack start, hit resolution, damage, death
//! - Events: AttackIntent → AttackCheckHit → DamageRequest → DamageDealt / CharacterDied
//!
//! Внешняя сторона (анимация, ассеты, UI):
//! - reads `AnimatorParams`, `AnimationTrigger`, `SpawnVfx`
//! - may send `AttackCheckHit` from its own animation events

use bevy::prelude::*;

pub mod attack;
pub mod damage;
pub mod death;
pub mod hit;
pub mod vfx;


pub use attack::{advance_swings, begin_attacks, update_characters, AttackCheckHit, AttackIntent, Swing};
pub use damage::{apply_damage, CharacterDied, DamageDealt, DamageRequest, Dead};
pub use death::{run_death_hook, DeathHook};
pub use hit::{
    attack_check_hit, nearest_hit, resolve_attack_hits, Facing, Hurtbox, HurtboxProbe, HurtboxQuery,
    SpatialQuery, SphereCast, ATTACK_CAST_RADIUS,
};
pub use vfx::{record_vfx, SpawnVfx, VfxJournal, VfxKind};

use crate::components::AnimationTrigger;
use crate::session::GameSession;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения (один тик, строго последовательно):
/// 1. update_characters — cooldown decay + movement-speed signal
/// 2. begin_attacks — AttackIntent → cooldown reset + Swing
/// 3. advance_swings — Swing timeline → AttackCheckHit
/// 4. resolve_attack_hits — sphere cast → DamageRequest
/// 5. apply_damage — damage, death transition, death hooks
/// 6. record_vfx — headless VFX consumer
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Хост может положить свой GameSession до плагина — не перезаписываем
        app.init_resource::<GameSession>()
            .init_resource::<VfxJournal>();

        app.add_event::<AttackIntent>()
            .add_event::<AttackCheckHit>()
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<CharacterDied>()
            .add_event::<SpawnVfx>()
            .add_event::<AnimationTrigger>();

        app.add_systems(
            FixedUpdate,
            (
                update_characters,
                begin_attacks,
                advance_swings,
                resolve_attack_hits,
                apply_damage,
                record_vfx,
            )
                .chain(),
        );
    }
}
