//! Headless skirmish driver (stand-in for input + AI)
//!
//! Каждый тик: готовые к атаке персонажи с вероятностью `attack_chance`
//! шлют `AttackIntent`. Матч заканчивается победой, когда живых врагов не осталось.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::{apply_damage, begin_attacks, AttackIntent, Swing};
use crate::components::{Character, Player};
use crate::session::{GameSession, MatchResult};
use crate::DeterministicRng;

#[derive(Resource, Debug, Clone, Copy)]
pub struct SkirmishDriver {
    /// Chance per tick that a ready character swings (0..=1).
    pub attack_chance: f64,
}

impl Default for SkirmishDriver {
    fn default() -> Self {
        Self { attack_chance: 0.05 }
    }
}

pub struct SkirmishPlugin;

impl Plugin for SkirmishPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SkirmishDriver>().add_systems(
            FixedUpdate,
            (
                drive_attack_intents.before(begin_attacks),
                end_when_cleared.after(apply_damage),
            ),
        );
    }
}

/// System: random attack intents for characters that can swing right now.
pub fn drive_attack_intents(
    driver: Res<SkirmishDriver>,
    session: Res<GameSession>,
    mut rng: ResMut<DeterministicRng>,
    characters: Query<(Entity, &Character), Without<Swing>>,
    mut intents: EventWriter<AttackIntent>,
) {
    if session.is_finished() {
        return;
    }

    let chance = driver.attack_chance.clamp(0.0, 1.0);

    // Порядок итерации query не гарантирован — сортируем для детерминизма RNG
    let mut ready: Vec<Entity> = characters
        .iter()
        .filter(|(_, character)| character.can_attack())
        .map(|(entity, _)| entity)
        .collect();
    ready.sort_by_key(|entity| entity.index());

    for attacker in ready {
        if rng.rng.gen_bool(chance) {
            intents.write(AttackIntent { attacker });
        }
    }
}

/// System: all enemies dead → victory.
pub fn end_when_cleared(
    mut session: ResMut<GameSession>,
    enemies: Query<&Character, Without<Player>>,
) {
    if session.is_finished() || enemies.is_empty() {
        return;
    }

    if enemies.iter().all(Character::is_dead) {
        session.finish(MatchResult::Victory);
    }
}
